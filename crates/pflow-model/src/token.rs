use serde::{Deserialize, Serialize};

/// Integer-vector quantity attached to a place or an arrow.
///
/// Empty and all-zero vectors normalize to the canonical zero `[0]`, so a
/// token elided on the wire and a token decoded from a missing field are the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<i64>")]
pub struct Token(Vec<i64>);

impl Token {
    /// Builds a token, normalizing zero vectors.
    pub fn new(values: Vec<i64>) -> Self {
        if values.iter().all(|v| *v == 0) {
            Self::zero()
        } else {
            Self(values)
        }
    }

    /// The canonical absent token.
    pub fn zero() -> Self {
        Self(vec![0])
    }

    /// True when the token carries no quantity.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0)
    }

    /// Component values.
    pub fn values(&self) -> &[i64] {
        &self.0
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Self::new(vec![value])
    }
}

impl From<Vec<i64>> for Token {
    fn from(values: Vec<i64>) -> Self {
        Self::new(values)
    }
}

impl From<Token> for Vec<i64> {
    fn from(token: Token) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vectors_normalize() {
        assert_eq!(Token::new(Vec::<i64>::new()), Token::zero());
        assert_eq!(Token::new(vec![0, 0, 0]), Token::zero());
        assert_eq!(Token::default().values(), &[0]);
        assert!(Token::from(0).is_zero());
    }

    #[test]
    fn non_zero_vectors_are_kept() {
        let token = Token::new(vec![0, 3]);
        assert!(!token.is_zero());
        assert_eq!(token.values(), &[0, 3]);
    }

    #[test]
    fn serde_form_is_an_array() {
        assert_eq!(serde_json::to_string(&Token::from(4)).unwrap(), "[4]");
        let token: Token = serde_json::from_str("[0,0]").unwrap();
        assert_eq!(token, Token::zero());
    }
}
