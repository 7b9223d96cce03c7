use canonical_json::to_string;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use std::fmt;

/// Default nesting limit applied by [`Canonicalizer::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The value could not be converted into the JSON data model.
    #[error("value is not representable: {0}")]
    Serialization(String),
    /// The value nests deeper than the configured limit.
    #[error("nesting deeper than {max} at {path}")]
    DepthExceeded {
        /// Location of the first value past the limit.
        path: String,
        /// Configured limit.
        max: usize,
    },
    /// Canonical bytes could not be parsed back.
    #[error("invalid canonical JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Location of the value being validated; one segment per nesting level.
#[derive(Debug, Default)]
struct Trail {
    segments: Vec<String>,
}

impl Trail {
    fn depth(&self) -> usize {
        self.segments.len()
    }

    fn enter(&mut self, segment: String) {
        self.segments.push(segment);
    }

    fn leave(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            f.write_str("root")
        } else {
            f.write_str(&self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
///
/// Object keys are sorted byte-wise, no insignificant whitespace is emitted
/// and integers are written in plain decimal, so logically equal values
/// always produce identical bytes.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    max_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Canonicalizer {
    /// Creates a canonicalizer that rejects values nested deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Produces canonical bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        self.validate(value, &mut Trail::default())?;

        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Serializes any serde value and canonicalizes the result.
    ///
    /// The nesting limit is checked on the converted JSON value, so it does
    /// not bound recursion inside the type's own `Serialize` impl.
    pub fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, CanonicalizationError> {
        let value = serde_json::to_value(value)
            .map_err(|err| CanonicalizationError::Serialization(err.to_string()))?;
        self.canonicalize(&value)
    }

    /// Reads a value back from canonical bytes.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CanonicalizationError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Walks the value and enforces the nesting limit.
    fn validate(&self, value: &Value, trail: &mut Trail) -> Result<(), CanonicalizationError> {
        if trail.depth() > self.max_depth {
            return Err(CanonicalizationError::DepthExceeded {
                path: trail.to_string(),
                max: self.max_depth,
            });
        }
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    trail.enter(key.clone());
                    self.validate(child, trail)?;
                    trail.leave();
                }
                Ok(())
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    trail.enter(format!("[{}]", idx));
                    self.validate(item, trail)?;
                    trail.leave();
                }
                Ok(())
            }
            Value::Number(_) | Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn nested_keys_are_sorted_without_whitespace() {
        let value = json!({"z": [3, {"b": true, "a": null}], "a": "x"});
        let bytes = Canonicalizer::default().canonicalize(&value).unwrap();
        assert_eq!(bytes, br#"{"a":"x","z":[3,{"a":null,"b":true}]}"#.to_vec());
    }

    #[test]
    fn integers_are_plain_decimal() {
        let value = json!({"n": 9007199254740991_i64, "m": -42, "z": 0});
        let bytes = Canonicalizer::default().canonicalize(&value).unwrap();
        assert_eq!(bytes, br#"{"m":-42,"n":9007199254740991,"z":0}"#.to_vec());
    }

    #[test]
    fn hash_map_iteration_order_does_not_leak() {
        let mut first = HashMap::new();
        let mut second = HashMap::new();
        for key in ["delta", "alpha", "charlie", "bravo"] {
            first.insert(key, key.len());
        }
        for key in ["bravo", "charlie", "alpha", "delta"] {
            second.insert(key, key.len());
        }
        let canonicalizer = Canonicalizer::default();
        assert_eq!(
            canonicalizer.encode(&first).unwrap(),
            canonicalizer.encode(&second).unwrap()
        );
    }

    #[test]
    fn depth_limit_reports_path() {
        let value = json!({"a": {"b": [1]}});
        let err = Canonicalizer::new(2).canonicalize(&value).unwrap_err();
        match err {
            CanonicalizationError::DepthExceeded { path, max } => {
                assert_eq!(path, "a.b.[0]");
                assert_eq!(max, 2);
            }
            other => panic!("expected DepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn sibling_paths_do_not_accumulate() {
        let value = json!({"a": [1, 2], "b": {"c": {"d": 0}}});
        let err = Canonicalizer::new(2).canonicalize(&value).unwrap_err();
        match err {
            CanonicalizationError::DepthExceeded { path, .. } => assert_eq!(path, "b.c.d"),
            other => panic!("expected DepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn serialized_types_hit_the_depth_limit() {
        #[derive(Serialize)]
        struct Chain {
            next: Option<Box<Chain>>,
        }

        let mut chain = Chain { next: None };
        for _ in 0..4 {
            chain = Chain {
                next: Some(Box::new(chain)),
            };
        }
        let err = Canonicalizer::new(3).encode(&chain).unwrap_err();
        assert!(matches!(err, CanonicalizationError::DepthExceeded { max: 3, .. }));
        assert!(Canonicalizer::new(5).encode(&chain).is_ok());
    }

    #[test]
    fn non_string_map_keys_are_not_representable() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        let err = Canonicalizer::default().encode(&map).unwrap_err();
        assert!(matches!(err, CanonicalizationError::Serialization(_)));
    }
}
