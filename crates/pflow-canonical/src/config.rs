use serde::{Deserialize, Serialize};

/// Multibase text encodings supported for identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multibase {
    /// Bitcoin alphabet, marker `z`.
    #[default]
    Base58Btc,
    /// Flickr alphabet, marker `Z`.
    Base58Flickr,
}

impl Multibase {
    /// Leading character identifying the alphabet.
    pub fn marker(self) -> char {
        match self {
            Multibase::Base58Btc => 'z',
            Multibase::Base58Flickr => 'Z',
        }
    }

    /// Looks up the base for a marker character.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'z' => Some(Multibase::Base58Btc),
            'Z' => Some(Multibase::Base58Flickr),
            _ => None,
        }
    }

    fn alphabet(self) -> &'static bs58::Alphabet {
        match self {
            Multibase::Base58Btc => bs58::Alphabet::BITCOIN,
            Multibase::Base58Flickr => bs58::Alphabet::FLICKR,
        }
    }

    /// Renders bytes as marker + base58 text.
    pub fn encode(self, bytes: &[u8]) -> String {
        let body = bs58::encode(bytes)
            .with_alphabet(self.alphabet())
            .into_string();
        let mut out = String::with_capacity(body.len() + 1);
        out.push(self.marker());
        out.push_str(&body);
        out
    }

    /// Decodes base58 text (without the marker).
    pub fn decode(self, body: &str) -> Result<Vec<u8>, bs58::decode::Error> {
        bs58::decode(body).with_alphabet(self.alphabet()).into_vec()
    }
}

/// Identifier configuration, fixed once and handed to [`CidDeriver`](crate::CidDeriver).
///
/// ```rust
/// use pflow_canonical::{CidConfig, Multibase};
///
/// let config: CidConfig = serde_json::from_str(r#"{"base":"base58flickr"}"#)?;
/// assert_eq!(config.base, Multibase::Base58Flickr);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CidConfig {
    /// Text encoding used when rendering new identifiers.
    pub base: Multibase,
}

impl CidConfig {
    /// Creates a configuration rendering with `base`.
    pub fn new(base: Multibase) -> Self {
        Self { base }
    }
}
