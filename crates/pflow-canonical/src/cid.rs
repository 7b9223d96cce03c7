//! Content identifiers.
//!
//! A [`Cid`] is `prefix || sha256(bytes)` rendered as multibase text, where
//! the prefix names the identifier version, the content type, the hash
//! function and the digest length (see [`CidPrefix`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::bytes::RawBytes;
use crate::canonicalizer::{CanonicalizationError, Canonicalizer};
use crate::config::{CidConfig, Multibase};
use crate::prefix::{CidPrefix, SHA2_256_LEN};
use crate::validation::ValidationError;

/// Error during identifier derivation or parsing.
#[derive(thiserror::Error, Debug)]
pub enum CidError {
    /// The value could not be canonicalized; no identifier is produced.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Identifier text is malformed.
    #[error("invalid identifier: {0}")]
    Parse(#[from] ValidationError),
}

/// Content identifier: header, SHA-256 digest and the base used to render it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cid {
    prefix: CidPrefix,
    digest: [u8; SHA2_256_LEN],
    base: Multibase,
}

impl Cid {
    /// Header of this identifier.
    pub fn prefix(&self) -> CidPrefix {
        self.prefix
    }

    /// Raw SHA-256 digest.
    pub fn digest(&self) -> &[u8; SHA2_256_LEN] {
        &self.digest
    }

    /// Base used by [`Display`](fmt::Display).
    pub fn base(&self) -> Multibase {
        self.base
    }

    /// Same identifier rendered under another base.
    pub fn with_base(mut self, base: Multibase) -> Self {
        self.base = base;
        self
    }

    /// Binary form: header bytes followed by the digest.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.prefix.to_bytes();
        bytes.extend_from_slice(&self.digest);
        bytes
    }

    /// Compares header and digest, ignoring the text base.
    pub fn same_content(&self, other: &Cid) -> bool {
        self.prefix == other.prefix && self.digest == other.digest
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base.encode(&self.to_bytes()))
    }
}

impl FromStr for Cid {
    type Err = CidError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        let marker = chars.next().ok_or(ValidationError::OutOfBounds {
            field: "cid",
            value: "empty".to_string(),
        })?;
        let base = Multibase::from_marker(marker).ok_or_else(|| {
            ValidationError::PatternMismatch {
                field: "multibase",
                value: marker.to_string(),
            }
        })?;
        let bytes = base.decode(chars.as_str()).map_err(ValidationError::from)?;

        let (prefix, used) = CidPrefix::from_bytes(&bytes)?;
        let digest: [u8; SHA2_256_LEN] = bytes[used..].try_into().map_err(|_| {
            ValidationError::OutOfBounds {
                field: "digest",
                value: format!("{} bytes", bytes.len() - used),
            }
        })?;
        Ok(Self {
            prefix,
            digest,
            base,
        })
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Input accepted by [`CidDeriver::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// Already an identifier; returned as-is.
    Cid(Cid),
    /// Raw bytes; hashed directly.
    Bytes(Vec<u8>),
    /// Structured value; canonicalized first.
    Value(Value),
}

impl From<Cid> for Subject {
    fn from(cid: Cid) -> Self {
        Subject::Cid(cid)
    }
}

impl From<Vec<u8>> for Subject {
    fn from(bytes: Vec<u8>) -> Self {
        Subject::Bytes(bytes)
    }
}

impl From<&[u8]> for Subject {
    fn from(bytes: &[u8]) -> Self {
        Subject::Bytes(bytes.to_vec())
    }
}

impl From<RawBytes> for Subject {
    fn from(bytes: RawBytes) -> Self {
        Subject::Bytes(bytes.into_inner())
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        Subject::Value(value)
    }
}

/// Derives identifiers under a fixed [`CidConfig`].
///
/// # Example
///
/// ```rust
/// use pflow_canonical::{CidConfig, CidDeriver};
/// use serde_json::json;
///
/// let deriver = CidDeriver::new(CidConfig::default());
/// let a = deriver.from_value(json!({"b": 1, "a": 2}))?;
/// let b = deriver.from_value(json!({"a": 2, "b": 1}))?;
/// assert_eq!(a, b);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CidDeriver {
    config: CidConfig,
    canonicalizer: Canonicalizer,
}

#[allow(clippy::wrong_self_convention)]
impl CidDeriver {
    /// Creates a deriver with the default canonicalizer.
    pub fn new(config: CidConfig) -> Self {
        Self::with_canonicalizer(config, Canonicalizer::default())
    }

    /// Creates a deriver with a custom canonicalizer.
    pub fn with_canonicalizer(config: CidConfig, canonicalizer: Canonicalizer) -> Self {
        Self {
            config,
            canonicalizer,
        }
    }

    /// Configuration this deriver renders with.
    pub fn config(&self) -> &CidConfig {
        &self.config
    }

    /// Canonicalizer applied to structured values.
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Hashes `bytes` and wraps the digest in the default header.
    pub fn identify(&self, bytes: &[u8]) -> Cid {
        Cid {
            prefix: CidPrefix::default(),
            digest: Sha256::digest(bytes).into(),
            base: self.config.base,
        }
    }

    /// Identifies the concatenation of `parts`.
    ///
    /// Parts are joined without a delimiter, so `["ab", "c"]` and
    /// `["a", "bc"]` produce the same identifier.
    pub fn from_bytes<I, B>(&self, parts: I) -> Cid
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_ref());
        }
        Cid {
            prefix: CidPrefix::default(),
            digest: hasher.finalize().into(),
            base: self.config.base,
        }
    }

    /// Identifies an identifier, raw bytes or a structured value.
    pub fn from_value(&self, subject: impl Into<Subject>) -> Result<Cid, CidError> {
        match subject.into() {
            Subject::Cid(cid) => Ok(cid),
            Subject::Bytes(bytes) => Ok(self.from_bytes([bytes])),
            Subject::Value(value) => {
                let bytes = self.canonicalizer.canonicalize(&value)?;
                tracing::debug!(len = bytes.len(), "canonicalized value for identification");
                Ok(self.identify(&bytes))
            }
        }
    }

    /// Identifies any serializable value by its canonical form.
    pub fn from_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Cid, CidError> {
        let bytes = self.canonicalizer.encode(value)?;
        Ok(self.identify(&bytes))
    }

    /// Recomputes the identifier of `subject` and compares it with `claimed`.
    pub fn verify(&self, subject: impl Into<Subject>, claimed: &Cid) -> Result<bool, CidError> {
        let computed = self.from_value(subject)?;
        Ok(computed.same_content(claimed))
    }
}
