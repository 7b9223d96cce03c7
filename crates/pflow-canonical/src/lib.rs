//! Canonical encoding and content identifiers for pflow values.
//!
//! Identification is a one-way pipeline: a value is canonicalized into bytes
//! with no degrees of freedom, the bytes are hashed with SHA-256, and the
//! digest is prefixed with a self-describing header and rendered as
//! multibase text.
//!
//! ```rust
//! use pflow_canonical::{CidConfig, CidDeriver};
//!
//! let deriver = CidDeriver::new(CidConfig::default());
//! let cid = deriver.from_bytes([b"hello"]);
//! assert_eq!(
//!     cid.to_string(),
//!     "z4EBG9j39DX8pJ5CjucFtnPRYvvKgDPPZ522KvJGCLJ9cB7AFwh"
//! );
//! ```
#![deny(missing_docs)]

/// Raw byte sequences carried as base64 text.
pub mod bytes;
/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Content identifiers and their derivation.
pub mod cid;
/// Process-wide identifier configuration.
pub mod config;
/// Self-describing identifier header.
pub mod prefix;
/// Validation helpers used by identifier parsing.
pub mod validation;

pub use bytes::RawBytes;
pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use cid::{Cid, CidDeriver, CidError, Subject};
pub use config::{CidConfig, Multibase};
pub use prefix::CidPrefix;
pub use validation::ValidationError;
