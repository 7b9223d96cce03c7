//! Petri-net process model values and their JSON wire schemas.
//!
//! This crate provides:
//! - [`Model`] and its parts, built with chained builder calls
//! - decoding of the import and export wire schemas through one lenient
//!   normalization stage ([`ModelDecoder`])
//! - encoding to the export schema with zero values elided
//! - content identifiers for models via [`pflow_canonical`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pflow_canonical::{CidConfig, CidDeriver};
//! use pflow_model::{Arrow, Model, Place, Transition};
//!
//! let model = Model::new()
//!     .with_place("p0", Place::new(0).initial(1))
//!     .with_transition("t0", Transition::at(80, 40))
//!     .with_arrow(Arrow::new("p0", "t0"));
//!
//! let bytes = model.to_json()?;
//! let decoded = Model::from_json(&bytes)?;
//! assert_eq!(decoded, model);
//!
//! let deriver = CidDeriver::new(CidConfig::default());
//! assert_eq!(decoded.cid(&deriver)?, model.cid(&deriver)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// Structural model checks.
pub mod checks;
/// Wire schema encoding and decoding.
pub mod codec;
/// Error types for codec operations.
pub mod errors;
/// Model value types and builders.
pub mod model;
/// Token quantities.
pub mod token;

pub use checks::ModelIssue;
pub use codec::{DecodeMode, Decoded, FieldIssue, ModelDecoder};
pub use errors::CodecError;
pub use model::{Arrow, Model, Place, Transition, DEFAULT_MODEL_TYPE};
pub use token::Token;
