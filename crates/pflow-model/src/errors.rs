use thiserror::Error;

/// Errors that can occur while decoding or encoding a model.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input bytes are not JSON at all.
    #[error("malformed model JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Input is JSON but the top level is not an object.
    #[error("model JSON must be an object, found {0}")]
    NotAnObject(&'static str),
    /// A field has the wrong shape (strict decoding only).
    #[error("field {path} must be {expected}")]
    FieldShape {
        /// Location of the field, e.g. `arcs[2].weight`.
        path: String,
        /// Shape the field should have had.
        expected: &'static str,
    },
    /// The export document could not be written.
    #[error("failed to serialize model: {0}")]
    Serialization(String),
}
