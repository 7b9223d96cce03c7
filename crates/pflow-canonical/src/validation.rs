use thiserror::Error;

/// Validation errors for identifier text and headers.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the expected form.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a length or varint runs past its bounds.
    #[error("{field} ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Identifier body is not valid base58 for its marker.
    #[error("invalid base58 text: {0}")]
    InvalidEncoding(#[from] bs58::decode::Error),
}
