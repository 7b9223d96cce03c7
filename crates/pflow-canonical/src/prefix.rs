use crate::validation::ValidationError;

/// Identifier version written into every header: `1`.
pub const VERSION: u64 = 1;

/// Content-type tag for canonicalized structured data (`dag-json`).
pub const CODEC_DAG_JSON: u64 = 0x0129;

/// Hash-function tag for SHA-256.
pub const HASH_SHA2_256: u64 = 0x12;

/// SHA-256 digest length in bytes.
pub const SHA2_256_LEN: usize = 32;

/// Self-describing header prepended to a digest.
///
/// Each field is written as an unsigned LEB128 varint, so the default
/// header is the five bytes `01 a9 02 12 20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidPrefix {
    /// Identifier version.
    pub version: u64,
    /// Content-type tag.
    pub codec: u64,
    /// Hash-function tag.
    pub hash_fn: u64,
    /// Digest length in bytes.
    pub hash_len: u64,
}

impl Default for CidPrefix {
    fn default() -> Self {
        Self {
            version: VERSION,
            codec: CODEC_DAG_JSON,
            hash_fn: HASH_SHA2_256,
            hash_len: SHA2_256_LEN as u64,
        }
    }
}

impl CidPrefix {
    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8);
        for field in [self.version, self.codec, self.hash_fn, self.hash_len] {
            write_varint(field, &mut bytes);
        }
        bytes
    }

    /// Reads a header from the front of `bytes`, returning it with the
    /// number of bytes consumed.
    ///
    /// Only the default header is accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), ValidationError> {
        let mut cursor = 0;
        let mut next = |field: &'static str| {
            let (value, used) = read_varint(&bytes[cursor..], field)?;
            cursor += used;
            Ok::<_, ValidationError>(value)
        };
        let prefix = Self {
            version: next("version")?,
            codec: next("codec")?,
            hash_fn: next("hash_fn")?,
            hash_len: next("hash_len")?,
        };

        let expected = Self::default();
        for (field, got, want) in [
            ("version", prefix.version, expected.version),
            ("codec", prefix.codec, expected.codec),
            ("hash_fn", prefix.hash_fn, expected.hash_fn),
            ("hash_len", prefix.hash_len, expected.hash_len),
        ] {
            if got != want {
                return Err(ValidationError::PatternMismatch {
                    field,
                    value: format!("{:#x}", got),
                });
            }
        }
        Ok((prefix, cursor))
    }
}

fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn read_varint(bytes: &[u8], field: &'static str) -> Result<(u64, usize), ValidationError> {
    let mut value = 0u64;
    for (idx, byte) in bytes.iter().enumerate().take(9) {
        value |= u64::from(byte & 0x7f) << (7 * idx);
        if byte & 0x80 == 0 {
            // a trailing zero group means the same value fits in fewer bytes
            if idx > 0 && *byte == 0 {
                return Err(ValidationError::PatternMismatch {
                    field,
                    value: format!("non-minimal varint {:#x}", value),
                });
            }
            return Ok((value, idx + 1));
        }
    }
    Err(ValidationError::OutOfBounds {
        field,
        value: format!("{} bytes", bytes.len().min(9)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_bytes() {
        assert_eq!(CidPrefix::default().to_bytes(), vec![0x01, 0xa9, 0x02, 0x12, 0x20]);
    }

    #[test]
    fn header_is_read_back() {
        let mut bytes = CidPrefix::default().to_bytes();
        bytes.extend_from_slice(&[0xaa; 4]);
        let (prefix, used) = CidPrefix::from_bytes(&bytes).unwrap();
        assert_eq!(prefix, CidPrefix::default());
        assert_eq!(used, 5);
    }

    #[test]
    fn foreign_codec_is_rejected() {
        let err = CidPrefix::from_bytes(&[0x01, 0x55, 0x12, 0x20]).unwrap_err();
        match err {
            ValidationError::PatternMismatch { field, value } => {
                assert_eq!(field, "codec");
                assert_eq!(value, "0x55");
            }
            other => panic!("expected PatternMismatch, got {other:?}"),
        }
    }

    #[test]
    fn padded_varint_is_rejected() {
        let err = CidPrefix::from_bytes(&[0x81, 0x00, 0xa9, 0x02, 0x12, 0x20]).unwrap_err();
        match err {
            ValidationError::PatternMismatch { field, value } => {
                assert_eq!(field, "version");
                assert_eq!(value, "non-minimal varint 0x1");
            }
            other => panic!("expected PatternMismatch, got {other:?}"),
        }
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert!(matches!(
            CidPrefix::from_bytes(&[0x01, 0xa9]),
            Err(ValidationError::OutOfBounds { field: "codec", .. })
        ));
    }
}
