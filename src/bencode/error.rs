use thiserror::Error;

/// Errors produced while decoding, encoding or streaming bencode.
///
/// Every variant is deterministic: retrying the same input yields the same error.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// The input ended while a token or payload was still expected.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A length prefix or integer token is not a valid decimal number.
    #[error("malformed field at offset {offset} ({snippet}...)")]
    MalformedField { offset: usize, snippet: String },

    /// The byte at `offset` cannot start a value.
    #[error("format error at offset {offset} ({snippet}...)")]
    FormatError { offset: usize, snippet: String },

    /// Bytes remain after the outermost value.
    #[error("trailing data at offset {offset} ({snippet}...)")]
    TrailingData { offset: usize, snippet: String },

    /// Containers are nested deeper than the decoder allows.
    #[error("nesting too deep (limit {depth})")]
    NestingTooDeep { depth: usize },

    /// A value has no bencode representation.
    #[error("unsupported value {value} of type {type_name}")]
    UnsupportedType {
        value: String,
        type_name: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    pub(crate) fn unsupported<T: std::fmt::Display + ?Sized>(value: &T) -> Self {
        BencodeError::UnsupportedType {
            value: value.to_string(),
            type_name: std::any::type_name::<T>(),
        }
    }
}
