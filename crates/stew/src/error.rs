//! Error types for stew operations.

/// Error type for stew operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    // JSON errors
    /// Failed to parse JSON input.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    /// Failed to serialize to JSON.
    #[error("JSON serialize error: {0}")]
    JsonSerialize(String),
    /// f64 is NaN or Infinity (not representable in JSON).
    #[error("cannot encode non-finite float {0} as JSON")]
    NonFiniteFloat(f64),
    /// JSON document parsed, but its root is not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    // Encoding errors
    /// Base64 payload could not be decoded.
    #[error("base64 decode error: {0}")]
    Base64(String),
    /// Signed string does not split into payload and signature.
    #[error("signed string is malformed: expected 2 parts, found {parts}")]
    MalformedSignedString { parts: usize },
    /// Signature does not match the payload.
    #[error("signature does not match payload")]
    SignatureMismatch,
    /// Separator would collide with base64 output.
    #[error("separator {0:?} is part of the base64 alphabet")]
    InvalidSeparator(char),

    // Accessor errors
    /// Nothing stored at the path.
    #[error("nothing found at {path:?}")]
    NotFound { path: String },
    /// Expected one type but found another.
    #[error("expected {expected} at {path:?}, found {found}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    // Coercion errors
    /// String could not be coerced into a number.
    #[error("cannot parse {0:?} as a number")]
    NumberParse(String),
}

/// Result type alias for stew operations.
pub type Result<T> = std::result::Result<T, Error>;
