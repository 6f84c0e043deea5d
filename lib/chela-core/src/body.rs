//! Body serialization utilities.

use bytes::Bytes;
use derive_more::{Display, Error};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON:API content type (`application/vnd.api+json`).
    JsonApi,
    /// Plain JSON content type (`application/json`).
    Json,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JsonApi => "application/vnd.api+json",
            Self::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON deserialization error with path context.
#[derive(Debug, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct DecodeError {
    /// JSON path to the error (e.g., "data.attributes.title").
    pub path: String,
    /// Error message.
    pub message: String,
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use chela_core::to_json;
/// use serde_json::json;
///
/// let document = json!({"data": {"type": "articles"}});
/// let bytes = to_json(&document).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"data":{"type":"articles"}}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(value).map(Bytes::from)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so a failed decode names the exact field that
/// rejected the input.
///
/// # Errors
///
/// Returns a [`DecodeError`] if deserialization fails.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| DecodeError {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    })
}
