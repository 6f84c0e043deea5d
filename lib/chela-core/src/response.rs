//! HTTP response handling.
//!
//! [`Response`] carries a fully buffered body, so classification can parse a
//! borrowed view of the bytes while the caller keeps the original available.
//! A [`DecoratedResponse`] is the response augmented with the parsed JSON:API
//! payload after classification passes.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

use crate::body::{DecodeError, from_json};

/// HTTP response with status, headers, and a buffered body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }
}

/// A response augmented with its parsed JSON:API payload.
///
/// The payload is `None` exactly when a DELETE at an allowed status
/// short-circuited classification: no body parse happened, so no document is
/// fabricated. Every other successful call carries `Some(value)`.
#[derive(Debug, Clone)]
pub struct DecoratedResponse {
    response: Response,
    document: Option<Value>,
}

impl DecoratedResponse {
    /// Creates a decorated response.
    #[must_use]
    pub fn new(response: Response, document: Option<Value>) -> Self {
        Self { response, document }
    }

    /// The underlying response.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// The parsed JSON:API payload, when one was decoded.
    #[must_use]
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// HTTP status code of the underlying response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    /// Decode the payload into a typed value, reading from the original body
    /// bytes with path-aware errors.
    ///
    /// Returns `None` when no document was decoded (DELETE short-circuit).
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, DecodeError>> {
        self.document.as_ref()?;
        Some(from_json(self.response.body()))
    }

    /// Consume into (response, document).
    #[must_use]
    pub fn into_parts(self) -> (Response, Option<Value>) {
        (self.response, self.document)
    }
}
