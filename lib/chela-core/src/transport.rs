//! Network transport boundary.
//!
//! [`Transport`] is the single seam between the pipeline and the wire: one
//! operation taking a request and resolving to a buffered response, or
//! failing with a [`TransportError`]. Implementations should be async-first;
//! the `chela` crate ships a hyper-based one.

use std::future::Future;

use derive_more::{Display, Error};

use crate::{Request, Response};

/// Result type alias using [`TransportError`].
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Network-level transport.
///
/// The pipeline hands over an owned [`Request`] and awaits the response. A
/// transport failure means the attempt never produced a response; the
/// pipeline classifies it accordingly.
pub trait Transport: Send + Sync {
    /// Perform the network call for one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt fails before a response is available:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - A request the transport cannot represent
    fn call(&self, request: Request) -> impl Future<Output = TransportResult<Response>> + Send;
}

/// Network-level errors raised by a [`Transport`].
#[derive(Debug, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The request cannot be represented on the wire.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
