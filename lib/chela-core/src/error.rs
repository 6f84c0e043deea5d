//! Error types for chela.
//!
//! Every failure in the pipeline is one of two disjoint kinds, split by
//! whether a network attempt was made:
//!
//! - [`Error::PreFetch`] - the call was rejected before any I/O occurred.
//! - [`Error::PostFetch`] - the call failed after a network attempt,
//!   including the case where the attempt itself never completed (then no
//!   response is attached).
//!
//! Callers branch by matching the variant; there is no recovery or retry at
//! this layer.

use derive_more::Display;

use crate::transport::TransportError;
use crate::{Request, Response};

/// Type-erased error raised by a middleware hook or an underlying layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pipeline operations.
#[derive(Debug, Display)]
pub enum Error {
    /// The call was rejected before any network I/O.
    #[display("beforeFetch failed; review middleware stack ({} {})", request.method(), request.url())]
    PreFetch {
        /// The request that was about to be dispatched (URL and options).
        request: Request,
        /// The originating error.
        source: BoxError,
    },

    /// The call failed after a network attempt was made.
    #[display("{message}")]
    PostFetch {
        /// The response, when the attempt produced one. `None` when the
        /// transport call itself failed.
        response: Option<Response>,
        /// Human-readable classification message.
        message: String,
        /// The originating error, when one exists.
        source: Option<BoxError>,
    },
}

impl Error {
    /// Create a pre-fetch error from a rejected request.
    #[must_use]
    pub fn pre_fetch(request: Request, source: impl Into<BoxError>) -> Self {
        Self::PreFetch {
            request,
            source: source.into(),
        }
    }

    /// Create a post-fetch error from a failed transport call.
    ///
    /// No response is attached; the message and source are the transport's.
    #[must_use]
    pub fn transport(source: TransportError) -> Self {
        Self::PostFetch {
            response: None,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a post-fetch error for a body that failed to parse as JSON.
    #[must_use]
    pub fn invalid_json(response: Response, source: serde_json::Error) -> Self {
        Self::PostFetch {
            message: format!("invalid json: {source}"),
            response: Some(response),
            source: Some(Box::new(source)),
        }
    }

    /// Create a post-fetch error for a payload without a top-level `data`.
    #[must_use]
    pub fn missing_data(response: Response) -> Self {
        Self::PostFetch {
            response: Some(response),
            message: "invalid json".to_string(),
            source: None,
        }
    }

    /// Create a post-fetch error for a 5xx status.
    #[must_use]
    pub fn server_error(response: Response) -> Self {
        Self::PostFetch {
            response: Some(response),
            message: "Server Error".to_string(),
            source: None,
        }
    }

    /// Create a post-fetch error for a 404 status.
    #[must_use]
    pub fn record_not_found(response: Response) -> Self {
        Self::PostFetch {
            response: Some(response),
            message: "record not found".to_string(),
            source: None,
        }
    }

    /// Create a post-fetch error from a rejected `afterFetch` hook.
    #[must_use]
    pub fn after_fetch(response: Response, source: BoxError) -> Self {
        Self::PostFetch {
            response: Some(response),
            message: "afterFetch failed; review middleware stack".to_string(),
            source: Some(source),
        }
    }

    /// Returns `true` if the call was rejected before any network I/O.
    #[must_use]
    pub const fn is_pre_fetch(&self) -> bool {
        matches!(self, Self::PreFetch { .. })
    }

    /// Returns `true` if the call failed after a network attempt.
    #[must_use]
    pub const fn is_post_fetch(&self) -> bool {
        matches!(self, Self::PostFetch { .. })
    }

    /// Returns the attached response, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match self {
            Self::PostFetch { response, .. } => response.as_ref(),
            Self::PreFetch { .. } => None,
        }
    }

    /// Returns the status code of the attached response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }

    /// Returns `true` if this is a server error (5xx response).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| (500..600).contains(&status))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PreFetch { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            Self::PostFetch { source, .. } => source
                .as_deref()
                .map(|source| source as &(dyn std::error::Error + 'static)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::error::Error as _;

    use assert2::{check, let_assert};
    use bytes::Bytes;

    use super::*;
    use crate::Method;

    fn response(status: u16) -> Response {
        Response::new(status, HashMap::new(), Bytes::new())
    }

    fn request() -> Request {
        let url = url::Url::parse("https://api.example.com/articles").expect("valid URL");
        Request::builder(Method::Get, url).build()
    }

    #[test]
    fn pre_fetch_display_and_source() {
        let hook_error: BoxError = "rejected".into();
        let err = Error::pre_fetch(request(), hook_error);

        check!(
            err.to_string()
                == "beforeFetch failed; review middleware stack (GET https://api.example.com/articles)"
        );
        check!(err.is_pre_fetch());
        check!(!err.is_post_fetch());
        check!(err.response().is_none());
        check!(err.source().expect("source").to_string() == "rejected");
    }

    #[test]
    fn transport_error_has_no_response() {
        let err = Error::transport(TransportError::connection("dns lookup failed"));

        check!(err.is_post_fetch());
        check!(err.response().is_none());
        check!(err.to_string() == "connection error: dns lookup failed");
        check!(err.source().is_some());
    }

    #[test]
    fn invalid_json_message_prefix() {
        let parse_error =
            serde_json::from_slice::<serde_json::Value>(b"<html>").expect_err("not json");
        let err = Error::invalid_json(response(200), parse_error);

        check!(err.to_string().starts_with("invalid json:"));
        check!(err.status() == Some(200));
    }

    #[test]
    fn classification_messages() {
        check!(Error::server_error(response(500)).to_string() == "Server Error");
        check!(Error::record_not_found(response(404)).to_string() == "record not found");
        check!(Error::missing_data(response(200)).to_string() == "invalid json");
        check!(
            Error::after_fetch(response(200), "hook failed".into()).to_string()
                == "afterFetch failed; review middleware stack"
        );
    }

    #[test]
    fn status_predicates() {
        check!(Error::server_error(response(503)).is_server_error());
        check!(!Error::server_error(response(503)).is_not_found());
        check!(Error::record_not_found(response(404)).is_not_found());
        check!(!Error::transport(TransportError::Timeout).is_server_error());
    }

    #[test]
    fn post_fetch_carries_response() {
        let err = Error::record_not_found(response(404));

        let_assert!(Error::PostFetch { response, .. } = &err);
        check!(response.as_ref().expect("response").status() == 404);
    }
}
