//! Core types for the chela JSON:API request pipeline.
//!
//! This crate provides the foundational types used by chela:
//! - [`Method`] - HTTP method enum
//! - [`Request`], [`RequestBuilder`], and [`RequestOptions`] - HTTP request types
//! - [`Response`] and [`DecoratedResponse`] - HTTP response types
//! - [`Error`] and [`Result`] - the two-kind error taxonomy
//! - [`Transport`] - the network boundary trait with [`TransportError`]
//! - [`to_json`] / [`from_json`] - body serialization helpers

mod body;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{ContentType, DecodeError, from_json, to_json};
pub use error::{BoxError, Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder, RequestOptions};
pub use response::{DecoratedResponse, Response};
pub use transport::{Transport, TransportError, TransportResult};
