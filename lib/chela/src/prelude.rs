//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and
//! macros for easy glob importing:
//!
//! ```ignore
//! use chela::prelude::*;
//! ```

pub use crate::{
    ContentType, DecoratedResponse, Error, HyperTransport, Method, MiddlewareStack, Request,
    RequestBuilder, RequestOptions, RequestPipeline, Response, Result, Transport, TransportConfig,
    TransportError, from_json, to_json,
};
pub use serde::{Deserialize, Serialize};
