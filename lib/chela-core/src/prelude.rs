//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use chela_core::prelude::*;
//! ```

pub use crate::{
    ContentType, DecoratedResponse, Error, Method, Request, RequestBuilder, RequestOptions,
    Response, Result, Transport, TransportError, from_json, to_json,
};
