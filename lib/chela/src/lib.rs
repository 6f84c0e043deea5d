//! JSON:API client request pipeline.
//!
//! chela issues GET/POST/PATCH/DELETE calls against a JSON:API endpoint,
//! runs pluggable pre/post-fetch middleware hooks, classifies HTTP and
//! payload-level outcomes into a two-kind error taxonomy, and logs
//! request/response pairs through `tracing`.
//!
//! # Example
//!
//! ```ignore
//! use chela::{HyperTransport, MiddlewareStack, RequestOptions, RequestPipeline};
//!
//! let middleware = MiddlewareStack::new()
//!     .with_before_fetch(|request| {
//!         tracing::debug!(url = %request.url(), "about to call");
//!         Ok(())
//!     });
//!
//! let pipeline = RequestPipeline::new(HyperTransport::new()).with_middleware(middleware);
//!
//! let url = "https://api.example.com/articles".parse()?;
//! match pipeline.get(url, RequestOptions::new()).await {
//!     Ok(response) => println!("{:?}", response.document()),
//!     Err(err) if err.is_not_found() => println!("no such article"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod config;
mod connector;
mod middleware;
mod pipeline;
pub mod prelude;
mod transport;

pub use config::{TransportConfig, TransportConfigBuilder};
pub use middleware::{AfterFetchHook, BeforeFetchHook, MiddlewareStack};
pub use pipeline::RequestPipeline;
pub use transport::HyperTransport;

// Re-export core types
pub use chela_core::{
    BoxError, ContentType, DecodeError, DecoratedResponse, Error, Method, Request, RequestBuilder,
    RequestOptions, Response, Result, Transport, TransportError, TransportResult, from_json,
    to_json,
};
