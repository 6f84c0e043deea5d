//! Request middleware hooks.
//!
//! A [`MiddlewareStack`] holds two ordered lists of synchronous hooks invoked
//! around the network call:
//!
//! - `before_fetch` hooks see the built request and may reject the call
//!   before any I/O happens.
//! - `after_fetch` hooks see the raw response together with its parsed
//!   payload and may reject the call during classification.
//!
//! Hooks inspect or reject; they do not rewrite the in-flight request. The
//! seam is deliberately synchronous: a hook cannot suspend, so an async
//! failure path simply cannot be expressed through it.
//!
//! # Example
//!
//! ```
//! use chela::MiddlewareStack;
//!
//! let middleware = MiddlewareStack::new()
//!     .with_before_fetch(|request| {
//!         if request.url().scheme() == "https" {
//!             Ok(())
//!         } else {
//!             Err("refusing plaintext call".into())
//!         }
//!     })
//!     .with_after_fetch(|_response, document| {
//!         match document.get("meta") {
//!             Some(_) => Ok(()),
//!             None => Err("expected a meta member".into()),
//!         }
//!     });
//! ```

use serde_json::Value;

use crate::{BoxError, Request, Response};

/// Hook invoked before the transport call.
pub type BeforeFetchHook = dyn Fn(&Request) -> Result<(), BoxError> + Send + Sync;

/// Hook invoked after the response body has been parsed.
pub type AfterFetchHook = dyn Fn(&Response, &Value) -> Result<(), BoxError> + Send + Sync;

/// Ordered collection of pre/post-fetch hooks.
///
/// The pipeline shares a stack across calls and never mutates it; hooks run
/// in registration order and the first error aborts the in-flight call.
#[derive(Default)]
pub struct MiddlewareStack {
    before_fetch: Vec<Box<BeforeFetchHook>>,
    after_fetch: Vec<Box<AfterFetchHook>>,
}

impl std::fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareStack")
            .field("before_fetch", &self.before_fetch.len())
            .field("after_fetch", &self.after_fetch.len())
            .finish()
    }
}

impl MiddlewareStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook to run before the transport call.
    #[must_use]
    pub fn with_before_fetch(
        mut self,
        hook: impl Fn(&Request) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.before_fetch.push(Box::new(hook));
        self
    }

    /// Registers a hook to run after the response payload is parsed.
    #[must_use]
    pub fn with_after_fetch(
        mut self,
        hook: impl Fn(&Response, &Value) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.after_fetch.push(Box::new(hook));
        self
    }

    /// Runs the `before_fetch` hooks in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first hook error; later hooks are not invoked.
    pub fn before_fetch(&self, request: &Request) -> Result<(), BoxError> {
        for hook in &self.before_fetch {
            hook(request)?;
        }
        Ok(())
    }

    /// Runs the `after_fetch` hooks in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first hook error; later hooks are not invoked.
    pub fn after_fetch(&self, response: &Response, document: &Value) -> Result<(), BoxError> {
        for hook in &self.after_fetch {
            hook(response, document)?;
        }
        Ok(())
    }
}
