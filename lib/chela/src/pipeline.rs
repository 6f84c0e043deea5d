//! The JSON:API request pipeline.
//!
//! [`RequestPipeline`] orchestrates one logical HTTP call end-to-end: it
//! builds the request from a verb, URL, and caller options, logs the
//! outbound call, runs the `before_fetch` hooks, drives the transport, runs
//! the `after_fetch` hooks, classifies the outcome, and returns a
//! [`DecoratedResponse`] or one of the two [`Error`] kinds.
//!
//! # Example
//!
//! ```ignore
//! use chela::{HyperTransport, RequestPipeline, RequestOptions};
//!
//! let pipeline = RequestPipeline::new(HyperTransport::new());
//! let url = "https://api.example.com/articles/1".parse()?;
//! let response = pipeline.get(url, RequestOptions::new()).await?;
//! let document = response.document();
//! ```

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::middleware::MiddlewareStack;
use crate::{
    ContentType, DecoratedResponse, Error, Method, Request, RequestOptions, Response, Result,
    Transport, to_json,
};

/// Response statuses at which a DELETE needs no JSON:API body.
const DELETE_NO_BODY_STATUSES: [u16; 3] = [200, 202, 204];

/// Client-side request pipeline for a JSON:API endpoint.
///
/// Concurrent calls are fully independent; the only shared state is the
/// middleware stack behind an [`Arc`], which the pipeline treats as
/// read-only.
#[derive(Debug, Clone)]
pub struct RequestPipeline<T> {
    transport: T,
    middleware: Arc<MiddlewareStack>,
}

impl<T: Transport> RequestPipeline<T> {
    /// Creates a pipeline with no middleware.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            middleware: Arc::default(),
        }
    }

    /// Replaces the middleware stack.
    #[must_use]
    pub fn with_middleware(mut self, middleware: MiddlewareStack) -> Self {
        self.middleware = Arc::new(middleware);
        self
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreFetch`] if a `before_fetch` hook rejects the call,
    /// [`Error::PostFetch`] for any failure after the network attempt.
    pub async fn get(&self, url: Url, options: RequestOptions) -> Result<DecoratedResponse> {
        let request = Self::build_request(Method::Get, url, options, None);
        self.dispatch(request).await
    }

    /// Issue a DELETE request.
    ///
    /// A response status of 200, 202, or 204 succeeds without a body parse;
    /// DELETE responses at these statuses are not required to carry a
    /// JSON:API payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreFetch`] if a `before_fetch` hook rejects the call,
    /// [`Error::PostFetch`] for any failure after the network attempt.
    pub async fn delete(&self, url: Url, options: RequestOptions) -> Result<DecoratedResponse> {
        let request = Self::build_request(Method::Delete, url, options, None);
        self.dispatch(request).await
    }

    /// Issue a POST request carrying an outgoing JSON:API document.
    ///
    /// The document is serialized as the request body; its shape is not
    /// validated here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreFetch`] if serialization fails or a
    /// `before_fetch` hook rejects the call, [`Error::PostFetch`] for any
    /// failure after the network attempt.
    pub async fn post<D: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        document: &D,
        options: RequestOptions,
    ) -> Result<DecoratedResponse> {
        self.send_document(Method::Post, url, document, options)
            .await
    }

    /// Issue a PATCH request carrying an outgoing JSON:API document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreFetch`] if serialization fails or a
    /// `before_fetch` hook rejects the call, [`Error::PostFetch`] for any
    /// failure after the network attempt.
    pub async fn patch<D: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        document: &D,
        options: RequestOptions,
    ) -> Result<DecoratedResponse> {
        self.send_document(Method::Patch, url, document, options)
            .await
    }

    async fn send_document<D: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        document: &D,
        options: RequestOptions,
    ) -> Result<DecoratedResponse> {
        match to_json(document) {
            Ok(body) => {
                let request = Self::build_request(method, url, options, Some(body));
                self.dispatch(request).await
            }
            Err(err) => {
                // Construction failed before any I/O: classify pre-fetch,
                // attaching the request as it would have been sent sans body.
                let request = Self::build_request(method, url, options, None);
                Err(Error::pre_fetch(request, err))
            }
        }
    }

    /// Default JSON:API headers first, then the caller's template, so the
    /// template can override them.
    fn build_request(
        method: Method,
        url: Url,
        options: RequestOptions,
        body: Option<Bytes>,
    ) -> Request {
        let mut builder =
            Request::builder(method, url).header("Accept", ContentType::JsonApi.as_str());
        if body.is_some() {
            builder = builder.header("Content-Type", ContentType::JsonApi.as_str());
        }
        builder = builder.headers(options.into_headers());
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.build()
    }

    async fn dispatch(&self, request: Request) -> Result<DecoratedResponse> {
        info!(method = %request.method(), url = %request.url(), "sending request");

        let decorated = self.fetch(request).await?;

        if let Some(document) = decorated.document() {
            let payload = serde_json::to_string_pretty(document).unwrap_or_default();
            debug!(status = decorated.status(), payload = %payload, "response payload");
        } else {
            debug!(status = decorated.status(), "response without payload");
        }

        Ok(decorated)
    }

    async fn fetch(&self, request: Request) -> Result<DecoratedResponse> {
        if let Err(err) = self.middleware.before_fetch(&request) {
            return Err(Error::pre_fetch(request, err));
        }

        let method = request.method();
        let response = self
            .transport
            .call(request)
            .await
            .map_err(Error::transport)?;

        self.classify(method, response)
    }

    /// Classification runs in a fixed order: the DELETE short-circuit before
    /// any body parse, the server-error check before the data-presence
    /// check.
    fn classify(&self, method: Method, response: Response) -> Result<DecoratedResponse> {
        if method == Method::Delete && DELETE_NO_BODY_STATUSES.contains(&response.status()) {
            return Ok(DecoratedResponse::new(response, None));
        }

        let document: Value = match serde_json::from_slice(response.body()) {
            Ok(document) => document,
            Err(err) => {
                debug!(body = %response.text_lossy(), "response body is not valid JSON");
                return Err(Error::invalid_json(response, err));
            }
        };

        if let Err(err) = self.middleware.after_fetch(&response, &document) {
            return Err(Error::after_fetch(response, err));
        }

        let status = response.status();
        if status >= 500 {
            return Err(Error::server_error(response));
        }
        if status == 404 {
            return Err(Error::record_not_found(response));
        }
        // 422 carries structured validation errors and bypasses the
        // data-presence check.
        if status != 422 && document.get("data").is_none() {
            debug!(body = %response.text_lossy(), "response body lacks a top-level `data` member");
            return Err(Error::missing_data(response));
        }

        Ok(DecoratedResponse::new(response, Some(document)))
    }
}
