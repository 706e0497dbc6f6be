//! Middleware layer.
//!
//! Middleware is any `async fn(Request, Next) -> impl IntoResponse`. It sees
//! the request before the endpoint does and picks one of three outcomes:
//!
//! - answer directly (an auth check rejecting a request),
//! - call [`Next::run`] to hand the request to the rest of the chain,
//! - call [`Next::fail`] to route an error to the router's error stage.
//!
//! ```rust
//! use http::StatusCode;
//! use routebook::{Next, Request, Response};
//!
//! async fn require_token(req: Request, next: Next) -> Response {
//!     match req.header("authorization") {
//!         Some(_) => next.run(req).await,
//!         None => Response::status(StatusCode::UNAUTHORIZED),
//!     }
//! }
//! ```
//!
//! Built-in middleware:
//! - [`trace()`] — per-request log line with method, path, status, latency

mod trace;

use std::sync::Arc;

use http::StatusCode;

use crate::error::BoxError;
use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::Response;

pub use trace::trace;

/// The router's error stage: turns a forwarded error into a response.
pub(crate) type ErrorHandler = Arc<dyn Fn(BoxError) -> Response + Send + Sync + 'static>;

/// The continuation handed to every element of a chain.
///
/// `Next` is consumed by whichever method is called, so a middleware can
/// advance the chain or forward an error, but never both and never twice.
/// Dropping it unused ends the chain with the response already produced.
pub struct Next {
    chain: Arc<[BoxedHandler]>,
    index: usize,
    on_error: ErrorHandler,
}

impl Next {
    pub(crate) fn new(chain: Arc<[BoxedHandler]>, on_error: ErrorHandler) -> Self {
        Self { chain, index: 0, on_error }
    }

    /// Runs the rest of the chain. Past the last element the request falls
    /// through to `404 Not Found`.
    pub async fn run(self, req: Request) -> Response {
        let Some(handler) = self.chain.get(self.index).cloned() else {
            return Response::status(StatusCode::NOT_FOUND);
        };
        let next = Self {
            chain: self.chain,
            index: self.index + 1,
            on_error: self.on_error,
        };
        handler.call(req, next).await
    }

    /// Hands `err` to the error stage and returns its response.
    pub fn fail(self, err: impl Into<BoxError>) -> Response {
        (self.on_error)(err.into())
    }
}
