//! Handler trait and type erasure.
//!
//! # How chain elements are stored
//!
//! A route is an ordered chain of handlers: global middleware, an optional
//! auth check, route middleware, and finally the endpoint. They all have
//! *different* concrete types, so the router stores them as trait objects
//! (`dyn ErasedHandler`) behind a common interface.
//!
//! Two function shapes are accepted:
//!
//! ```text
//! async fn endpoint(req: Request) -> impl IntoResponse               ← ignores `next`
//! async fn middleware(req: Request, next: Next) -> impl IntoResponse ← may advance
//! ```
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! RouteDescriptor::get("/", hello)
//!        ↓
//! hello.into_boxed_handler()                 ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(hello))                 ← stored as BoxedHandler
//!        ↓
//! handler.call(req, next)  at request time   ← one vtable dispatch
//! ```
//!
//! The boxed form is an `Arc`, so one global middleware is allocated once and
//! shared by every chain it is inserted into.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::middleware::Next;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in
/// [`BoxedHandler`], which callers hold when building chains.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

/// A heap-allocated, type-erased chain element shared across routes and
/// concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid chain element.
///
/// You never implement this yourself. It is satisfied by:
///
/// - `Fn(Request) -> impl Future<Output = impl IntoResponse>`, an endpoint
///   (`T = (Request,)`);
/// - `Fn(Request, Next) -> impl Future<Output = impl IntoResponse>`, a
///   middleware (`T = (Request, Next)`);
/// - an already boxed [`BoxedHandler`] (`T = ()`).
///
/// The type parameter only tells the shapes apart and is always inferred.
/// A handler returning `Result<_, _>` is not accepted directly; wrap it with
/// [`with_error_handling`](crate::with_error_handling) so failures reach the
/// router's error stage.
pub trait Handler<T>: private::Sealed<T> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed<T> {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed<(Request,)> for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler<(Request,)> for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

impl<F, Fut, R> private::Sealed<(Request, Next)> for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler<(Request, Next)> for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnMiddleware(self))
    }
}

impl private::Sealed<()> for BoxedHandler {}

impl Handler<()> for BoxedHandler {
    fn into_boxed_handler(self) -> BoxedHandler {
        self
    }
}

// ── Concrete wrappers ─────────────────────────────────────────────────────────

/// An endpoint: answers the request and never advances the chain.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, _next: Next) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// A middleware: receives the continuation and decides what to do with it.
struct FnMiddleware<F>(F);

impl<F, Fut, R> ErasedHandler for FnMiddleware<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let fut = (self.0)(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}
