//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Each registered pattern
//! owns a handler chain rather than a single handler; registering the same
//! method + pattern again appends to that chain, so the earlier registration
//! answers first and the later one is reached only if it calls `next.run`.

use std::collections::HashMap;
use std::sync::Arc;

use http::StatusCode;
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::error::{BoxError, Error};
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::middleware::{ErrorHandler, Next};
use crate::request::Request;
use crate::response::Response;

// ── RouteTarget ───────────────────────────────────────────────────────────────

/// Anything [`register`](crate::register) can install routes on.
///
/// One registration method per routable [`Method`], each taking a path
/// pattern and the full ordered chain. Implemented by [`Router`] and by
/// `&mut T` so a router can be handed over by value or borrowed.
pub trait RouteTarget {
    fn get(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error>;
    fn post(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error>;
    fn put(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error>;
    fn delete(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error>;
    fn patch(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error>;
}

impl<T: RouteTarget + ?Sized> RouteTarget for &mut T {
    fn get(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        (**self).get(path, chain)
    }
    fn post(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        (**self).post(path, chain)
    }
    fn put(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        (**self).put(path, chain)
    }
    fn delete(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        (**self).delete(path, chain)
    }
    fn patch(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        (**self).patch(path, chain)
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

struct Route {
    method: Method,
    pattern: String,
    chain: Arc<[BoxedHandler]>,
}

/// The application router.
///
/// Build it once at startup, usually through [`register`](crate::register),
/// then pass it to [`Server::serve`](crate::Server::serve) or nest it under a
/// prefix in a parent router.
pub struct Router {
    trees: HashMap<Method, MatchitRouter<usize>>,
    routes: Vec<Route>,
    on_error: ErrorHandler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            routes: Vec::new(),
            on_error: Arc::new(default_error_handler),
        }
    }

    /// Registers `chain` for `method` + `path`.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves
    /// them. A repeated method + path appends to the existing chain.
    pub fn route(&mut self, method: Method, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        if let Some(route) = self.routes.iter_mut().find(|r| r.method == method && r.pattern == path) {
            route.chain = route.chain.iter().cloned().chain(chain).collect();
            return Ok(());
        }

        self.trees
            .entry(method)
            .or_default()
            .insert(path, self.routes.len())
            .map_err(|source| Error::Route { path: path.to_owned(), source })?;
        self.routes.push(Route {
            method,
            pattern: path.to_owned(),
            chain: chain.into(),
        });
        Ok(())
    }

    /// The chain stored for an exact registered pattern.
    pub fn chain(&self, method: Method, path: &str) -> Option<&[BoxedHandler]> {
        self.routes.iter()
            .find(|r| r.method == method && r.pattern == path)
            .map(|r| &*r.chain)
    }

    /// Installs the error stage that [`Next::fail`] hands errors to.
    ///
    /// The default logs the error and answers `500 Internal Server Error`.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(BoxError) -> Response + Send + Sync + 'static,
    {
        self.on_error = Arc::new(handler);
        self
    }

    /// Re-registers every route of `other` under `prefix`, in its original
    /// order. `other`'s error stage is dropped in favour of this router's.
    pub fn nest(mut self, prefix: &str, other: Router) -> Result<Self, Error> {
        let prefix = prefix.trim_end_matches('/');
        for route in other.routes {
            let path = match route.pattern.as_str() {
                "/" | "" if !prefix.is_empty() => prefix.to_owned(),
                pattern => format!("{prefix}{pattern}"),
            };
            self.route(route.method, &path, route.chain.to_vec())?;
        }
        Ok(self)
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, mut req: Request) -> Response {
        let Some((chain, params)) = self.lookup(req.method, &req.path) else {
            return Response::status(StatusCode::NOT_FOUND);
        };
        req.params = params;
        Next::new(chain, Arc::clone(&self.on_error)).run(req).await
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(Arc<[BoxedHandler]>, HashMap<String, String>)> {
        let tree = self.trees.get(&method)?;
        let matched = tree.at(path).ok()?;
        let chain = Arc::clone(&self.routes[*matched.value].chain);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((chain, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl RouteTarget for Router {
    fn get(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        self.route(Method::Get, path, chain)
    }
    fn post(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        self.route(Method::Post, path, chain)
    }
    fn put(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        self.route(Method::Put, path, chain)
    }
    fn delete(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        self.route(Method::Delete, path, chain)
    }
    fn patch(&mut self, path: &str, chain: Vec<BoxedHandler>) -> Result<(), Error> {
        self.route(Method::Patch, path, chain)
    }
}

fn default_error_handler(err: BoxError) -> Response {
    error!(error = %err, "unhandled error in request chain");
    Response::status(StatusCode::INTERNAL_SERVER_ERROR)
}
