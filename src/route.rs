//! Declarative route descriptors.

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// One route to register: method, path pattern, endpoint, and the route's
/// own middleware.
///
/// ```rust
/// use routebook::{Request, RouteDescriptor};
///
/// async fn list_users(_req: Request) -> &'static str { "[]" }
///
/// let route = RouteDescriptor::get("/users", list_users)
///     .describe("List every user");
/// ```
pub struct RouteDescriptor {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) handler: BoxedHandler,
    pub(crate) middlewares: Vec<BoxedHandler>,
    pub(crate) description: Option<String>,
}

impl RouteDescriptor {
    pub fn new<T>(method: Method, path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self {
            method,
            path: path.into(),
            handler: handler.into_boxed_handler(),
            middlewares: Vec::new(),
            description: None,
        }
    }

    pub fn get<T>(path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self::new(Method::Get, path, handler)
    }

    pub fn post<T>(path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self::new(Method::Post, path, handler)
    }

    pub fn put<T>(path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self::new(Method::Put, path, handler)
    }

    pub fn delete<T>(path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self::new(Method::Delete, path, handler)
    }

    pub fn patch<T>(path: impl Into<String>, handler: impl Handler<T>) -> Self {
        Self::new(Method::Patch, path, handler)
    }

    /// Appends a route-specific middleware. Runs after global and auth
    /// middleware, in the order added.
    pub fn middleware<T>(mut self, middleware: impl Handler<T>) -> Self {
        self.middlewares.push(middleware.into_boxed_handler());
        self
    }

    /// Advisory text, printed under the route when registration logging is on.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
}
