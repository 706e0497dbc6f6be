//! Bulk route registration.
//!
//! [`register`] turns a list of [`RouteDescriptor`]s into router entries.
//! Every chain it installs has the same shape:
//!
//! ```text
//! global middleware ── auth middleware? ── route middleware ── handler
//! ```
//!
//! Global policy (tracing, CORS, body checks) runs before authentication,
//! which runs before route-specific checks, which run before the handler.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::route::RouteDescriptor;
use crate::router::RouteTarget;

/// Chain-wide settings for one [`register`] call.
#[derive(Clone, Default)]
pub struct RegistrationOptions {
    auth_middleware: Option<BoxedHandler>,
    global_middlewares: Vec<BoxedHandler>,
    log_routes: bool,
}

impl RegistrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware that runs first on every route.
    pub fn global<T>(mut self, middleware: impl Handler<T>) -> Self {
        self.global_middlewares.push(middleware.into_boxed_handler());
        self
    }

    /// Sets the middleware placed between the global and the route middleware.
    pub fn auth<T>(mut self, middleware: impl Handler<T>) -> Self {
        self.auth_middleware = Some(middleware.into_boxed_handler());
        self
    }

    /// Emits one `info` line per route (plus its description) while registering.
    pub fn log_routes(mut self, enabled: bool) -> Self {
        self.log_routes = enabled;
        self
    }
}

/// Registers every descriptor on `router`, in order, and hands the router back.
///
/// A method + path seen twice within this call is logged as a warning and
/// registered anyway; what happens to the second chain is up to the router.
/// Duplicates across separate calls are not tracked.
///
/// Errors from the router (e.g. a malformed path pattern) stop registration
/// and are returned as-is.
///
/// ```rust
/// use routebook::{register, RegistrationOptions, Request, RouteDescriptor, Router};
///
/// async fn hello(_req: Request) -> &'static str { "hi" }
///
/// let router = register(
///     Router::new(),
///     [RouteDescriptor::get("/hello", hello)],
///     &RegistrationOptions::new().log_routes(true),
/// )?;
/// # Ok::<(), routebook::Error>(())
/// ```
pub fn register<R: RouteTarget>(
    mut router: R,
    routes: impl IntoIterator<Item = RouteDescriptor>,
    options: &RegistrationOptions,
) -> Result<R, Error> {
    let mut registered = HashSet::new();

    for route in routes {
        let RouteDescriptor { method, path, handler, middlewares, description } = route;

        let key = format!("{method} {path}");
        if registered.contains(&key) {
            warn!("⚠️ Duplicate route detected: {key}");
        } else {
            registered.insert(key);
        }

        let chain: Vec<BoxedHandler> = options.global_middlewares.iter()
            .chain(&options.auth_middleware)
            .cloned()
            .chain(middlewares)
            .chain([handler])
            .collect();

        if options.log_routes {
            info!("✅ [{method}] {path}");
            if let Some(description) = description.filter(|d| !d.is_empty()) {
                info!("   ↳ {description}");
            }
        }

        match method {
            Method::Get    => router.get(&path, chain)?,
            Method::Post   => router.post(&path, chain)?,
            Method::Put    => router.put(&path, chain)?,
            Method::Delete => router.delete(&path, chain)?,
            Method::Patch  => router.patch(&path, chain)?,
        }
    }

    Ok(router)
}
