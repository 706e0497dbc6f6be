//! # routebook
//!
//! Declarative route registration for a small hyper-based router.
//!
//! Describe your routes as data, hand them to [`register`] with the
//! middleware every route should share, and get back a router whose chains
//! all have the same, fixed shape:
//!
//! ```text
//! global middleware ── auth middleware? ── route middleware ── handler
//! ```
//!
//! Fallible handlers are wrapped with [`with_error_handling`], which forwards
//! their errors to the router's error stage instead of dropping them.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use routebook::{
//!     middleware, register, with_error_handling, Next, RegistrationOptions, Request,
//!     Response, RouteDescriptor, Router, Server,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), routebook::Error> {
//!     let routes = [
//!         RouteDescriptor::get("/users/{id}", with_error_handling(get_user))
//!             .describe("Fetch one user"),
//!         RouteDescriptor::post("/users", create_user),
//!     ];
//!     let options = RegistrationOptions::new()
//!         .global(middleware::trace())
//!         .auth(require_token)
//!         .log_routes(true);
//!
//!     let api = register(Router::new(), routes, &options)?;
//!     let app = Router::new().nest("/api", api)?;
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! async fn require_token(req: Request, next: Next) -> Response {
//!     match req.header("authorization") {
//!         Some(_) => next.run(req).await,
//!         None => Response::status(StatusCode::UNAUTHORIZED),
//!     }
//! }
//!
//! async fn get_user(req: Request) -> Result<Response, std::io::Error> {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Ok(Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes()))
//! }
//!
//! async fn create_user(_req: Request) -> StatusCode {
//!     StatusCode::CREATED
//! }
//! ```

mod error;
mod error_handling;
mod handler;
mod method;
mod registrar;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod middleware;

pub use error::{BoxError, Error};
pub use error_handling::with_error_handling;
pub use handler::{BoxedHandler, Handler};
pub use method::Method;
pub use middleware::Next;
pub use registrar::{register, RegistrationOptions};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::RouteDescriptor;
pub use router::{RouteTarget, Router};
pub use server::{serve_on, Server};
