//! Minimal routebook example: a user API registered from descriptors.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/api/users/42 -H 'authorization: Bearer demo'
//!   curl http://localhost:3000/api/users/0  -H 'authorization: Bearer demo'   # forwarded error → 500
//!   curl -X POST http://localhost:3000/api/users -H 'authorization: Bearer demo' -d '{"name":"alice"}'
//!   curl http://localhost:3000/api/users/42                                   # 401

use http::StatusCode;
use routebook::{
    middleware, register, with_error_handling, BoxError, Next, RegistrationOptions, Request,
    Response, RouteDescriptor, Router, Server,
};

#[tokio::main]
async fn main() -> Result<(), routebook::Error> {
    tracing_subscriber::fmt::init();

    let routes = [
        RouteDescriptor::get("/users/{id}", with_error_handling(get_user))
            .describe("Fetch one user by id"),
        RouteDescriptor::post("/users", create_user)
            .middleware(require_body)
            .describe("Create a user"),
        RouteDescriptor::delete("/users/{id}", delete_user),
    ];
    let options = RegistrationOptions::new()
        .global(middleware::trace())
        .auth(require_token)
        .log_routes(true);

    let api = register(Router::new(), routes, &options)?;
    let app = Router::new()
        .nest("/api", api)?
        .on_error(|err: BoxError| {
            tracing::error!(error = %err, "request failed");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .json(br#"{"error":"internal"}"#.to_vec())
        });

    Server::bind("0.0.0.0:3000").serve(app).await
}

async fn require_token(req: Request, next: Next) -> Response {
    match req.header("authorization") {
        Some(v) if v.starts_with("Bearer ") => next.run(req).await,
        _ => Response::status(StatusCode::UNAUTHORIZED),
    }
}

async fn require_body(req: Request, next: Next) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    next.run(req).await
}

// GET /api/users/{id}
async fn get_user(req: Request) -> Result<Response, BoxError> {
    let id: u64 = req.param("id").unwrap_or_default().parse()?;
    if id == 0 {
        return Err("user 0 is reserved".into());
    }
    Ok(Response::json(format!(r#"{{"id":{id},"name":"alice"}}"#).into_bytes()))
}

// POST /api/users
async fn create_user(_req: Request) -> Response {
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/api/users/99")
        .json(br#"{"id":99,"name":"new_user"}"#.to_vec())
}

// DELETE /api/users/{id} → 204 No Content
async fn delete_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}
