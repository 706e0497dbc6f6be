use std::sync::{Arc, Mutex};

use http::StatusCode;
use routebook::{
    register, with_error_handling, BoxError, Handler, Method, Next, RegistrationOptions,
    Request, Response, RouteDescriptor, Router,
};

type Trail = Arc<Mutex<Vec<&'static str>>>;

/// A pass-through middleware that records its name.
fn mark(trail: &Trail, name: &'static str) -> impl Handler<(Request, Next)> + Clone + use<> {
    let trail = Arc::clone(trail);
    move |req: Request, next: Next| {
        let trail = Arc::clone(&trail);
        async move {
            trail.lock().unwrap().push(name);
            next.run(req).await
        }
    }
}

fn endpoint(trail: &Trail, body: &'static str) -> impl Handler<(Request,)> + use<> {
    let trail = Arc::clone(trail);
    move |_req: Request| {
        let trail = Arc::clone(&trail);
        async move {
            trail.lock().unwrap().push("handler");
            body
        }
    }
}

#[derive(Debug)]
struct Failed(&'static str);

impl std::fmt::Display for Failed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Failed {}

#[tokio::test]
async fn registers_a_get_route_and_responds() {
    async fn hello(_req: Request) -> Response {
        Response::json(br#"{"msg":"hi"}"#.to_vec())
    }

    let api = register(
        Router::new(),
        [RouteDescriptor::new("get".parse().unwrap(), "/hello", hello)],
        &RegistrationOptions::default(),
    )
    .unwrap();
    let app = Router::new().nest("/api", api).unwrap();

    let res = app.handle(Request::new(Method::Get, "/api/hello")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body(), br#"{"msg":"hi"}"#);
}

#[tokio::test]
async fn middleware_runs_in_fixed_order() {
    let trail = Trail::default();
    let options = RegistrationOptions::new()
        .global(mark(&trail, "cors"))
        .global(mark(&trail, "body"))
        .auth(mark(&trail, "auth"));
    let route = RouteDescriptor::get("/check", endpoint(&trail, "ok"))
        .middleware(mark(&trail, "route-a"))
        .middleware(mark(&trail, "route-b"));

    let router = register(Router::new(), [route], &options).unwrap();
    let res = router.handle(Request::new(Method::Get, "/check")).await;

    assert_eq!(res.body(), b"ok");
    assert_eq!(
        *trail.lock().unwrap(),
        ["cors", "body", "auth", "route-a", "route-b", "handler"],
    );
}

#[tokio::test]
async fn auth_can_short_circuit_the_chain() {
    async fn deny_without_token(req: Request, next: Next) -> Response {
        match req.header("authorization") {
            Some("Bearer ok") => next.run(req).await,
            _ => Response::status(StatusCode::UNAUTHORIZED),
        }
    }

    let trail = Trail::default();
    let options = RegistrationOptions::new()
        .global(mark(&trail, "global"))
        .auth(deny_without_token);
    let route = RouteDescriptor::delete("/users/{id}", endpoint(&trail, "deleted"))
        .middleware(mark(&trail, "route"));
    let router = register(Router::new(), [route], &options).unwrap();

    let denied = router.handle(Request::new(Method::Delete, "/users/7")).await;
    assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(*trail.lock().unwrap(), ["global"]);

    trail.lock().unwrap().clear();
    let allowed = router
        .handle(Request::new(Method::Delete, "/users/7").with_header("Authorization", "Bearer ok"))
        .await;
    assert_eq!(allowed.body(), b"deleted");
    assert_eq!(*trail.lock().unwrap(), ["global", "route", "handler"]);
}

#[tokio::test]
async fn middleware_can_pass_data_to_the_handler() {
    #[derive(Clone)]
    struct User(&'static str);

    async fn load_user(mut req: Request, next: Next) -> Response {
        req.extensions_mut().insert(User("alice"));
        next.run(req).await
    }

    async fn whoami(req: Request) -> String {
        req.extensions().get::<User>().map(|u| u.0).unwrap_or("nobody").to_owned()
    }

    let router = register(
        Router::new(),
        [RouteDescriptor::get("/me", whoami)],
        &RegistrationOptions::new().auth(load_user),
    )
    .unwrap();

    let res = router.handle(Request::new(Method::Get, "/me")).await;
    assert_eq!(res.body(), b"alice");
}

#[tokio::test]
async fn handler_errors_reach_the_error_stage() {
    async fn explode(_req: Request) -> Result<Response, Failed> {
        Err(Failed("database unavailable"))
    }

    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let router = register(
        Router::new(),
        [RouteDescriptor::put("/items/{id}", with_error_handling(explode))],
        &RegistrationOptions::new(),
    )
    .unwrap()
    .on_error({
        let seen = Arc::clone(&seen);
        move |err: BoxError| {
            seen.lock().unwrap().push(err.to_string());
            Response::builder()
                .status(StatusCode::SERVICE_UNAVAILABLE)
                .text("try again later")
        }
    });

    let res = router.handle(Request::new(Method::Put, "/items/1")).await;

    assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body(), b"try again later");
    assert_eq!(*seen.lock().unwrap(), ["database unavailable"]);
}

#[tokio::test]
async fn default_error_stage_answers_500() {
    let failing = |_req: Request| async { Err::<&'static str, _>(Failed("boom")) };
    let router = register(
        Router::new(),
        [RouteDescriptor::patch("/x", with_error_handling(failing))],
        &RegistrationOptions::new(),
    )
    .unwrap();

    let res = router.handle(Request::new(Method::Patch, "/x")).await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn duplicate_routes_are_both_applied() {
    let trail = Trail::default();
    let first = RouteDescriptor::get("/dup", endpoint(&trail, "one"));
    let second = RouteDescriptor::get("/dup", endpoint(&trail, "two"));

    let router = register(Router::new(), [first, second], &RegistrationOptions::new()).unwrap();

    assert_eq!(router.chain(Method::Get, "/dup").map(<[_]>::len), Some(2));
    let res = router.handle(Request::new(Method::Get, "/dup")).await;
    assert_eq!(res.body(), b"one");
}

#[tokio::test]
async fn duplicate_falls_through_when_first_chain_passes() {
    async fn skip(req: Request, next: Next) -> Response {
        next.run(req).await
    }
    async fn second(_req: Request) -> &'static str { "second" }

    let router = register(
        Router::new(),
        [RouteDescriptor::post("/dup", skip), RouteDescriptor::post("/dup", second)],
        &RegistrationOptions::new(),
    )
    .unwrap();

    let res = router.handle(Request::new(Method::Post, "/dup")).await;
    assert_eq!(res.body(), b"second");
}

#[tokio::test]
async fn registering_through_a_borrow_keeps_the_router() {
    async fn ping(_req: Request) -> &'static str { "pong" }

    let mut router = Router::new();
    register(&mut router, [RouteDescriptor::get("/ping", ping)], &RegistrationOptions::new())
        .unwrap();
    register(&mut router, [RouteDescriptor::get("/ping", ping)], &RegistrationOptions::new())
        .unwrap();

    assert_eq!(router.chain(Method::Get, "/ping").map(<[_]>::len), Some(2));
    let res = router.handle(Request::new(Method::Get, "/ping")).await;
    assert_eq!(res.body(), b"pong");
}
