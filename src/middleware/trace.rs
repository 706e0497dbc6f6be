use std::time::Instant;

use tracing::info;

use super::Next;
use crate::handler::Handler;
use crate::request::Request;

/// Logs one `info` event per request once the rest of the chain has answered.
///
/// Put it first in the global middleware so the latency covers auth and
/// route middleware too.
pub fn trace() -> impl Handler<(Request, Next)> + Clone {
    |req: Request, next: Next| async move {
        let method = req.method();
        let path = req.path().to_owned();
        let started = Instant::now();

        let res = next.run(req).await;

        info!(
            %method,
            path = %path,
            status = res.status_code().as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request",
        );
        res
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::{register, Method, RegistrationOptions, RouteDescriptor, Router};

    #[tokio::test]
    async fn passes_the_response_through() {
        async fn created(_req: Request) -> StatusCode { StatusCode::CREATED }

        let router = register(
            Router::new(),
            [RouteDescriptor::post("/things", created)],
            &RegistrationOptions::new().global(trace()),
        )
        .unwrap();

        let res = router.handle(Request::new(Method::Post, "/things")).await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
    }
}
