//! Bridge from fallible async handlers to the router's error stage.

use std::future::Future;
use std::sync::Arc;

use crate::error::BoxError;
use crate::handler::{BoxFuture, Handler};
use crate::middleware::Next;
use crate::request::Request;
use crate::response::IntoResponse;

/// Wraps a fallible endpoint into a chain element.
///
/// `Ok` values become the response and the continuation goes unused. An
/// `Err` is handed, unchanged, to [`Next::fail`] exactly once, so it reaches
/// the router's [`on_error`](crate::Router::on_error) stage instead of being
/// lost. Panics are not caught.
///
/// ```rust
/// use routebook::{with_error_handling, Request, RouteDescriptor};
///
/// async fn load_user(req: Request) -> Result<String, std::io::Error> {
///     std::fs::read_to_string(format!("/srv/users/{}", req.param("id").unwrap_or("")))
/// }
///
/// let route = RouteDescriptor::get("/users/{id}", with_error_handling(load_user));
/// ```
pub fn with_error_handling<F, Fut, R, E>(handler: F) -> impl Handler<(Request, Next)> + Clone
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    let handler = Arc::new(handler);
    move |req: Request, next: Next| -> BoxFuture {
        let fut = handler(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => res.into_response(),
                Err(err) => next.fail(err),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::Mutex;

    use http::StatusCode;

    use super::*;
    use crate::handler::{BoxedHandler, ErasedHandler};
    use crate::method::Method;
    use crate::response::Response;

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fail")
        }
    }

    impl std::error::Error for Boom {}

    /// A continuation whose remaining chain and error stage both record
    /// what they saw.
    fn recording_next(
        advanced: Arc<Mutex<u32>>,
        errors: Arc<Mutex<Vec<String>>>,
    ) -> Next {
        let rest = move |_req: Request| {
            let advanced = Arc::clone(&advanced);
            async move {
                *advanced.lock().unwrap() += 1;
                "advanced"
            }
        };
        let chain: Arc<[BoxedHandler]> = Arc::new([rest.into_boxed_handler()]);
        Next::new(
            chain,
            Arc::new(move |err: BoxError| {
                errors.lock().unwrap().push(err.to_string());
                Response::status(StatusCode::BAD_GATEWAY)
            }),
        )
    }

    #[tokio::test]
    async fn success_does_not_touch_the_continuation() {
        let advanced = Arc::new(Mutex::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::new(Mutex::new(None));

        let wrapped = with_error_handling({
            let seen = Arc::clone(&seen);
            move |req: Request| {
                *seen.lock().unwrap() = Some(req.path().to_owned());
                async { Ok::<_, Boom>("done") }
            }
        })
        .into_boxed_handler();

        let next = recording_next(Arc::clone(&advanced), Arc::clone(&errors));
        let res = wrapped.call(Request::new(Method::Get, "/ok"), next).await;

        assert_eq!(res.body(), b"done");
        assert_eq!(seen.lock().unwrap().as_deref(), Some("/ok"));
        assert_eq!(*advanced.lock().unwrap(), 0);
        assert!(errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_is_forwarded_exactly_once() {
        let advanced = Arc::new(Mutex::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));

        let wrapped = with_error_handling(|_req: Request| async { Err::<Response, _>(Boom) })
            .into_boxed_handler();

        let next = recording_next(Arc::clone(&advanced), Arc::clone(&errors));
        let res = wrapped.call(Request::new(Method::Post, "/fail"), next).await;

        assert_eq!(res.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(*errors.lock().unwrap(), ["fail"]);
        assert_eq!(*advanced.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn forwarded_error_keeps_its_type() {
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let chain: Arc<[BoxedHandler]> = Arc::from(Vec::new());
        let next = Next::new(chain, {
            let kinds = Arc::clone(&kinds);
            Arc::new(move |err: BoxError| {
                kinds.lock().unwrap().push(err.is::<Boom>());
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            })
        });

        let wrapped = with_error_handling(|_req: Request| async { Err::<&'static str, _>(Boom) })
            .into_boxed_handler();
        wrapped.call(Request::new(Method::Get, "/"), next).await;

        assert_eq!(*kinds.lock().unwrap(), [true]);
    }
}
