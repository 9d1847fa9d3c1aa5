//! Development-only middleware restoring internal error detail.
//!
//! Internal errors are always redacted by the HTTP error mapping. When this
//! middleware is enabled (see `expose_error_details`), the original message is
//! copied into the `details` field of the redacted envelope. Wrap it with
//! [`actix_web::middleware::Condition`] so production builds skip it entirely.

use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;

use crate::domain::Error;
use crate::inbound::http::error::REDACTED_MESSAGE;

fn exposed_body(original: &Error) -> Error {
    let mut exposed = Error::internal(REDACTED_MESSAGE)
        .with_details(Value::String(original.message().to_owned()));
    if let Some(id) = original.trace_id() {
        exposed = exposed.with_trace_id(id.to_owned());
    }
    exposed
}

/// Middleware factory.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use actix_web::middleware::Condition;
/// use training_tracker::middleware::ErrorDetails;
///
/// let app = App::new().wrap(Condition::new(cfg!(debug_assertions), ErrorDetails));
/// ```
#[derive(Clone, Copy)]
pub struct ErrorDetails;

impl<S, B> Transform<S, ServiceRequest> for ErrorDetails
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ErrorDetailsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorDetailsMiddleware { service }))
    }
}

/// Service wrapper produced by [`ErrorDetails`].
pub struct ErrorDetailsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorDetailsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            if res.status() != StatusCode::INTERNAL_SERVER_ERROR {
                return Ok(res.map_into_boxed_body());
            }
            let Some(original) = res
                .response()
                .error()
                .and_then(|err| err.as_error::<Error>())
                .cloned()
            else {
                return Ok(res.map_into_boxed_body());
            };

            let (req, previous) = res.into_parts();
            let mut rebuilt = HttpResponse::build(previous.status()).json(exposed_body(&original));
            for (name, value) in previous.headers() {
                if !rebuilt.headers().contains_key(name) {
                    rebuilt.headers_mut().insert(name.clone(), value.clone());
                }
            }
            Ok(ServiceResponse::new(req, rebuilt))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::middleware::Condition;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::middleware::Trace;

    async fn failing() -> Result<HttpResponse, Error> {
        Err(Error::internal("pool exhausted"))
    }

    async fn missing() -> Result<HttpResponse, Error> {
        Err(Error::not_found("user 42 not found"))
    }

    async fn body_for(expose: bool, path: &str) -> (StatusCode, Option<String>, Value) {
        let app = actix_test::init_service(
            App::new()
                .wrap(Condition::new(expose, ErrorDetails))
                .wrap(Trace)
                .route("/fail", web::get().to(failing))
                .route("/missing", web::get().to(missing)),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(path).to_request(),
        )
        .await;
        let status = res.status();
        let trace = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = actix_test::read_body_json(res).await;
        (status, trace, body)
    }

    #[rstest]
    #[case(false, Value::Null)]
    #[case(true, Value::String("pool exhausted".to_owned()))]
    #[actix_web::test]
    async fn internal_detail_only_exposed_when_enabled(
        #[case] expose: bool,
        #[case] expected_details: Value,
    ) {
        let (status, trace, body) = body_for(expose, "/fail").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], REDACTED_MESSAGE);
        assert_eq!(body["details"], expected_details);
        assert_eq!(body["traceId"].as_str(), trace.as_deref());
    }

    #[actix_web::test]
    async fn client_errors_are_untouched() {
        let (status, _, body) = body_for(true, "/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user 42 not found");
        assert!(body.get("details").is_none());
    }
}
