//! Tracing middleware attaching a request-scoped correlation identifier.
//!
//! An inbound `trace-id` header is reused when it holds a UUID; otherwise a
//! fresh identifier is generated. The identifier is placed in task-local
//! storage for the duration of the request, recorded on a request span, and
//! echoed back on the response.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

fn inbound_trace_id(req: &ServiceRequest) -> TraceId {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_header_value)
        .unwrap_or_else(TraceId::generate)
}

/// Middleware factory. Handlers read the identifier via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use training_tracker::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req);
        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let header_value = trace_id.to_string();
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(
            async move {
                let mut res = fut.await?;
                debug!(status = res.status().as_u16(), "request completed");
                match HeaderValue::from_str(&header_value) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    async fn echo_trace() -> HttpResponse {
        let current = TraceId::current().map(|id| id.to_string());
        HttpResponse::Ok().body(current.unwrap_or_default())
    }

    #[actix_web::test]
    async fn generates_header_and_scopes_handler() {
        let app = actix_test::init_service(
            App::new().wrap(Trace).route("/", web::get().to(echo_trace)),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;

        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .expect("trace-id header");
        let body = actix_test::read_body(res).await;
        assert_eq!(body, header.as_bytes());
        assert!(TraceId::from_header_value(&header).is_some());
    }

    #[actix_web::test]
    async fn reuses_valid_inbound_header() {
        let app = actix_test::init_service(
            App::new().wrap(Trace).route("/", web::get().to(echo_trace)),
        )
        .await;
        let supplied = "00000000-0000-0000-0000-0000000000aa";
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, supplied))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(
            res.headers().get(TRACE_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some(supplied)
        );
    }

    #[actix_web::test]
    async fn replaces_malformed_inbound_header() {
        let app = actix_test::init_service(
            App::new().wrap(Trace).route("/", web::get().to(echo_trace)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, "garbage"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("trace-id header");
        assert_ne!(header, "garbage");
    }
}
