use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

const REQUEST_ID: &str = "x-request-id";

/// Gives each request a trace id and echoes it as `x-request-id`.
///
/// A client-supplied `x-request-id` is kept when it is a UUID, so a browser
/// retrying a flip can correlate both attempts; anything else is replaced.
/// The id goes into request extensions and scopes the downstream future
/// (see [`trace_ctx`]).
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

fn incoming_trace_id(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(REQUEST_ID)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(trace_id.clone());

        let header = HeaderValue::from_str(&trace_id).ok();
        let fut = self.service.call(req);

        Box::pin(trace_ctx::with_trace_id(trace_id, async move {
            let mut res = fut.await?;
            if let Some(value) = header {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID), value);
            }
            Ok::<_, actix_web::Error>(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    async fn echo_trace_id() -> HttpResponse {
        HttpResponse::Ok().body(trace_ctx::trace_id())
    }

    #[actix_web::test]
    async fn uuid_request_id_is_kept() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;
        let id = "6f1c2a4e-8d3b-4c5a-9e7f-0a1b2c3d4e5f";

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-request-id", id))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get("x-request-id").unwrap(), id);
        assert_eq!(test::read_body(resp).await, id.as_bytes());
    }

    #[actix_web::test]
    async fn non_uuid_request_id_is_replaced() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-request-id", "<script>"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let echoed = resp.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
        assert!(Uuid::parse_str(&echoed).is_ok());
        assert_eq!(test::read_body(resp).await, echoed.as_bytes());
    }
}
