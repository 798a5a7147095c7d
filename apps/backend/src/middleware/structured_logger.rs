use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::trace_ctx;

const UNMATCHED_ROUTE: &str = "unmatched";

/// One `request_completed` event per request, levelled by status class.
///
/// `http.route` is the matched pattern (`/api/sessions/{session_id}/flip`),
/// so session ids only appear in `url.path`. Must run inside `RequestTrace`
/// to pick up the trace id.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let trace_id = trace_ctx::trace_id();
            let (status, route) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .match_pattern()
                        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string()),
                ),
                Err(err) => (err.as_response_error().status_code(), UNMATCHED_ROUTE.to_string()),
            };
            let status_code = status.as_u16();
            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

            if status.is_server_error() {
                error!(http.method = %method, http.route = %route, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
            } else if status.is_client_error() {
                warn!(http.method = %method, http.route = %route, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
            } else {
                info!(http.method = %method, http.route = %route, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
            }

            result
        })
    }
}
