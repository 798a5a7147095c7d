//! Per-request tracing span.
//!
//! Reads the trace id `RequestTrace` stored in extensions, so it must be
//! wrapped inside it (actix runs the last `wrap` first):
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)
//!
//! Session routes also get a `session_id` field. Routing has not happened
//! yet at this layer, so the id is taken from the raw path.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument};
use uuid::Uuid;

const SESSIONS_PREFIX: &str = "/api/sessions/";

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

/// Session id in `/api/sessions/{id}[/...]`, if the segment is a UUID.
pub(crate) fn session_id_from_path(path: &str) -> Option<Uuid> {
    let rest = path.strip_prefix(SESSIONS_PREFIX)?;
    let segment = rest.split('/').next()?;
    Uuid::parse_str(segment).ok()
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "missing-trace-id".to_string());

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            session_id = Empty,
        );
        if let Some(session_id) = session_id_from_path(req.path()) {
            span.record("session_id", tracing::field::display(session_id));
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}
