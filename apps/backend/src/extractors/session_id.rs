use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Session id taken from the `{session_id}` path segment. Only the UUID
/// shape is checked here; whether the session is live is the registry's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("session_id")))
    }
}

fn parse(raw: Option<&str>) -> Result<SessionId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidSessionId, "Missing session id")
    })?;
    Uuid::parse_str(raw).map(SessionId).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("Invalid session id: {raw}"),
        )
    })
}
