// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::errors::domain::{
    DomainError, InfraErrorKind, NotFoundKind, TransitionKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidPosition, "position 99 is off the board");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidPosition);
    assert_eq!(app.status().as_u16(), 422);

    let other = DomainError::validation_other("bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_invalid_transition_to_422_with_specific_code() {
    let de = DomainError::invalid_transition(TransitionKind::SessionIncomplete, "not done");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "SESSION_INCOMPLETE");
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Session, "no session");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "SESSION_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn unavailable_response_carries_retry_after() {
    let resp = AppError::db_unavailable().error_response();
    assert_eq!(resp.status().as_u16(), 503);
    assert_eq!(resp.headers().get("retry-after").unwrap(), "1");
    assert!(resp.headers().get("x-trace-id").is_some());
}

#[test]
fn humanized_title() {
    assert_eq!(AppError::humanize_code("SESSION_NOT_FOUND"), "Session Not Found");
}
