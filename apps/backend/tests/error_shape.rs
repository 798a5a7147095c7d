//! Problem-details shape across the error classes the API produces.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_response;
use common::{build_app, read_json, two_symbol_state};
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = build_app(two_symbol_state(None).await).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "Ada", "email": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");
    let problem = assert_problem_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("unexpected end of input"),
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Bad Request");
}

#[actix_web::test]
async fn invalid_details_are_unprocessable() {
    let app = build_app(two_symbol_state(None).await).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({"name": "Ada", "email": "ada.example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "INVALID_EMAIL", StatusCode::UNPROCESSABLE_ENTITY, None).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({"name": "   ", "email": "ada@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(
        resp,
        "INVALID_PLAYER_NAME",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("must not be empty"),
    )
    .await;
}

#[actix_web::test]
async fn session_ids_are_checked() {
    let app = build_app(two_symbol_state(None).await).await;

    let req = test::TestRequest::get().uri("/api/sessions/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "INVALID_SESSION_ID", StatusCode::BAD_REQUEST, None).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{}/reset", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "SESSION_NOT_FOUND", StatusCode::NOT_FOUND, None).await;
}

#[actix_web::test]
async fn negative_attempts_are_unprocessable() {
    let app = build_app(two_symbol_state(None).await).await;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({"name": "Ada", "email": "ada@example.com", "attempts": -3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "INVALID_ATTEMPTS", StatusCode::UNPROCESSABLE_ENTITY, None).await;

    let req = test::TestRequest::get().uri("/api/players").to_request();
    let players = read_json(test::call_service(&app, req).await).await;
    assert_eq!(players, json!([]));
}
