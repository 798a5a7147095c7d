//! Assertions for problem+json error bodies that do not depend on backend types.

use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Check status, code, detail and that the body `trace_id` echoes the
/// `x-trace-id` header. Returns the parsed body for further assertions.
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &actix_web::http::header::HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemBody {
    assert_eq!(status, expected_status, "unexpected status");

    let problem: ProblemBody =
        serde_json::from_slice(body).expect("body should be problem+json");

    let header_trace = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id should be ASCII");
    assert_eq!(problem.trace_id, header_trace, "trace_id body/header mismatch");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(problem.type_.ends_with(expected_code) || problem.type_.starts_with("https://"));

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "expected detail to contain '{}', got '{}'",
            fragment,
            problem.detail
        );
    }
    problem
}

/// Same as [`assert_problem_parts`] for an actix test `ServiceResponse`.
pub async fn assert_problem_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemBody {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
}
