mod common;

use actix_web::test;
use common::{build_app, read_json, two_symbol_state};
use memory_matcher::config::db::{DbKind, RuntimeEnv};
use memory_matcher::infra::state::build_state;

#[actix_web::test]
async fn health_without_database() {
    let app = build_app(two_symbol_state(None).await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "in_memory");
    assert!(body.get("db_error").is_none());
}

#[actix_web::test]
async fn health_reports_latest_migration() {
    let state = build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
        .unwrap();
    let app = build_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251018_000001_players");
}
