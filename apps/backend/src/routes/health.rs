use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    // Players kept in memory: nothing to probe
    let (db_status, db_error, migrations) = match require_db(&app_state) {
        Ok(db) => probe_db(db).await,
        Err(_) => ("in_memory".to_string(), None, "none".to_string()),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        db: db_status,
        db_error,
        migrations,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// `SELECT 1`, then the latest applied migration.
async fn probe_db(db: &DatabaseConnection) -> (String, Option<String>, String) {
    let ping = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 as health_check".to_string(),
        ))
        .await;
    if let Err(e) = ping {
        return (
            "error".to_string(),
            Some(format!("DB query failed: {e}")),
            "unknown".to_string(),
        );
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    ("ok".to_string(), None, migrations)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
