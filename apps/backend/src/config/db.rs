use std::env;

pub use db_infra::db::{DbKind, DbOwner, RuntimeEnv};

use crate::error::AppError;

/// Storage selected by `MATCHER_DB`: `postgres`, `sqlite-file`,
/// `sqlite-memory`, or `none` for the in-process player store.
/// Unset means `postgres`.
pub fn storage_from_env() -> Result<Option<DbKind>, AppError> {
    let raw = env::var("MATCHER_DB").unwrap_or_else(|_| "postgres".to_string());
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "memory-store" => Ok(None),
        other => other
            .parse::<DbKind>()
            .map(Some)
            .map_err(|e| AppError::config(format!("MATCHER_DB: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn defaults_to_postgres() {
        env::remove_var("MATCHER_DB");
        assert_eq!(storage_from_env().unwrap(), Some(DbKind::Postgres));
    }

    #[test]
    #[serial]
    fn none_selects_in_process_store() {
        env::set_var("MATCHER_DB", "none");
        assert_eq!(storage_from_env().unwrap(), None);
        env::set_var("MATCHER_DB", "sqlite-memory");
        assert_eq!(storage_from_env().unwrap(), Some(DbKind::SqliteMemory));
        env::remove_var("MATCHER_DB");
    }

    #[test]
    #[serial]
    fn unknown_kind_is_a_config_error() {
        env::set_var("MATCHER_DB", "mongo");
        let err = storage_from_env().unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        env::remove_var("MATCHER_DB");
    }
}
