use std::env;
use std::str::FromStr;

use crate::error::DbInfraError;

/// Runtime environment the connection is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Storage engine backing the players table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Single-connection in-memory database; schema lives as long as the pool.
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "Unsupported database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds the connection string for the given environment, engine and owner.
pub fn make_conn_spec(env: RuntimeEnv, kind: DbKind, owner: DbOwner) -> Result<String, DbInfraError> {
    match kind {
        DbKind::Postgres => postgres_url(env, owner),
        DbKind::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", sqlite_path(env)?)),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Checks every variable the chosen engine needs before any connection is attempted.
pub fn validate_db_config(env: RuntimeEnv, kind: DbKind) -> Result<(), DbInfraError> {
    make_conn_spec(env, kind, DbOwner::App)?;
    make_conn_spec(env, kind, DbOwner::Owner)?;
    Ok(())
}

fn postgres_url(env: RuntimeEnv, owner: DbOwner) -> Result<String, DbInfraError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = postgres_db_name(env)?;
    let (username, password) = credentials(owner)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn postgres_db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn sqlite_path(env: RuntimeEnv) -> Result<String, DbInfraError> {
    let path = env::var("SQLITE_DB_PATH").unwrap_or_else(|_| match env {
        RuntimeEnv::Prod => "./data/matcher.db".to_string(),
        RuntimeEnv::Test => "./data/matcher_test.db".to_string(),
    });
    if env == RuntimeEnv::Test && !path.contains("_test") {
        return Err(DbInfraError::config(format!(
            "Test profile requires the SQLite file name to contain '_test', but got: '{path}'"
        )));
    }
    Ok(path)
}

fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("MATCHER_OWNER_USER")?,
            must_var("MATCHER_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}
