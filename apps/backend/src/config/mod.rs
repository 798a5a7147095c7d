//! Environment-driven configuration. Every reader returns a typed
//! `AppError::Config` naming the offending variable.

pub mod avatar;
pub mod db;
pub mod game;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Parse `name` if set, otherwise return `default`.
pub(crate) fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("{name} has an invalid value: '{}'", raw.trim()))
        }),
        _ => Ok(default),
    }
}

/// Accepts 1/0, true/false, yes/no, on/off.
pub(crate) fn parse_flag(name: &str, default: bool) -> Result<bool, AppError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::config(format!(
                "{name} must be a boolean, got '{other}'"
            ))),
        },
        Err(_) => Ok(default),
    }
}
