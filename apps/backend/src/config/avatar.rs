use std::env;
use std::time::Duration;

use crate::config::{parse_flag, parse_var};
use crate::error::AppError;

pub const DEFAULT_AVATAR_BASE_URL: &str = "https://picsum.photos";
pub const FALLBACK_AVATAR: &str = "/fallback-image.png";

/// Remote avatar lookup settings.
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    pub enabled: bool,
    pub base_url: String,
    pub size: u32,
    pub timeout: Duration,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            size: 100,
            timeout: Duration::from_millis(2000),
        }
    }
}

impl AvatarConfig {
    /// Placeholder-only configuration, used by tests.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let base_url = env::var("AVATAR_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "AVATAR_BASE_URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        Ok(Self {
            enabled: parse_flag("AVATAR_ENABLED", defaults.enabled)?,
            base_url,
            size: parse_var("AVATAR_SIZE", defaults.size)?,
            timeout: Duration::from_millis(parse_var(
                "AVATAR_TIMEOUT_MS",
                defaults.timeout.as_millis() as u64,
            )?),
        })
    }
}
