//! Best-effort avatar URLs for leaderboard rows.

use futures::future::join_all;
use moka::future::Cache;
use thiserror::Error;
use tracing::warn;

use crate::config::avatar::{AvatarConfig, FALLBACK_AVATAR};
use crate::error::AppError;

#[derive(Debug, Error)]
pub enum AvatarFetchError {
    #[error("avatar request timed out")]
    Timeout,
    #[error("avatar request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("avatar service answered {0}")]
    Status(reqwest::StatusCode),
}

impl From<reqwest::Error> for AvatarFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AvatarFetchError::Timeout
        } else {
            AvatarFetchError::Request(e)
        }
    }
}

pub struct AvatarService {
    client: Option<reqwest::Client>,
    config: AvatarConfig,
    resolved: Cache<i64, String>,
}

impl AvatarService {
    pub fn new(config: AvatarConfig) -> Result<Self, AppError> {
        let client = if config.enabled {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| AppError::config(format!("Avatar HTTP client: {e}")))?;
            Some(client)
        } else {
            None
        };

        Ok(Self {
            client,
            config,
            resolved: Cache::builder().max_capacity(10_000).build(),
        })
    }

    /// Placeholder for everyone; no outbound requests.
    pub fn disabled() -> Self {
        Self {
            client: None,
            config: AvatarConfig::disabled(),
            resolved: Cache::builder().max_capacity(1).build(),
        }
    }

    /// Avatar for `player_id`, or the placeholder when the lookup fails.
    pub async fn avatar_url(&self, player_id: i64) -> String {
        if self.client.is_none() {
            return FALLBACK_AVATAR.to_string();
        }
        if let Some(url) = self.resolved.get(&player_id).await {
            return url;
        }

        match self.fetch(player_id).await {
            Ok(url) => {
                self.resolved.insert(player_id, url.clone()).await;
                url
            }
            Err(e) => {
                warn!(player_id, error = %e, "avatar lookup failed, using placeholder");
                FALLBACK_AVATAR.to_string()
            }
        }
    }

    /// Lookups run concurrently; output order follows `player_ids`.
    pub async fn avatar_urls(&self, player_ids: &[i64]) -> Vec<String> {
        join_all(player_ids.iter().map(|id| self.avatar_url(*id))).await
    }

    /// The redirected image URL for `player_id`.
    pub async fn fetch(&self, player_id: i64) -> Result<String, AvatarFetchError> {
        let Some(client) = &self.client else {
            return Ok(FALLBACK_AVATAR.to_string());
        };
        let size = self.config.size;
        let url = format!(
            "{}/{size}/{size}?random={player_id}",
            self.config.base_url
        );

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AvatarFetchError::Status(response.status()));
        }
        Ok(response.url().to_string())
    }
}
