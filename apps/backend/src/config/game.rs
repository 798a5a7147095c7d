use std::env;
use std::time::Duration;

use crate::config::parse_var;
use crate::domain::Catalog;
use crate::error::AppError;

/// Timing and sizing for game sessions.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub catalog: Catalog,
    /// How long a flipped pair stays face up before it is compared.
    pub resolve_delay: Duration,
    /// Clock period; one tick adds one second of elapsed time.
    pub tick: Duration,
    /// Sessions untouched for this long are evicted and their timers cancelled.
    pub session_idle: Duration,
    pub max_sessions: u64,
    /// Deals reproducible decks when set. Meant for local debugging and tests.
    pub deck_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            resolve_delay: Duration::from_millis(1000),
            tick: Duration::from_millis(1000),
            session_idle: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
            deck_seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let catalog = match env::var("MATCHER_CATALOG") {
            Ok(list) if !list.trim().is_empty() => Catalog::parse(&list)
                .map_err(|e| AppError::config(format!("MATCHER_CATALOG: {e}")))?,
            _ => defaults.catalog,
        };

        let resolve_delay_ms = parse_var("MATCHER_RESOLVE_DELAY_MS", 1000u64)?;
        let tick_ms = parse_var("MATCHER_TICK_MS", 1000u64)?;
        if tick_ms == 0 {
            return Err(AppError::config("MATCHER_TICK_MS must be greater than zero"));
        }
        let idle_secs = parse_var("MATCHER_SESSION_IDLE_SECS", defaults.session_idle.as_secs())?;
        let max_sessions = parse_var("MATCHER_MAX_SESSIONS", defaults.max_sessions)?;
        let deck_seed = match env::var("MATCHER_DECK_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("MATCHER_DECK_SEED must be an integer, got '{raw}'"))
            })?),
            _ => None,
        };

        Ok(Self {
            catalog,
            resolve_delay: Duration::from_millis(resolve_delay_ms),
            tick: Duration::from_millis(tick_ms),
            session_idle: Duration::from_secs(idle_secs),
            max_sessions,
            deck_seed,
        })
    }
}
