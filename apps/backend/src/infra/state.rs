use std::sync::Arc;

use tracing::info;

use crate::config::avatar::AvatarConfig;
use crate::config::db::{DbKind, RuntimeEnv};
use crate::config::game::GameConfig;
use crate::error::AppError;
use crate::repos::players::{InMemoryPlayerStore, PlayerStore, SeaPlayerStore};
use crate::services::{AvatarService, DeckSource, SessionRegistry};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    store: Option<Arc<dyn PlayerStore>>,
    game: GameConfig,
    avatars: AvatarConfig,
    decks: Option<Arc<dyn DeckSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            store: None,
            game: GameConfig::default(),
            avatars: AvatarConfig::disabled(),
            decks: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    /// Persist players in `kind`; the schema is migrated during `build`.
    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Use `store` instead of a database. Ignored when `with_db` is set.
    pub fn with_store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_avatar_config(mut self, avatars: AvatarConfig) -> Self {
        self.avatars = avatars;
        self
    }

    pub fn with_decks(mut self, decks: Arc<dyn DeckSource>) -> Self {
        self.decks = Some(decks);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let (db, players): (_, Arc<dyn PlayerStore>) = match self.db_kind {
            Some(kind) => {
                // single entrypoint: connect + migrate
                let conn = db_infra::bootstrap_db(self.env, kind).await?;
                (Some(conn.clone()), Arc::new(SeaPlayerStore::new(conn)))
            }
            None => {
                let store = self
                    .store
                    .unwrap_or_else(|| Arc::new(InMemoryPlayerStore::new()));
                (None, store)
            }
        };
        info!(
            env = ?self.env,
            db = ?self.db_kind,
            catalog = self.game.catalog.len(),
            avatars = self.avatars.enabled,
            "app state ready"
        );

        let sessions = match self.decks {
            Some(decks) => SessionRegistry::new(&self.game, decks),
            None => SessionRegistry::from_config(&self.game),
        };
        let avatars = AvatarService::new(self.avatars)?;

        Ok(AppState::new(
            db,
            players,
            Arc::new(sessions),
            Arc::new(avatars),
            self.game,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
