use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::game::GameConfig;
use crate::repos::players::PlayerStore;
use crate::services::{AvatarService, LeaderboardClient, SessionRegistry};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection; absent when players live in memory
    db: Option<DatabaseConnection>,
    players: Arc<dyn PlayerStore>,
    sessions: Arc<SessionRegistry>,
    avatars: Arc<AvatarService>,
    game: GameConfig,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        players: Arc<dyn PlayerStore>,
        sessions: Arc<SessionRegistry>,
        avatars: Arc<AvatarService>,
        game: GameConfig,
    ) -> Self {
        Self {
            db,
            players,
            sessions,
            avatars,
            game,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn players(&self) -> Arc<dyn PlayerStore> {
        self.players.clone()
    }

    pub fn leaderboard(&self) -> LeaderboardClient {
        LeaderboardClient::new(self.players.clone())
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn avatars(&self) -> &AvatarService {
        &self.avatars
    }

    pub fn game_config(&self) -> &GameConfig {
        &self.game
    }
}
