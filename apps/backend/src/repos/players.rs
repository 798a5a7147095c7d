//! Player persistence: the `PlayerStore` contract and its two implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::debug;

use crate::adapters::players_sea::{self as players_adapter, PlayerUpsert};
use crate::domain::player::normalize_email;
pub use crate::domain::Player;
use crate::entities::players;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::logging::pii::Redacted;

/// Persistence collaborator for leaderboard rows, keyed by email.
///
/// `upsert_player` creates the row when absent and otherwise lowers the
/// stored attempts only when the new count is strictly smaller; the
/// comparison is atomic inside the store.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, DomainError>;

    async fn upsert_player(
        &self,
        email: &str,
        name: &str,
        attempts: i32,
    ) -> Result<Player, DomainError>;

    async fn list_players(&self) -> Result<Vec<Player>, DomainError>;
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            attempts: model.attempts,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn check_attempts(attempts: i32) -> Result<(), DomainError> {
    if attempts < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidAttempts,
            "Attempt count must not be negative",
        ));
    }
    Ok(())
}

/// SeaORM-backed store (Postgres or SQLite).
#[derive(Clone)]
pub struct SeaPlayerStore {
    db: DatabaseConnection,
}

impl SeaPlayerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerStore for SeaPlayerStore {
    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, DomainError> {
        let email = normalize_email(email)?;
        let row = players_adapter::find_by_email(&self.db, &email).await?;
        Ok(row.map(Player::from))
    }

    async fn upsert_player(
        &self,
        email: &str,
        name: &str,
        attempts: i32,
    ) -> Result<Player, DomainError> {
        check_attempts(attempts)?;
        let email = normalize_email(email)?;

        let txn = self.db.begin().await?;
        let result =
            players_adapter::upsert_if_better(&txn, PlayerUpsert::new(email, name.trim(), attempts))
                .await;
        let row = match result {
            Ok(row) => {
                txn.commit().await?;
                row
            }
            Err(e) => {
                // Best-effort rollback; keep the original error.
                let _ = txn.rollback().await;
                return Err(e.into());
            }
        };

        debug!(email = %Redacted(&row.email), stored = row.attempts, submitted = attempts, "player upserted");
        Ok(row.into())
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        let rows = players_adapter::list_all(&self.db).await?;
        Ok(rows.into_iter().map(Player::from).collect())
    }
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    by_email: HashMap<String, Player>,
}

/// Process-local store used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryPlayerStore {
    state: Mutex<MemoryState>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, DomainError> {
        let email = normalize_email(email)?;
        Ok(self.state.lock().by_email.get(&email).cloned())
    }

    async fn upsert_player(
        &self,
        email: &str,
        name: &str,
        attempts: i32,
    ) -> Result<Player, DomainError> {
        check_attempts(attempts)?;
        let email = normalize_email(email)?;
        let now = OffsetDateTime::now_utc();

        let mut state = self.state.lock();
        if let Some(existing) = state.by_email.get_mut(&email) {
            if attempts < existing.attempts {
                existing.attempts = attempts;
                existing.updated_at = now;
            }
            return Ok(existing.clone());
        }

        state.next_id += 1;
        let player = Player {
            id: state.next_id,
            name: name.trim().to_string(),
            email: email.clone(),
            attempts,
            created_at: now,
            updated_at: now,
        };
        state.by_email.insert(email, player.clone());
        Ok(player)
    }

    async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        let mut players: Vec<Player> = self.state.lock().by_email.values().cloned().collect();
        players.sort_by(|a, b| a.attempts.cmp(&b.attempts).then(a.id.cmp(&b.id)));
        Ok(players)
    }
}
