//! Leaderboard client: saves finished games and reads the ranking back.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::{rank_players, Player, PlayerDetails, SessionView, SubmissionStatus};
use crate::errors::domain::{DomainError, TransitionKind, ValidationKind};
use crate::logging::pii::Redacted;
use crate::repos::players::PlayerStore;

pub const INCOMPLETE_SESSION_MESSAGE: &str = "You need to finish the game to save your score!";

/// Stored row after a save, and how the save changed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub status: SubmissionStatus,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPlayer {
    pub rank: usize,
    pub player: Player,
}

pub struct LeaderboardClient<S: PlayerStore + ?Sized = dyn PlayerStore> {
    store: Arc<S>,
}

impl<S: PlayerStore + ?Sized> Clone for LeaderboardClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: PlayerStore + ?Sized> LeaderboardClient<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Save the attempt count of a finished game. Incomplete games are
    /// refused before the store is touched.
    pub async fn submit_score(
        &self,
        session: &SessionView,
        name: &str,
        email: &str,
    ) -> Result<ScoreSubmission, DomainError> {
        if !session.complete {
            return Err(DomainError::invalid_transition(
                TransitionKind::SessionIncomplete,
                INCOMPLETE_SESSION_MESSAGE,
            ));
        }
        let details = PlayerDetails::new(name, email)?;
        let attempts = i32::try_from(session.attempts).map_err(|_| {
            DomainError::validation(ValidationKind::InvalidAttempts, "Attempt count out of range")
        })?;
        self.record(&details, attempts).await
    }

    /// Save an attempt count directly, keeping the better of old and new.
    pub async fn record(
        &self,
        details: &PlayerDetails,
        attempts: i32,
    ) -> Result<ScoreSubmission, DomainError> {
        if attempts < 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidAttempts,
                "Attempts must not be negative",
            ));
        }

        let previous = self.store.find_player_by_email(details.email()).await?;
        let player = self
            .store
            .upsert_player(details.email(), details.name(), attempts)
            .await?;
        let status = SubmissionStatus::classify(previous.map(|p| p.attempts), attempts);

        info!(
            player_id = player.id,
            email = %Redacted(details.email()),
            attempts,
            best = player.attempts,
            ?status,
            "score recorded"
        );

        Ok(ScoreSubmission { status, player })
    }

    /// Every player, best first, ranked from 1.
    pub async fn fetch_leaderboard(&self) -> Result<Vec<RankedPlayer>, DomainError> {
        let players = self.store.list_players().await?;
        Ok(rank_players(players)
            .into_iter()
            .map(|(rank, player)| RankedPlayer { rank, player })
            .collect())
    }

    pub async fn list_players(&self) -> Result<Vec<Player>, DomainError> {
        self.store.list_players().await
    }
}
