//! Score submission outcome and leaderboard ordering.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// How a saved score relates to what was stored before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// First score for this email.
    Created,
    /// Strictly fewer attempts than the stored best; the row was updated.
    Improved,
    /// Equal or worse than the stored best; the row was left alone.
    Unchanged,
}

impl SubmissionStatus {
    pub fn classify(previous_best: Option<i32>, submitted: i32) -> Self {
        match previous_best {
            None => SubmissionStatus::Created,
            Some(best) if submitted < best => SubmissionStatus::Improved,
            Some(_) => SubmissionStatus::Unchanged,
        }
    }
}

/// Order players best first: fewest attempts, then whoever reached that
/// score earliest, then by id. Returns 1-based ranks.
pub fn rank_players(mut players: Vec<Player>) -> Vec<(usize, Player)> {
    players.sort_by(|a, b| {
        a.attempts
            .cmp(&b.attempts)
            .then_with(|| a.updated_at.cmp(&b.updated_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i + 1, p))
        .collect()
}
