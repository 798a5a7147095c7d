pub mod avatars;
pub mod leaderboard;
pub mod sessions;

pub use avatars::{AvatarFetchError, AvatarService};
pub use leaderboard::{LeaderboardClient, RankedPlayer, ScoreSubmission};
pub use sessions::{DeckSource, SeededDecks, SessionHandle, SessionRegistry, ShuffledDecks};
