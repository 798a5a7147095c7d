//! Domain layer: the card game and leaderboard rules, free of HTTP and DB types.

pub mod cards;
pub mod deck;
pub mod leaderboard;
pub mod player;
pub mod session;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_deck;
#[cfg(test)]
mod tests_leaderboard;
#[cfg(test)]
mod tests_session;

pub use cards::{Catalog, Symbol};
pub use deck::{new_deck, Deck};
pub use leaderboard::{rank_players, SubmissionStatus};
pub use player::{Player, PlayerDetails};
pub use session::{
    CardView, FlipOutcome, GameSession, IgnoredFlip, Resolution, ResolutionTicket, SessionView,
};
