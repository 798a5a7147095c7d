//! Repositories: domain-facing persistence contracts.

pub mod players;

pub use players::{InMemoryPlayerStore, PlayerStore, SeaPlayerStore};
