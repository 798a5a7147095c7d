//! Shared helpers for domain unit tests.

use proptest::prelude::ProptestConfig;
use proptest::sample::subsequence;
use proptest::strategy::Strategy;

use super::{Catalog, Deck, GameSession, Symbol};

/// Cases default to 8; override with `PROPTEST_CASES`.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8)
        .max(1);
    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}

/// Any non-empty subset of the full symbol list, in catalog order.
pub fn catalog() -> impl Strategy<Value = Catalog> {
    subsequence(Symbol::ALL.to_vec(), 1..=Symbol::ALL.len()).prop_map(|symbols| {
        Catalog::new(symbols).expect("subsequence of ALL is non-empty and unique")
    })
}

/// The four-card board used throughout: alien, astronaut, alien, astronaut.
pub fn two_symbol_session() -> GameSession {
    let deck = Deck::from_cards(vec![
        Symbol::Alien,
        Symbol::Astronaut,
        Symbol::Alien,
        Symbol::Astronaut,
    ])
    .expect("valid deck");
    GameSession::new(deck)
}

/// Pairs of positions holding the same symbol, in first-seen order.
pub fn matching_pairs(deck: &Deck) -> Vec<[usize; 2]> {
    let cards = deck.cards();
    let mut pairs = Vec::new();
    for (i, sym) in cards.iter().enumerate() {
        if let Some(j) = cards[i + 1..].iter().position(|other| other == sym) {
            pairs.push([i, i + 1 + j]);
        }
    }
    pairs
}
