#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use memory_matcher::config::game::GameConfig;
use memory_matcher::domain::{new_deck, Catalog, Deck, Symbol};
use memory_matcher::infra::state::build_state;
use memory_matcher::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use memory_matcher::repos::players::PlayerStore;
use memory_matcher::routes;
use memory_matcher::services::SeededDecks;
use memory_matcher::AppState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const DECK_SEED: u64 = 7;

/// Two symbols, four cards, short timers.
pub fn two_symbol_config() -> GameConfig {
    GameConfig {
        catalog: Catalog::new(vec![Symbol::Alien, Symbol::Astronaut]).unwrap(),
        resolve_delay: Duration::from_millis(10),
        tick: Duration::from_millis(1000),
        ..GameConfig::default()
    }
}

/// The first deck a `SeededDecks::new(DECK_SEED)` source deals for `catalog`.
pub fn first_seeded_deck(catalog: &Catalog) -> Deck {
    new_deck(catalog, &mut ChaCha8Rng::seed_from_u64(DECK_SEED))
}

/// Positions of each matching pair, in board order of the first card.
pub fn matching_pairs(deck: &Deck) -> Vec<[usize; 2]> {
    let cards = deck.cards();
    let mut pairs = Vec::new();
    for (i, symbol) in cards.iter().enumerate() {
        if let Some(j) = (i + 1..cards.len()).find(|&j| cards[j] == *symbol) {
            pairs.push([i, j]);
        }
    }
    pairs
}

/// In-memory state with seeded decks and the two-symbol catalog.
pub async fn two_symbol_state(store: Option<Arc<dyn PlayerStore>>) -> AppState {
    let mut builder = build_state()
        .with_game_config(two_symbol_config())
        .with_decks(Arc::new(SeededDecks::new(DECK_SEED)));
    if let Some(store) = store {
        builder = builder.with_store(store);
    }
    builder.build().await.expect("state should build")
}

/// Production routes and middleware (minus CORS) around `state`.
pub async fn build_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body should be JSON")
}
