//! Session driver: owns live `GameSession`s and runs their timers.
//!
//! Each session sits behind its own mutex. Timer tasks hold a weak handle
//! and the cancellation token of the generation they were started for;
//! reset swaps the token, completion and close cancel it.

use std::sync::{Arc, Weak};
use std::time::Duration;

use moka::future::Cache;
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::{interval_at, sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::domain::{
    new_deck, Catalog, Deck, FlipOutcome, GameSession, PlayerDetails, Resolution,
    ResolutionTicket, SessionView,
};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Where fresh decks come from.
pub trait DeckSource: Send + Sync {
    fn deal(&self, catalog: &Catalog) -> Deck;
}

/// Uniform shuffle from the thread-local OS-seeded generator.
#[derive(Debug, Default)]
pub struct ShuffledDecks;

impl DeckSource for ShuffledDecks {
    fn deal(&self, catalog: &Catalog) -> Deck {
        new_deck(catalog, &mut rand::rng())
    }
}

/// Reproducible decks from one seeded stream; the n-th deal is the same on every run.
#[derive(Debug)]
pub struct SeededDecks(Mutex<ChaCha8Rng>);

impl SeededDecks {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
    }
}

impl DeckSource for SeededDecks {
    fn deal(&self, catalog: &Catalog) -> Deck {
        new_deck(catalog, &mut *self.0.lock())
    }
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    resolve_delay: Duration,
    tick: Duration,
}

struct SessionInner {
    game: GameSession,
    cancel: CancellationToken,
}

/// One live game plus the player who started it.
pub struct SessionHandle {
    id: Uuid,
    player: PlayerDetails,
    timing: Timing,
    inner: Mutex<SessionInner>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("generation", &self.inner.lock().game.generation())
            .finish()
    }
}

impl SessionHandle {
    fn new(id: Uuid, player: PlayerDetails, deck: Deck, timing: Timing) -> Self {
        Self {
            id,
            player,
            timing,
            inner: Mutex::new(SessionInner {
                game: GameSession::new(deck),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player(&self) -> &PlayerDetails {
        &self.player
    }

    pub fn view(&self) -> SessionView {
        self.inner.lock().game.view()
    }

    /// Flip a card and schedule whatever timer the flip calls for.
    pub fn flip(self: &Arc<Self>, position: usize) -> Result<(FlipOutcome, SessionView), DomainError> {
        let mut inner = self.inner.lock();
        let outcome = inner.game.flip(position)?;

        match outcome {
            FlipOutcome::Flipped {
                started_clock: true,
            } => {
                let generation = inner.game.generation();
                spawn_clock(Arc::downgrade(self), generation, inner.cancel.clone(), self.timing.tick);
            }
            FlipOutcome::PairFlipped { ticket } => {
                spawn_resolution(
                    Arc::downgrade(self),
                    ticket,
                    inner.cancel.clone(),
                    self.timing.resolve_delay,
                );
            }
            _ => {}
        }

        Ok((outcome, inner.game.view()))
    }

    /// Start over with `deck`, cancelling every timer of the old generation.
    pub fn reset(&self, deck: Deck) -> SessionView {
        let mut inner = self.inner.lock();
        Self::reset_locked(&mut inner, deck);
        debug!(session_id = %self.id, generation = inner.game.generation(), "session reset");
        inner.game.view()
    }

    /// Snapshot the board for score submission. A completed game is reset
    /// to `deck` in the same critical section; the returned view is the
    /// finished one.
    pub fn finish(&self, deck: Deck) -> SessionView {
        let mut inner = self.inner.lock();
        let finished = inner.game.view();
        if finished.complete {
            Self::reset_locked(&mut inner, deck);
        }
        finished
    }

    /// Cancel all timers. The board itself is left as is.
    pub fn shutdown(&self) {
        self.inner.lock().cancel.cancel();
    }

    fn reset_locked(inner: &mut SessionInner, deck: Deck) {
        inner.cancel.cancel();
        inner.cancel = CancellationToken::new();
        inner.game.reset(deck);
    }

    fn apply_resolution(&self, ticket: ResolutionTicket) -> Resolution {
        let mut inner = self.inner.lock();
        let resolution = inner.game.resolve(ticket);
        match resolution {
            Resolution::Matched { complete: true, .. } => {
                inner.cancel.cancel();
                info!(
                    session_id = %self.id,
                    attempts = inner.game.attempts(),
                    elapsed_secs = inner.game.elapsed_secs(),
                    "session complete"
                );
            }
            Resolution::Stale => {
                debug!(session_id = %self.id, ?ticket, "stale resolution ignored");
            }
            _ => {}
        }
        resolution
    }

    fn apply_tick(&self, generation: u64) -> bool {
        self.inner.lock().game.tick(generation)
    }
}

fn spawn_resolution(
    handle: Weak<SessionHandle>,
    ticket: ResolutionTicket,
    cancel: CancellationToken,
    delay: Duration,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = sleep(delay) => {
                if let Some(handle) = handle.upgrade() {
                    handle.apply_resolution(ticket);
                }
            }
        }
    });
}

fn spawn_clock(handle: Weak<SessionHandle>, generation: u64, cancel: CancellationToken, tick: Duration) {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + tick, tick);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let Some(handle) = handle.upgrade() else { break };
                    if !handle.apply_tick(generation) {
                        break;
                    }
                }
            }
        }
    });
}

/// Live sessions keyed by id, bounded by capacity and idle time. At capacity
/// the least recently used session is evicted; a new session is always admitted.
pub struct SessionRegistry {
    sessions: Cache<Uuid, Arc<SessionHandle>>,
    catalog: Catalog,
    timing: Timing,
    decks: Arc<dyn DeckSource>,
}

impl SessionRegistry {
    pub fn new(config: &GameConfig, decks: Arc<dyn DeckSource>) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(config.session_idle)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|id: Arc<Uuid>, handle: Arc<SessionHandle>, cause: RemovalCause| {
                handle.shutdown();
                debug!(session_id = %id, ?cause, "session dropped");
            })
            .build();

        Self {
            sessions,
            catalog: config.catalog.clone(),
            timing: Timing {
                resolve_delay: config.resolve_delay,
                tick: config.tick,
            },
            decks,
        }
    }

    /// Registry dealing shuffled decks, or seeded ones when the config asks for it.
    pub fn from_config(config: &GameConfig) -> Self {
        let decks: Arc<dyn DeckSource> = match config.deck_seed {
            Some(seed) => Arc::new(SeededDecks::new(seed)),
            None => Arc::new(ShuffledDecks),
        };
        Self::new(config, decks)
    }

    pub fn deal(&self) -> Deck {
        self.decks.deal(&self.catalog)
    }

    pub async fn open(&self, player: PlayerDetails) -> Arc<SessionHandle> {
        let id = Uuid::new_v4();
        let handle = Arc::new(SessionHandle::new(id, player, self.deal(), self.timing));
        self.sessions.insert(id, handle.clone()).await;
        debug!(session_id = %id, "session opened");
        handle
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<SessionHandle>, DomainError> {
        self.sessions.get(&id).await.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("Session {id} not found"))
        })
    }

    pub async fn flip(&self, id: Uuid, position: usize) -> Result<(FlipOutcome, SessionView), DomainError> {
        self.get(id).await?.flip(position)
    }

    pub async fn reset(&self, id: Uuid) -> Result<SessionView, DomainError> {
        let handle = self.get(id).await?;
        Ok(handle.reset(self.deal()))
    }

    /// See [`SessionHandle::finish`].
    pub async fn finish(&self, id: Uuid) -> Result<(Arc<SessionHandle>, SessionView), DomainError> {
        let handle = self.get(id).await?;
        let finished = handle.finish(self.deal());
        Ok((handle, finished))
    }

    pub async fn close(&self, id: Uuid) -> Result<(), DomainError> {
        match self.sessions.remove(&id).await {
            Some(handle) => {
                handle.shutdown();
                Ok(())
            }
            None => Err(DomainError::not_found(
                NotFoundKind::Session,
                format!("Session {id} not found"),
            )),
        }
    }

    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }
}
