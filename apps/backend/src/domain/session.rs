//! The game session state machine.
//!
//! `GameSession` is purely synchronous: timers live in the session driver,
//! which feeds `resolve` and `tick` back in. Every timer carries the
//! generation it was started for, so a reset invalidates all of them at once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::cards::Symbol;
use super::deck::Deck;
use crate::errors::domain::{DomainError, ValidationKind};

/// Handed out when a flip completes a pair; redeemed after the resolution delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTicket {
    pub generation: u64,
    pub pair: [usize; 2],
}

/// Why a flip was accepted as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredFlip {
    AlreadyFlipped,
    AlreadySolved,
    PairPending,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlipOutcome {
    /// First card of a pair turned up. `started_clock` is set on the first
    /// accepted flip of a session.
    Flipped { started_clock: bool },
    /// Second card turned up; the pair resolves when the ticket is redeemed.
    PairFlipped { ticket: ResolutionTicket },
    Ignored { reason: IgnoredFlip },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Matched { pair: [usize; 2], complete: bool },
    Mismatched { pair: [usize; 2] },
    /// Ticket from an earlier generation or for a pair no longer face up.
    Stale,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    deck: Deck,
    flipped: Vec<usize>,
    solved: BTreeSet<usize>,
    attempts: u32,
    elapsed_secs: u64,
    started: bool,
    generation: u64,
}

impl GameSession {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            flipped: Vec::with_capacity(2),
            solved: BTreeSet::new(),
            attempts: 0,
            elapsed_secs: 0,
            started: false,
            generation: 0,
        }
    }

    pub fn flip(&mut self, position: usize) -> Result<FlipOutcome, DomainError> {
        if position >= self.deck.len() {
            return Err(DomainError::validation(
                ValidationKind::InvalidPosition,
                format!(
                    "Position {position} is outside the deck (0..{})",
                    self.deck.len()
                ),
            ));
        }

        let ignored = if self.is_complete() {
            Some(IgnoredFlip::Complete)
        } else if self.solved.contains(&position) {
            Some(IgnoredFlip::AlreadySolved)
        } else if self.flipped.contains(&position) {
            Some(IgnoredFlip::AlreadyFlipped)
        } else if self.flipped.len() == 2 {
            Some(IgnoredFlip::PairPending)
        } else {
            None
        };
        if let Some(reason) = ignored {
            return Ok(FlipOutcome::Ignored { reason });
        }

        let started_clock = !self.started;
        self.started = true;
        self.flipped.push(position);

        match self.flipped.as_slice() {
            [first, second] => Ok(FlipOutcome::PairFlipped {
                ticket: ResolutionTicket {
                    generation: self.generation,
                    pair: [*first, *second],
                },
            }),
            _ => Ok(FlipOutcome::Flipped { started_clock }),
        }
    }

    /// Compare the pair named by `ticket`. Either way the pair turns back
    /// (or stays up as solved) and one attempt is counted.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Resolution {
        if ticket.generation != self.generation || self.flipped[..] != ticket.pair[..] {
            return Resolution::Stale;
        }

        let [a, b] = ticket.pair;
        let matched = self.deck.get(a).is_some() && self.deck.get(a) == self.deck.get(b);
        if matched {
            self.solved.insert(a);
            self.solved.insert(b);
        }
        self.flipped.clear();
        self.attempts += 1;

        if matched {
            Resolution::Matched {
                pair: ticket.pair,
                complete: self.is_complete(),
            }
        } else {
            Resolution::Mismatched { pair: ticket.pair }
        }
    }

    /// Advance the clock by one second. Returns false (and changes nothing)
    /// for a stale generation, before the first flip, or once complete.
    pub fn tick(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.started || self.is_complete() {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    /// Start over with `deck`; every outstanding ticket and clock becomes stale.
    pub fn reset(&mut self, deck: Deck) {
        self.deck = deck;
        self.flipped.clear();
        self.solved.clear();
        self.attempts = 0;
        self.elapsed_secs = 0;
        self.started = false;
        self.generation += 1;
    }

    pub fn is_complete(&self) -> bool {
        !self.deck.is_empty() && self.solved.len() == self.deck.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn solved(&self) -> &BTreeSet<usize> {
        &self.solved
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn view(&self) -> SessionView {
        let cards = self
            .deck
            .cards()
            .iter()
            .enumerate()
            .map(|(position, symbol)| {
                let solved = self.solved.contains(&position);
                if solved || self.flipped.contains(&position) {
                    CardView::Up {
                        symbol: *symbol,
                        image: symbol.image_path(),
                        solved,
                    }
                } else {
                    CardView::Down
                }
            })
            .collect();

        SessionView {
            generation: self.generation,
            cards,
            attempts: self.attempts,
            elapsed_secs: self.elapsed_secs,
            clock: format_clock(self.elapsed_secs),
            started: self.started,
            complete: self.is_complete(),
        }
    }
}

/// What the host UI renders for one board position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "face", rename_all = "snake_case")]
pub enum CardView {
    Down,
    Up {
        symbol: Symbol,
        image: String,
        solved: bool,
    },
}

/// Render state handed across the game-to-host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub generation: u64,
    pub cards: Vec<CardView>,
    pub attempts: u32,
    pub elapsed_secs: u64,
    pub clock: String,
    pub started: bool,
    pub complete: bool,
}

/// `m:ss`, minutes unbounded.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
