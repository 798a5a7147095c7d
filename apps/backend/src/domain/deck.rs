//! Deck generation: two of every catalog symbol, uniformly shuffled.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards::{Catalog, Symbol};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Symbol>);

/// Duplicate the catalog and apply a Fisher-Yates shuffle.
pub fn new_deck<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Deck {
    let mut cards = Vec::with_capacity(catalog.len() * 2);
    cards.extend_from_slice(catalog.symbols());
    cards.extend_from_slice(catalog.symbols());
    cards.shuffle(rng);
    Deck(cards)
}

impl Deck {
    /// Build a deck in a fixed order. Rejects any layout that is not exactly
    /// two of each symbol.
    pub fn from_cards(cards: Vec<Symbol>) -> Result<Self, DomainError> {
        if cards.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidDeck,
                "Deck must not be empty",
            ));
        }
        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for card in &cards {
            *counts.entry(*card).or_default() += 1;
        }
        if let Some((sym, n)) = counts.iter().find(|(_, n)| **n != 2) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDeck,
                format!("Symbol '{sym}' appears {n} times; every symbol must appear exactly twice"),
            ));
        }
        Ok(Self(cards))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.0.get(position).copied()
    }

    pub fn cards(&self) -> &[Symbol] {
        &self.0
    }
}
