//! Card symbols and the catalog a deck is built from.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Alien,
    Astronaut,
    Dolphin,
    Grandma,
    Laptopboy,
    Penguin,
    Pizza,
    Tiger,
}

impl Symbol {
    pub const ALL: [Symbol; 8] = [
        Symbol::Alien,
        Symbol::Astronaut,
        Symbol::Dolphin,
        Symbol::Grandma,
        Symbol::Laptopboy,
        Symbol::Penguin,
        Symbol::Pizza,
        Symbol::Tiger,
    ];

    /// Stable lowercase name, also used in image paths.
    pub const fn name(self) -> &'static str {
        match self {
            Symbol::Alien => "alien",
            Symbol::Astronaut => "astronaut",
            Symbol::Dolphin => "dolphin",
            Symbol::Grandma => "grandma",
            Symbol::Laptopboy => "laptopboy",
            Symbol::Penguin => "penguin",
            Symbol::Pizza => "pizza",
            Symbol::Tiger => "tiger",
        }
    }

    pub fn image_path(self) -> String {
        format!("/memory-cards/{}.jpg", self.name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Symbol::ALL
            .into_iter()
            .find(|sym| sym.name() == wanted)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidSymbol,
                    format!("Unknown card symbol '{}'", s.trim()),
                )
            })
    }
}

/// Non-empty, duplicate-free list of symbols dealt into every deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog(Vec<Symbol>);

impl Catalog {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, DomainError> {
        if symbols.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidCatalog,
                "Catalog must contain at least one symbol",
            ));
        }
        let mut seen = BTreeSet::new();
        for sym in &symbols {
            if !seen.insert(*sym) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidCatalog,
                    format!("Catalog lists '{sym}' more than once"),
                ));
            }
        }
        Ok(Self(symbols))
    }

    /// Parse a comma-separated list such as `alien,astronaut`.
    pub fn parse(list: &str) -> Result<Self, DomainError> {
        let symbols = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Symbol::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self(Symbol::ALL.to_vec())
    }
}
