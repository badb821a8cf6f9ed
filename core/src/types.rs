use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Milliseconds since an epoch chosen by whoever drives the controller.
pub type Millis = u64;

/// Unique card identity, stable for the lifetime of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: &'static str,
    pub label: &'static str,
    pub image: &'static str,
}

pub const SYMBOLS: &[Symbol] = &[
    Symbol { id: "ink-1", label: "Ink 1", image: "cards/ink-1.png" },
    Symbol { id: "ink-2", label: "Ink 2", image: "cards/ink-2.png" },
    Symbol { id: "ink-3", label: "Ink 3", image: "cards/ink-3.png" },
    Symbol { id: "ink-4", label: "Ink 4", image: "cards/ink-4.png" },
    Symbol { id: "ink-5", label: "Ink 5", image: "cards/ink-5.png" },
    Symbol { id: "ink-6", label: "Ink 6", image: "cards/ink-6.png" },
    Symbol { id: "ink-7", label: "Ink 7", image: "cards/ink-7.png" },
    Symbol { id: "ink-8", label: "Ink 8", image: "cards/ink-8.png" },
];

pub fn find_symbol(id: &str) -> Option<&'static Symbol> {
    SYMBOLS.iter().find(|symbol| symbol.id == id)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol_id: String,
    pub is_matched: bool,
    pub is_flipped: bool,
}

impl Card {
    pub fn new(id: CardId, symbol_id: impl Into<String>) -> Self {
        Self {
            id,
            symbol_id: symbol_id.into(),
            is_matched: false,
            is_flipped: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn symbol_id(&self) -> &str {
        &self.symbol_id
    }

    /// Face-up but not yet part of a pair.
    pub const fn is_pending(&self) -> bool {
        self.is_flipped && !self.is_matched
    }

    /// Face-down and unmatched, the only state a player may flip.
    pub const fn is_hidden(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub label: String,
    pub pair_count: usize,
    pub columns: usize,
}

impl Mode {
    pub fn new(label: impl Into<String>, pair_count: usize, columns: usize) -> Self {
        Self {
            label: label.into(),
            pair_count,
            columns,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        let (label, pair_count, columns) = MODES[0];
        Self::new(label, pair_count, columns)
    }
}

/// Built-in modes as `(label, pair_count, columns)`.
pub const MODES: &[(&str, usize, usize)] = &[("4×4 (8 pairs)", 8, 4)];
