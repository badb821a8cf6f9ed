use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Ordered cards of one round, two per symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count()
    }

    pub fn pending_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_pending()).count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.cards.is_empty() && self.matched_count() == self.cards.len()
    }

    /// Turns a card face-up, returns `false` when it was not there or already face-up.
    pub fn reveal(&mut self, id: CardId) -> bool {
        match self.get_mut(id) {
            Some(card) if !card.is_flipped => {
                card.is_flipped = true;
                true
            }
            _ => false,
        }
    }

    /// Turns every unmatched card face-down.
    pub fn hide_unmatched(&mut self) {
        for card in self.cards.iter_mut() {
            card.is_flipped = card.is_matched;
        }
    }

    /// Writes back the cards produced by a turn resolution.
    pub fn apply(&mut self, outcome: &TurnOutcome) {
        for updated in [&outcome.first, &outcome.second] {
            if let Some(card) = self.get_mut(updated.id()) {
                *card = updated.clone();
            }
        }
    }
}

/// Builds shuffled decks from a fixed symbol catalog.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeckFactory {
    catalog: &'static [Symbol],
}

impl DeckFactory {
    pub const fn new(catalog: &'static [Symbol]) -> Self {
        Self { catalog }
    }

    pub fn build(
        &self,
        pair_count: usize,
        rng: &mut dyn RandomSource,
        ids: &mut dyn IdGenerator,
    ) -> Result<Deck> {
        if pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        if pair_count > self.catalog.len() {
            return Err(ConfigError::TooManyPairs {
                requested: pair_count,
                available: self.catalog.len(),
            });
        }

        let picks = &self.catalog[..pair_count];
        let mut cards: Vec<Card> = picks
            .iter()
            .chain(picks.iter())
            .map(|symbol| Card::new(ids.next_id(), symbol.id))
            .collect();
        shuffle(&mut cards, rng);

        log::trace!("built deck of {} cards", cards.len());
        Ok(Deck::from_cards(cards))
    }
}

impl Default for DeckFactory {
    fn default() -> Self {
        Self::new(SYMBOLS)
    }
}
