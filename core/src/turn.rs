use crate::*;

/// Result of pairing two face-up cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub is_match: bool,
    pub first: Card,
    pub second: Card,
}

pub struct TurnResolver;

impl TurnResolver {
    pub fn is_match(first: &Card, second: &Card) -> bool {
        first.symbol_id() == second.symbol_id()
    }

    /// Decides a turn. Both cards must be distinct and face-up without being matched.
    pub fn resolve(first: &Card, second: &Card) -> TurnOutcome {
        assert_ne!(first.id(), second.id(), "a card cannot be paired with itself");
        assert!(first.is_pending(), "first pick {} is not pending", first.id());
        assert!(second.is_pending(), "second pick {} is not pending", second.id());

        let is_match = Self::is_match(first, second);
        let settle = |card: &Card| {
            let mut card = card.clone();
            card.is_matched = is_match;
            card.is_flipped = is_match;
            card
        };

        TurnOutcome {
            is_match,
            first: settle(first),
            second: settle(second),
        }
    }
}
