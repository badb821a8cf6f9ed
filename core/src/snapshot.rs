use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub symbol_id: String,
    pub label: &'static str,
    pub image: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl CardView {
    fn new(card: &Card) -> Self {
        let (label, image) = find_symbol(card.symbol_id())
            .map_or(("?", ""), |symbol| (symbol.label, symbol.image));
        Self {
            id: card.id(),
            symbol_id: card.symbol_id().into(),
            label,
            image,
            is_flipped: card.is_flipped,
            is_matched: card.is_matched,
        }
    }

    pub const fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }
}

/// Everything a render surface needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode_label: String,
    pub columns: usize,
    pub cards: Vec<CardView>,
    pub move_count: u32,
    pub elapsed_secs: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub countdown: u8,
    pub best: BestRecord,
    pub is_playing: bool,
}

impl Snapshot {
    pub(crate) fn new(round: &RoundState, mode: &Mode, best: BestRecord) -> Self {
        Self {
            phase: round.phase(),
            mode_label: mode.label.clone(),
            columns: mode.columns,
            cards: round.deck().cards().iter().map(CardView::new).collect(),
            move_count: round.move_count(),
            elapsed_secs: round.elapsed_secs(),
            matched_pairs: round.matched_pairs(),
            total_pairs: mode.pair_count,
            countdown: round.countdown(),
            best,
            is_playing: round.phase().is_playing(),
        }
    }

    /// Label for the button that starts or restarts a round.
    pub const fn start_label(&self) -> &'static str {
        if self.is_playing { "Restart" } else { "Play" }
    }

    pub fn show_countdown(&self) -> bool {
        matches!(self.phase, Phase::Countdown)
    }

    pub fn elapsed_display(&self) -> String {
        format_time(self.elapsed_secs)
    }

    pub fn best_time_display(&self) -> String {
        format_best_time(self.best.best_time_secs)
    }

    pub fn best_moves_display(&self) -> String {
        format_best_moves(self.best.best_moves)
    }

    /// Cards split into rows of `columns`.
    pub fn rows(&self) -> impl Iterator<Item = &[CardView]> {
        self.cards.chunks(self.columns.max(1))
    }
}
