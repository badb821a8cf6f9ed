use crate::*;

/// Everything a round schedules for later.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundTimer {
    /// Turn one card face-up during the preview.
    Reveal(CardId),
    /// Preview is over, show the countdown.
    RevealHeld,
    /// Countdown shows a new value.
    CountdownTick(u8),
    /// Countdown elapsed, hide the cards and start play.
    CountdownElapsed,
    /// Feedback delay of the current turn is over.
    ResolveTurn,
    /// Re-sample the clock.
    ClockSample,
}

/// Schedules the timed choreography of a round and owns every timer a round registers.
#[derive(Clone, Debug, Default)]
pub struct RoundSequencer {
    timing: Timing,
    group: TaskGroup,
}

impl RoundSequencer {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            group: TaskGroup::default(),
        }
    }

    /// Revokes everything scheduled for the current round.
    pub fn cancel(&mut self, queue: &mut TimerQueue<RoundTimer>) -> usize {
        let cancelled = self.group.cancel_all(queue);
        if cancelled > 0 {
            log::debug!("cancelled {} pending round timers", cancelled);
        }
        cancelled
    }

    /// Cancels the previous round, then lays out preview, countdown and start from `now`.
    pub fn begin(&mut self, queue: &mut TimerQueue<RoundTimer>, deck: &Deck, now: Millis) {
        self.cancel(queue);

        let Timing {
            stagger_ms,
            countdown_from,
            countdown_step_ms,
            ..
        } = self.timing;

        for (index, card) in deck.cards().iter().enumerate() {
            let due = now.saturating_add((index as Millis).saturating_mul(stagger_ms));
            self.group.schedule(queue, due, RoundTimer::Reveal(card.id()));
        }

        let countdown_at = now.saturating_add(self.timing.reveal_duration(deck.len()));
        self.group.schedule(queue, countdown_at, RoundTimer::RevealHeld);

        for step in 1..countdown_from {
            let due =
                countdown_at.saturating_add((step as Millis).saturating_mul(countdown_step_ms));
            self.group
                .schedule(queue, due, RoundTimer::CountdownTick(countdown_from - step));
        }

        let start_at = countdown_at.saturating_add(self.timing.countdown_duration());
        self.group
            .schedule(queue, start_at, RoundTimer::CountdownElapsed);

        log::trace!(
            "round sequence scheduled: countdown at {}, play at {}",
            countdown_at,
            start_at
        );
    }

    pub fn schedule_resolution(
        &mut self,
        queue: &mut TimerQueue<RoundTimer>,
        is_match: bool,
        now: Millis,
    ) {
        let due = now.saturating_add(self.timing.feedback_delay(is_match));
        self.group.schedule(queue, due, RoundTimer::ResolveTurn);
    }

    pub fn schedule_clock_sample(&mut self, queue: &mut TimerQueue<RoundTimer>, now: Millis) {
        let due = now.saturating_add(self.timing.clock_sample_ms);
        self.group.schedule(queue, due, RoundTimer::ClockSample);
    }

    /// Marks a fired timer as done. `false` means it did not belong to this round.
    pub fn retire(&mut self, handle: TimerHandle) -> bool {
        self.group.retire(handle)
    }

    pub fn pending(&self) -> usize {
        self.group.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn deck(len: u64) -> Deck {
        Deck::from_cards((1..=len).map(|id| Card::new(CardId(id), "ink-1")).collect())
    }

    fn drain(queue: &mut TimerQueue<RoundTimer>) -> Vec<(Millis, RoundTimer)> {
        core::iter::from_fn(|| queue.pop_due(Millis::MAX).map(|(_, due, timer)| (due, timer)))
            .collect()
    }

    #[test]
    fn stages_are_laid_out_from_declared_durations() {
        let mut queue = TimerQueue::new();
        let mut sequencer = RoundSequencer::new(Timing::default());
        sequencer.begin(&mut queue, &deck(4), 1_000);

        assert_eq!(
            drain(&mut queue),
            [
                (1_000, RoundTimer::Reveal(CardId(1))),
                (1_080, RoundTimer::Reveal(CardId(2))),
                (1_160, RoundTimer::Reveal(CardId(3))),
                (1_240, RoundTimer::Reveal(CardId(4))),
                (1_620, RoundTimer::RevealHeld),
                (2_620, RoundTimer::CountdownTick(2)),
                (3_620, RoundTimer::CountdownTick(1)),
                (4_620, RoundTimer::CountdownElapsed),
            ]
        );
    }

    #[test]
    fn begin_replaces_previous_sequence() {
        let mut queue = TimerQueue::new();
        let mut sequencer = RoundSequencer::new(Timing::default());
        sequencer.begin(&mut queue, &deck(16), 0);
        assert_eq!(queue.len(), 16 + 1 + 2 + 1);

        sequencer.begin(&mut queue, &deck(2), 50);
        assert_eq!(queue.len(), 2 + 1 + 2 + 1);
        assert_eq!(sequencer.pending(), queue.len());
        assert!(drain(&mut queue).iter().all(|&(due, _)| due >= 50));
    }

    #[test]
    fn feedback_delay_depends_on_verdict() {
        let mut queue = TimerQueue::new();
        let mut sequencer = RoundSequencer::new(Timing::default());
        sequencer.schedule_resolution(&mut queue, true, 0);
        sequencer.schedule_resolution(&mut queue, false, 0);

        let due: Vec<Millis> = drain(&mut queue).into_iter().map(|(due, _)| due).collect();
        assert_eq!(due, [300, 700]);
    }

    #[test]
    fn offsets_near_the_end_of_time_clamp_instead_of_wrapping() {
        let mut queue = TimerQueue::new();
        let mut sequencer = RoundSequencer::new(Timing::default());
        let now = Millis::MAX - 1_000;
        sequencer.begin(&mut queue, &deck(16), now);
        sequencer.schedule_clock_sample(&mut queue, Millis::MAX);

        let fired = drain(&mut queue);
        assert!(fired.iter().all(|&(due, _)| due >= now));
        assert!(fired.windows(2).all(|pair| pair[0].0 <= pair[1].0));
        assert_eq!(
            fired.last().copied(),
            Some((Millis::MAX, RoundTimer::ClockSample))
        );
    }
}
