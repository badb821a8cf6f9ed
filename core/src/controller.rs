use alloc::boxed::Box;
use alloc::vec::Vec;
use serde::Serialize;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    NoChange,
    FirstPick,
    SecondPick { is_match: bool },
}

/// Transient state of one round, replaced wholesale by every `start_round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundState {
    phase: Phase,
    deck: Deck,
    first_pick: Option<CardId>,
    second_pick: Option<CardId>,
    move_count: u32,
    #[serde(skip)]
    clock: Clock,
    countdown: u8,
    locked: bool,
}

impl RoundState {
    fn new(phase: Phase, deck: Deck, countdown: u8) -> Self {
        Self {
            phase,
            deck,
            first_pick: None,
            second_pick: None,
            move_count: 0,
            clock: Clock::default(),
            countdown,
            locked: !phase.is_playing(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn first_pick(&self) -> Option<CardId> {
        self.first_pick
    }

    pub fn second_pick(&self) -> Option<CardId> {
        self.second_pick
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.clock.started_at()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn matched_pairs(&self) -> usize {
        self.deck.matched_count() / 2
    }
}

/// Owns the deck, turn state, phase and counters of the game and dispatches all input.
///
/// Time never advances on its own: every entry point takes `now`, and scheduled
/// work only runs from [`GameController::advance_to`].
pub struct GameController<S> {
    config: GameConfig,
    factory: DeckFactory,
    rng: Box<dyn RandomSource>,
    ids: Box<dyn IdGenerator>,
    store: S,
    best: BestRecord,
    round: RoundState,
    timers: TimerQueue<RoundTimer>,
    sequencer: RoundSequencer,
    now: Millis,
}

impl<S: BestScoreStore> GameController<S> {
    pub fn new(config: GameConfig, store: S, seed: u64) -> Result<Self> {
        Self::with_sources(
            config,
            store,
            SeededRandom::new(seed),
            SequentialIds::default(),
        )
    }

    pub fn with_sources(
        config: GameConfig,
        store: S,
        rng: impl RandomSource + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        let factory = DeckFactory::default();
        let deck = factory.build(config.mode.pair_count, rng.as_mut(), ids.as_mut())?;
        let best = BestRecord::load(&store, config.mode.pair_count);
        log::debug!("loaded best record for {}: {:?}", config.mode.label, best);

        Ok(Self {
            round: RoundState::new(Phase::Idle, deck, config.timing.countdown_from),
            sequencer: RoundSequencer::new(config.timing),
            config,
            factory,
            rng,
            ids,
            store,
            best,
            timers: TimerQueue::new(),
            now: 0,
        })
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn best(&self) -> BestRecord {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Abandons whatever round is running and starts a fresh one.
    pub fn start_round(&mut self, now: Millis) -> Result<()> {
        let now = self.observe(now);
        self.sequencer.cancel(&mut self.timers);

        let deck = self.factory.build(
            self.config.mode.pair_count,
            self.rng.as_mut(),
            self.ids.as_mut(),
        )?;
        self.sequencer.begin(&mut self.timers, &deck, now);

        let phase = self.round.phase.next(PhaseEvent::Start).unwrap_or(Phase::Preview);
        self.round = RoundState::new(phase, deck, self.config.timing.countdown_from);
        log::debug!("round started at {} with {} cards", now, self.round.deck.len());
        Ok(())
    }

    /// Turns a card face-up if the board accepts input right now.
    pub fn flip(&mut self, id: CardId, now: Millis) -> FlipOutcome {
        let now = self.observe(now);
        let round = &mut self.round;

        if !round.phase.is_playing() || round.locked || round.second_pick.is_some() {
            return FlipOutcome::NoChange;
        }
        if !round.deck.get(id).is_some_and(Card::is_hidden) {
            return FlipOutcome::NoChange;
        }
        round.deck.reveal(id);
        log::trace!("flipped {}", id);

        let Some(first) = round.first_pick else {
            round.first_pick = Some(id);
            return FlipOutcome::FirstPick;
        };

        round.second_pick = Some(id);
        round.locked = true;
        let is_match = match (round.deck.get(first), round.deck.get(id)) {
            (Some(a), Some(b)) => TurnResolver::is_match(a, b),
            _ => false,
        };
        self.sequencer
            .schedule_resolution(&mut self.timers, is_match, now);
        FlipOutcome::SecondPick { is_match }
    }

    /// Fires every timer due at or before `now`, in order. Returns the phases entered.
    pub fn advance_to(&mut self, now: Millis) -> Vec<Phase> {
        let mut entered = Vec::new();
        while let Some((handle, due, timer)) = self.timers.pop_due(now) {
            self.observe(due);
            if !self.sequencer.retire(handle) {
                log::warn!("dropping stale timer {:?}", timer);
                continue;
            }
            log::trace!("timer {:?} at {}", timer, due);
            entered.extend(self.on_timer(timer, due));
        }
        self.observe(now);
        entered
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.round, &self.config.mode, self.best)
    }

    fn observe(&mut self, now: Millis) -> Millis {
        self.now = self.now.max(now);
        self.now
    }

    fn on_timer(&mut self, timer: RoundTimer, at: Millis) -> Option<Phase> {
        use RoundTimer::*;

        match timer {
            Reveal(id) => {
                if matches!(self.round.phase, Phase::Preview) {
                    self.round.deck.reveal(id);
                }
                None
            }
            RevealHeld => {
                let entered = self.transition(PhaseEvent::RevealHeld)?;
                self.round.countdown = self.config.timing.countdown_from;
                Some(entered)
            }
            CountdownTick(value) => {
                if matches!(self.round.phase, Phase::Countdown) {
                    self.round.countdown = value;
                }
                None
            }
            CountdownElapsed => {
                let entered = self.transition(PhaseEvent::CountdownElapsed)?;
                let round = &mut self.round;
                round.deck.hide_unmatched();
                round.locked = false;
                round.countdown = 0;
                round.clock.start(at);
                self.sequencer.schedule_clock_sample(&mut self.timers, at);
                Some(entered)
            }
            ResolveTurn => self.resolve_turn(),
            ClockSample => {
                if self.round.phase.is_playing() {
                    self.round.clock.sample(at);
                    self.sequencer.schedule_clock_sample(&mut self.timers, at);
                }
                None
            }
        }
    }

    fn transition(&mut self, event: PhaseEvent) -> Option<Phase> {
        match self.round.phase.next(event) {
            Some(next) => {
                log::debug!("phase {:?} -> {:?}", self.round.phase, next);
                self.round.phase = next;
                Some(next)
            }
            None => {
                log::warn!("ignoring {:?} in phase {:?}", event, self.round.phase);
                None
            }
        }
    }

    fn resolve_turn(&mut self) -> Option<Phase> {
        let round = &mut self.round;
        let (Some(first), Some(second)) = (round.first_pick, round.second_pick) else {
            log::warn!("turn resolution fired without two picks");
            return None;
        };
        let (Some(first), Some(second)) = (round.deck.get(first), round.deck.get(second)) else {
            log::warn!("picked cards are not part of the current deck");
            return None;
        };

        let outcome = TurnResolver::resolve(first, second);
        round.deck.apply(&outcome);
        round.move_count += 1;
        round.first_pick = None;
        round.second_pick = None;
        round.locked = false;
        log::trace!(
            "turn {} resolved, match: {}",
            round.move_count,
            outcome.is_match
        );

        if !round.deck.is_cleared() {
            return None;
        }
        let entered = self.transition(PhaseEvent::AllMatched)?;
        self.finish_round();
        Some(entered)
    }

    fn finish_round(&mut self) {
        let moves = self.round.move_count;
        let secs = self.round.clock.elapsed_secs();
        let improvement = self.best.improve(moves, secs);
        log::debug!(
            "round won in {} moves and {}s, improved: {:?}",
            moves,
            secs,
            improvement
        );
        self.best
            .persist(&mut self.store, self.config.mode.pair_count, improvement);
    }
}
