use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Preview,
    Countdown,
    Playing,
    Won,
}

/// Inputs that move a round between phases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    RevealHeld,
    CountdownElapsed,
    AllMatched,
}

impl Phase {
    /// Transition table. `None` means the event is not valid in this phase.
    pub const fn next(self, event: PhaseEvent) -> Option<Phase> {
        use Phase::*;
        use PhaseEvent::*;
        match (self, event) {
            (_, Start) => Some(Preview),
            (Preview, RevealHeld) => Some(Countdown),
            (Countdown, CountdownElapsed) => Some(Playing),
            (Playing, AllMatched) => Some(Won),
            _ => None,
        }
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}
