use serde::{Deserialize, Serialize};

use crate::*;

/// UX tuning constants for a round, all in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Delay between consecutive card reveals during the preview.
    pub stagger_ms: Millis,
    /// Pause after the last preview reveal before the countdown shows.
    pub reveal_settle_ms: Millis,
    /// First value shown by the countdown.
    pub countdown_from: u8,
    pub countdown_step_ms: Millis,
    pub match_feedback_ms: Millis,
    pub mismatch_feedback_ms: Millis,
    pub clock_sample_ms: Millis,
}

impl Timing {
    /// Time from the start of a round until the countdown appears.
    pub const fn reveal_duration(&self, card_count: usize) -> Millis {
        (card_count as Millis)
            .saturating_mul(self.stagger_ms)
            .saturating_add(self.reveal_settle_ms)
    }

    pub const fn countdown_duration(&self) -> Millis {
        (self.countdown_from as Millis).saturating_mul(self.countdown_step_ms)
    }

    /// Preview plus countdown, or `None` if it overflows.
    pub fn round_lead_in(&self, card_count: usize) -> Option<Millis> {
        (card_count as Millis)
            .checked_mul(self.stagger_ms)?
            .checked_add(self.reveal_settle_ms)?
            .checked_add((self.countdown_from as Millis).checked_mul(self.countdown_step_ms)?)
    }

    pub const fn feedback_delay(&self, is_match: bool) -> Millis {
        if is_match {
            self.match_feedback_ms
        } else {
            self.mismatch_feedback_ms
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            stagger_ms: 80,
            reveal_settle_ms: 300,
            countdown_from: 3,
            countdown_step_ms: 1000,
            match_feedback_ms: 300,
            mismatch_feedback_ms: 700,
            clock_sample_ms: 250,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: Mode,
    pub timing: Timing,
}

impl GameConfig {
    pub fn new(mode: Mode, timing: Timing) -> Self {
        Self { mode, timing }
    }

    pub fn validate(&self) -> Result<()> {
        if self.mode.pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        if self.mode.pair_count > SYMBOLS.len() {
            return Err(ConfigError::TooManyPairs {
                requested: self.mode.pair_count,
                available: SYMBOLS.len(),
            });
        }
        if self.mode.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.timing.match_feedback_ms > self.timing.mismatch_feedback_ms {
            return Err(ConfigError::FeedbackDelayOrder);
        }
        if self.timing.clock_sample_ms == 0 {
            return Err(ConfigError::ClockSampleZero);
        }
        let card_count = self.mode.pair_count * 2;
        if self.timing.round_lead_in(card_count).is_none() {
            return Err(ConfigError::TimingOverflow { card_count });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_pair_count_beyond_catalog() {
        let config = GameConfig::new(Mode::new("huge", 9, 6), Timing::default());
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyPairs {
                requested: 9,
                available: 8
            })
        );
    }

    #[test]
    fn rejects_empty_board() {
        let config = GameConfig::new(Mode::new("empty", 0, 4), Timing::default());
        assert_eq!(config.validate(), Err(ConfigError::NoPairs));

        let config = GameConfig::new(Mode::new("flat", 2, 0), Timing::default());
        assert_eq!(config.validate(), Err(ConfigError::NoColumns));
    }

    #[test]
    fn match_feedback_must_not_outlast_mismatch_feedback() {
        let timing = Timing {
            match_feedback_ms: 800,
            ..Timing::default()
        };
        let config = GameConfig::new(Mode::default(), timing);
        assert_eq!(config.validate(), Err(ConfigError::FeedbackDelayOrder));
    }

    #[test]
    fn rejects_zero_clock_interval() {
        let timing = Timing {
            clock_sample_ms: 0,
            ..Timing::default()
        };
        let config = GameConfig::new(Mode::default(), timing);
        assert_eq!(config.validate(), Err(ConfigError::ClockSampleZero));
    }

    #[test]
    fn rejects_timing_that_overflows_the_lead_in() {
        let timing = Timing {
            stagger_ms: u64::MAX / 2,
            ..Timing::default()
        };
        let config = GameConfig::new(Mode::default(), timing);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TimingOverflow { card_count: 16 })
        );

        let timing = Timing {
            countdown_step_ms: u64::MAX,
            ..Timing::default()
        };
        let config = GameConfig::new(Mode::default(), timing);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TimingOverflow { card_count: 16 })
        );
        assert_eq!(timing.countdown_duration(), u64::MAX);
    }

    #[test]
    fn reveal_duration_covers_every_card_plus_settle() {
        let timing = Timing::default();
        assert_eq!(timing.reveal_duration(16), 16 * 80 + 300);
        assert_eq!(timing.countdown_duration(), 3000);
        assert!(timing.feedback_delay(true) < timing.feedback_delay(false));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"timing": {"stagger_ms": 10}}"#).unwrap();
        assert_eq!(config.timing.stagger_ms, 10);
        assert_eq!(config.timing.mismatch_feedback_ms, 700);
        assert_eq!(config.mode, Mode::default());
    }
}
