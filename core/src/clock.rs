use crate::Millis;

/// Playtime measured from the instant play began.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    started_at: Option<Millis>,
    elapsed_secs: u32,
}

impl Clock {
    pub fn start(&mut self, now: Millis) {
        self.started_at = Some(now);
        self.elapsed_secs = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    /// Last sampled value, what the player currently sees.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Re-samples elapsed whole seconds. Returns `true` when the shown value changed.
    pub fn sample(&mut self, now: Millis) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let secs: u32 = (now.saturating_sub(started_at) / 1000)
            .try_into()
            .unwrap_or(u32::MAX);
        let changed = secs != self.elapsed_secs;
        self.elapsed_secs = secs;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstarted_clock_stays_at_zero() {
        let mut clock = Clock::default();
        assert!(!clock.sample(5_000));
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn samples_whole_seconds_since_start() {
        let mut clock = Clock::default();
        clock.start(1_000);

        assert!(!clock.sample(1_999));
        assert!(clock.sample(2_000));
        assert_eq!(clock.elapsed_secs(), 1);
        assert!(clock.sample(126_250));
        assert_eq!(clock.elapsed_secs(), 125);
    }

    #[test]
    fn sample_before_start_instant_is_zero() {
        let mut clock = Clock::default();
        clock.start(10_000);
        clock.sample(9_000);
        assert_eq!(clock.elapsed_secs(), 0);
    }
}
