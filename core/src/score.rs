use alloc::format;
use alloc::string::{String, ToString};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dumb string key-value persistence for best scores.
pub trait BestScoreStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for &mut S {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    Moves,
    Time,
}

impl Metric {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Moves => "moves",
            Self::Time => "time",
        }
    }

    /// Store key for this metric in a mode with `pair_count` pairs.
    pub fn key(self, pair_count: usize) -> String {
        format!("best.{}.{}", pair_count, self.name())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecord {
    pub best_moves: Option<u32>,
    pub best_time_secs: Option<u32>,
}

/// Which metrics a finished round improved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Improvement {
    pub moves: bool,
    pub time: bool,
}

impl Improvement {
    pub const fn any(self) -> bool {
        self.moves || self.time
    }
}

const fn beats(candidate: u32, best: Option<u32>) -> bool {
    match best {
        Some(best) => candidate < best,
        None => true,
    }
}

impl BestRecord {
    /// Loads the record for a mode, unreadable values count as absent.
    pub fn load(store: &impl BestScoreStore, pair_count: usize) -> Self {
        Self {
            best_moves: load_metric(store, Metric::Moves, pair_count),
            best_time_secs: load_metric(store, Metric::Time, pair_count),
        }
    }

    /// Applies a finished round, only strictly lower values replace a best.
    pub fn improve(&mut self, moves: u32, time_secs: u32) -> Improvement {
        let improvement = Improvement {
            moves: beats(moves, self.best_moves),
            time: beats(time_secs, self.best_time_secs),
        };
        if improvement.moves {
            self.best_moves = Some(moves);
        }
        if improvement.time {
            self.best_time_secs = Some(time_secs);
        }
        improvement
    }

    /// Writes improved metrics back. Failures are logged and otherwise ignored.
    pub fn persist(
        &self,
        store: &mut impl BestScoreStore,
        pair_count: usize,
        improvement: Improvement,
    ) {
        let updates = [
            (improvement.moves, Metric::Moves, self.best_moves),
            (improvement.time, Metric::Time, self.best_time_secs),
        ];
        for (improved, metric, value) in updates {
            let (true, Some(value)) = (improved, value) else {
                continue;
            };
            let key = metric.key(pair_count);
            if let Err(err) = store.set(&key, &value.to_string()) {
                log::error!("Could not save best {} to {}: {}", metric.name(), key, err);
            }
        }
    }
}

fn load_metric(store: &impl BestScoreStore, metric: Metric, pair_count: usize) -> Option<u32> {
    let key = metric.key(pair_count);
    match store.get(&key) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Ignoring unreadable best {} {:?}: {}", metric.name(), raw, err);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::error!("Could not load best {} from {}: {}", metric.name(), key, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl BestScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> core::result::Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn set(&mut self, key: &str, _value: &str) -> core::result::Result<(), StoreError> {
            Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn keys_are_namespaced_by_pair_count() {
        assert_eq!(Metric::Moves.key(8), "best.8.moves");
        assert_eq!(Metric::Time.key(2), "best.2.time");
    }

    #[test]
    fn missing_keys_load_as_no_best() {
        assert_eq!(BestRecord::load(&MemoryStore::new(), 8), BestRecord::default());
    }

    #[test]
    fn loads_stored_decimal_values() {
        let store = MemoryStore::new()
            .with_entry("best.8.moves", "14")
            .with_entry("best.8.time", "73")
            .with_entry("best.4.moves", "5");

        let record = BestRecord::load(&store, 8);
        assert_eq!(record.best_moves, Some(14));
        assert_eq!(record.best_time_secs, Some(73));
        assert_eq!(BestRecord::load(&store, 4).best_time_secs, None);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let store = MemoryStore::new().with_entry("best.8.moves", "lots");
        assert_eq!(BestRecord::load(&store, 8).best_moves, None);
    }

    #[test]
    fn only_strict_improvements_replace_bests() {
        let mut record = BestRecord {
            best_moves: Some(10),
            best_time_secs: Some(40),
        };

        assert_eq!(record.improve(10, 41), Improvement::default());
        assert_eq!(record.best_moves, Some(10));

        let improvement = record.improve(12, 39);
        assert_eq!(improvement, Improvement { moves: false, time: true });
        assert_eq!(record.best_time_secs, Some(39));
        assert_eq!(record.best_moves, Some(10));
    }

    #[test]
    fn first_round_sets_both_bests() {
        let mut record = BestRecord::default();
        assert!(record.improve(30, 120).any());
        assert_eq!(record.best_moves, Some(30));
        assert_eq!(record.best_time_secs, Some(120));
    }

    #[test]
    fn persist_writes_only_improved_metrics() {
        let mut store = MemoryStore::new();
        let record = BestRecord {
            best_moves: Some(9),
            best_time_secs: Some(50),
        };
        record.persist(&mut store, 8, Improvement { moves: true, time: false });

        assert_eq!(store.get("best.8.moves"), Ok(Some("9".to_string())));
        assert_eq!(store.get("best.8.time"), Ok(None));
    }

    #[test]
    fn broken_store_is_not_fatal() {
        let mut store = BrokenStore;
        let mut record = BestRecord::load(&store, 8);
        assert_eq!(record, BestRecord::default());

        let improvement = record.improve(3, 4);
        record.persist(&mut store, 8, improvement);
        assert_eq!(record.best_moves, Some(3));
    }
}
