use rand::prelude::*;

use crate::*;

/// Uniform randomness used for shuffling.
pub trait RandomSource {
    /// Returns a value uniformly drawn from `0..bound`, `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;
}

/// Seeded small RNG so a round can be replayed from its seed.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Fisher-Yates over the whole slice.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

pub trait IdGenerator {
    fn next_id(&mut self) -> CardId;
}

/// Hands out `c1`, `c2`, ... never repeating for the life of the generator.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> CardId {
        self.last += 1;
        CardId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn sequential_ids_never_repeat() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), CardId(1));
        assert_eq!(ids.next_id(), CardId(2));
        assert_eq!(ids.next_id(), CardId(3));
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut items: Vec<u32> = (0..32).collect();
        shuffle(&mut items, &mut SeededRandom::new(5));
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_positions_are_roughly_uniform() {
        const LEN: usize = 6;
        const SAMPLES: usize = 60_000;

        let mut rng = SeededRandom::new(0xDEC4);
        let mut hits = [[0usize; LEN]; LEN];
        for _ in 0..SAMPLES {
            let mut items: [usize; LEN] = core::array::from_fn(|i| i);
            shuffle(&mut items, &mut rng);
            for (position, &item) in items.iter().enumerate() {
                hits[item][position] += 1;
            }
        }

        let expected = SAMPLES / LEN;
        let tolerance = expected / 10;
        for row in hits {
            for count in row {
                assert!(
                    count.abs_diff(expected) < tolerance,
                    "position count {count} too far from {expected}"
                );
            }
        }
    }
}
