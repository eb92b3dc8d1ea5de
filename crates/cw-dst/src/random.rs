//! Deterministic random number generation.
//!
//! Xoshiro256** seeded from a single `u64`; the same seed yields the same
//! simulated session.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded PRNG that counts how many values it has produced.
pub struct DeterministicRng {
    rng: Xoshiro256StarStar,
    calls_count: u64,
}

impl DeterministicRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        debug_assert!(seed != 0, "Seed should not be zero for better randomness");

        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            calls_count: 0,
        }
    }

    #[must_use]
    pub fn calls_count(&self) -> u64 {
        self.calls_count
    }

    pub fn next_u64(&mut self) -> u64 {
        self.calls_count += 1;
        self.rng.gen()
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.calls_count += 1;
        self.rng.gen_range(range)
    }

    /// Boolean that is true with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0.0, 1.0]"
        );
        self.calls_count += 1;
        self.rng.gen_bool(probability)
    }

    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let index = self.gen_range(0..slice.len());
        slice.get(index)
    }

    /// Derive an independent RNG for a sub-component.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_u64().max(1))
    }
}
