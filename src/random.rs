//! Cleartext test-data generation for the demo drivers and benchmarks.
//!
//! Grounded in `original_source/util/rand.hpp`'s `RandomVectorGenerator`:
//! a seeded generator producing uniform integer columns in
//! `[min_val, max_val]`. The original is its own reimplementation of a
//! PRNG; this crate instead uses the `rand` dev-dependency directly, the
//! same way the rest of this crate's ambient stack prefers an ecosystem
//! crate over a hand-rolled equivalent wherever the corpus reaches for one
//! (`other_examples/manifests/richajaindce-raw-ipa/Cargo.toml` is an actual
//! MPC crate that does the same for its test fixtures).
//!
//! This lives in the library (not under `tests/` or `dev-dependencies`
//! only) because the `bin/` demo drivers also need it to synthesize query
//! inputs, mirroring how the original's query drivers (`exp/q3.cpp`,
//! `exp/q8.cpp`) call `RandomVectorGenerator` directly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A seeded source of uniform integer columns and flag vectors, standing
/// in for the secret inputs a real two-party session would load from each
/// party's private dataset.
pub struct RelationSampler {
    rng: StdRng,
}

impl RelationSampler {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// `size` uniform integers in `[min_val, max_val]` (inclusive), as
    /// `original_source/util/rand.hpp`'s `generate` does.
    pub fn column(&mut self, size: usize, min_val: i64, max_val: i64) -> Vec<i64> {
        (0..size).map(|_| self.rng.gen_range(min_val..=max_val)).collect()
    }

    /// `size` flags, each live with probability `live_fraction`.
    pub fn flags(&mut self, size: usize, live_fraction: f64) -> Vec<bool> {
        (0..size).map(|_| self.rng.gen_bool(live_fraction.clamp(0.0, 1.0))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_values_stay_within_bounds() {
        let mut sampler = RelationSampler::new(42);
        let column = sampler.column(200, 10, 20);
        assert_eq!(column.len(), 200);
        assert!(column.iter().all(|&v| (10..=20).contains(&v)));
    }

    #[test]
    fn same_seed_is_reproducible() {
        let mut a = RelationSampler::new(7);
        let mut b = RelationSampler::new(7);
        assert_eq!(a.column(50, 0, 1000), b.column(50, 0, 1000));
    }
}
