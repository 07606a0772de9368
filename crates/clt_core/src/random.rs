//! Seeded uniform random source
//!
//! All randomness in a run flows through one [`RandomSource`] passed by
//! mutable reference, so a fixed seed reproduces the run exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Odd constant separating the child seeds of consecutive fork indices
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Explicit PRNG context: the generator, the seed it came from, and the
/// number of draws taken so far
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
    draws: u64,
}

impl RandomSource {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Next value from the uniform distribution on `[0, 1)`
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.rng.random::<f64>()
    }

    /// Independent child stream number `index`.
    ///
    /// The child depends only on this source's seed and `index`, never on how
    /// many draws the parent has made.
    #[must_use]
    pub fn fork(&self, index: u64) -> Self {
        Self::from_seed(self.seed ^ index.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::from_seed(1234);
        let mut b = RandomSource::from_seed(1234);
        let xs: Vec<f64> = (0..100).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..100).map(|_| b.uniform()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.draws(), 100);
    }

    #[test]
    fn test_draws_are_in_unit_interval() {
        let mut source = RandomSource::from_seed(7);
        for _ in 0..10_000 {
            let u = source.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_fork_is_independent_of_parent_progress() {
        let mut parent = RandomSource::from_seed(99);
        let mut early = parent.fork(3);
        for _ in 0..50 {
            parent.uniform();
        }
        let mut late = parent.fork(3);
        assert_eq!(early.uniform(), late.uniform());
        assert_eq!(late.seed(), early.seed());
        assert_ne!(parent.fork(3).seed(), parent.fork(4).seed());
        assert_ne!(parent.fork(0).seed(), parent.seed());
    }

    #[test]
    fn test_fork_seed_is_offset_from_parent() {
        let parent = RandomSource::from_seed(1234);
        assert_eq!(parent.fork(0).seed(), 1234 ^ GOLDEN_GAMMA);
        assert_eq!(parent.fork(2).seed(), 1234 ^ GOLDEN_GAMMA.wrapping_mul(3));

        let mut a = parent.fork(0);
        let mut b = parent.fork(1);
        let xs: Vec<f64> = (0..20).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..20).map(|_| b.uniform()).collect();
        assert_ne!(xs, ys);
    }
}
