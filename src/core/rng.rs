//! Deterministic random number generation for match setup.
//!
//! The only randomness the core itself needs is deck shuffling at load
//! time. ChaCha8 keeps this deterministic per match seed, which makes
//! replays and tests reproducible.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by one match.
#[derive(Clone, Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
}

impl MatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
