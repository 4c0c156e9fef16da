//! Deterministic random ordering for the `random` sort key.
//!
//! Same seed and same input produce the same order, so a "random" page of
//! results stays stable across repeated calls with one config.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Seeded RNG used by the result processor.
///
/// A ChaCha8 stream from a given seed is the same on every platform.
/// Context seeds come from `FxHasher`, which mixes in word-sized chunks, so
/// `for_context` streams are only fixed per pointer width.
#[derive(Clone, Debug)]
pub struct SortRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SortRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive an independent stream for a named context.
    ///
    /// The same context always yields the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::new(hasher.finish())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
