//! RNG ownership and seeding.
//!
//! The sampler treats randomness as an injected, seedable capability rather
//! than reaching for thread-local randomness on every draw (spec's generator
//! must be "seedable and reproducibly copyable"). `ChaCha8Rng` gives a
//! concrete, portable, seedable generator; `rand::Rng` supplies the uniform
//! real/integer draws the sampler needs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The sampler's owned random source.
#[derive(Debug, Clone)]
pub struct SamplerRng {
    inner: ChaCha8Rng,
}

impl SamplerRng {
    /// Seeds from a fixed 64-bit seed, for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from the OS entropy source, for runs with no explicit seed.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Draws a uniform real in `[0, bound)`. `bound` must be positive.
    pub fn uniform_below(&mut self, bound: f64) -> f64 {
        debug_assert!(bound > 0.0);
        self.inner.gen_range(0.0..bound)
    }

    /// Draws a uniform real in `[0, 1)`.
    pub fn uniform_unit(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }

    /// Draws a uniform index in `[0, bound)`. `bound` must be positive.
    pub fn uniform_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        self.inner.gen_range(0..bound)
    }

    /// Draws a fresh 64-bit seed from this generator, used by `copy` when no
    /// explicit seed is supplied.
    pub fn draw_seed(&mut self) -> u64 {
        self.inner.gen()
    }
}
