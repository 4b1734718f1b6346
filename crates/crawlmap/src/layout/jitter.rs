//! Tie-break offsets for coincident nodes.
//!
//! When two nodes sit on (almost) the same spot the simulation cannot derive
//! a direction from their separation, so it substitutes a small offset drawn
//! from a [`Jitter`] source. Keeping the source behind a trait lets tests and
//! reproducible runs supply a seeded or fixed sequence.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crawlmap_core::geometry::Point;

/// Smallest component of a jitter offset.
const JITTER_BASE: f32 = 0.1;
/// Width of the uniform range added on top of [`JITTER_BASE`].
const JITTER_SPREAD: f32 = 0.1;

/// Source of separation vectors for coincident node pairs.
pub trait Jitter {
    /// Returns an offset whose components both lie in `[0.1, 0.2)`.
    fn next_offset(&mut self) -> Point;

    /// Rewinds the source to the start of its sequence, if it has one.
    ///
    /// Called at the start of every full layout so that relaying out the
    /// same graph replays the same offsets.
    fn reset(&mut self) {}
}

/// [`Jitter`] backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededJitter {
    seed: Option<u64>,
    rng: StdRng,
}

impl SeededJitter {
    /// Creates a jitter source with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a jitter source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Seeds from `seed` when given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    fn component(&mut self) -> f32 {
        JITTER_BASE + JITTER_SPREAD * self.rng.random::<f32>()
    }
}

impl Jitter for SeededJitter {
    fn next_offset(&mut self) -> Point {
        let x = self.component();
        let y = self.component();
        Point::new(x, y)
    }

    /// Re-seeds from the configured seed. An entropy-seeded source keeps
    /// drawing from its current stream.
    fn reset(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }
}
