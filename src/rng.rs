//! Experiment-scoped random number generator
//!
//! One generator is created per run, seeded once before any sampling, and
//! threaded explicitly through the partition selector and the trainer.
//! Parallel consumers never share it: they call [`ExperimentRng::fork_seed`]
//! once and derive one ChaCha stream per worker from that base seed.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed-once generator for a single experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentRng {
    seed: Option<u64>,
    inner: ChaCha8Rng,
}

impl ExperimentRng {
    /// Create a generator from an optional seed.
    ///
    /// `None` seeds from OS entropy and the run is not reproducible.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { seed, inner }
    }

    /// Create a reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// The seed this generator was created with, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw a base seed for deriving independent per-worker streams.
    pub fn fork_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Derive the generator for worker `stream` from a base seed.
    ///
    /// The result depends only on `(base, stream)`, never on scheduling.
    #[must_use]
    pub fn stream(base: u64, stream: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(base);
        rng.set_stream(stream);
        rng
    }
}

impl RngCore for ExperimentRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
