use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the randomness used for tick timing, verdicts and failure narratives.
///
/// This only flavours the presentation and has no security requirement.
pub trait RandomSource {
    /// A value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A value in `low..=high`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64;
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, useful for demos and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}
