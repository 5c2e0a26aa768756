//! Placement - Random source for the initial position of new sub-windows

/// Source of initial-placement coordinates
pub trait RandomSource {
    /// Uniform integer in the half-open range `lo..hi` (`hi > lo`)
    fn next_in_range(&mut self, lo: i32, hi: i32) -> i32;
}

/// `fastrand`-backed source; seed it for deterministic placement
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: fastrand::Rng,
}

impl SeededRandom {
    pub fn new() -> Self {
        Self { rng: fastrand::Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed) }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.i32(lo..hi)
    }
}

/// Always yields the low end of the range, so every new window opens at
/// `(cascade_offset, cascade_offset)`. Useful for embedders that want
/// predictable placement without a seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedPlacement;

impl RandomSource for FixedPlacement {
    fn next_in_range(&mut self, lo: i32, _hi: i32) -> i32 {
        lo
    }
}
