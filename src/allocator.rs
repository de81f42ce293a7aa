use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;

/// Draws synthetic process sizes from an owned, seeded random stream
pub struct ProcessSizeGenerator {
    rng: StdRng,
    unit_size: u32,
    min_units: u32,
    max_units: u32,
}

impl ProcessSizeGenerator {
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        ProcessSizeGenerator {
            rng: StdRng::seed_from_u64(seed),
            unit_size: config.unit_size,
            min_units: config.min_units,
            max_units: config.max_units,
        }
    }

    /// Next process size: `k * unit_size` with `k` uniform in `min_units..=max_units`
    pub fn next_size(&mut self) -> u32 {
        let units = self.rng.random_range(self.min_units..=self.max_units);
        units * self.unit_size
    }
}

/// Number of whole pages needed to hold `size`
#[inline]
pub fn pages_needed(size: u32, page_size: u32) -> usize {
    size.div_ceil(page_size) as usize
}
