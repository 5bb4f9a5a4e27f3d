//! Placeholder metrics for runs without a real metrics source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::aggregate::KeywordSet;
use crate::domain::model::KeywordRecord;

pub const MIN_SEARCH_VOLUME: u64 = 100;
pub const MAX_SEARCH_VOLUME: u64 = 10_000;

/// Assigns random search volume and competition to every keyword.
///
/// A fixed `seed` makes the assignment reproducible; without one the
/// generator is seeded from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticMetrics {
    seed: Option<u64>,
}

impl SyntheticMetrics {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn assign(&self, keywords: &KeywordSet) -> Vec<KeywordRecord> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        assign_with(&mut rng, keywords)
    }
}

/// Samples metrics with the given generator, visiting keywords in sorted order.
pub fn assign_with<R: Rng>(rng: &mut R, keywords: &KeywordSet) -> Vec<KeywordRecord> {
    keywords
        .sorted()
        .into_iter()
        .map(|keyword| {
            let search_volume = rng.gen_range(MIN_SEARCH_VOLUME..=MAX_SEARCH_VOLUME);
            let competition = round_to_hundredths(rng.gen_range(0.0..=1.0));
            KeywordRecord::new(keyword, search_volume, competition)
        })
        .collect()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
