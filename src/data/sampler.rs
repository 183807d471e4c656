use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, Sample};

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// How the generator for each trial is seeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Every trial reuses the base seed and so draws the same subset.
    Fixed,
    /// Trial `i` uses `seed + i`.
    #[default]
    PerTrial,
}

/// Build the generator for trial `trial` (0-based) of a sample size.
pub fn rng_for_trial(seed: u64, policy: SeedPolicy, trial: usize) -> ChaCha8Rng {
    let seed = match policy {
        SeedPolicy::Fixed => seed,
        SeedPolicy::PerTrial => seed.wrapping_add(trial as u64),
    };
    ChaCha8Rng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Draw `n` distinct rows from `dataset` and sort them by ascending x.
///
/// With `n` absent or not smaller than the dataset the whole dataset is
/// returned untouched, in load order.
pub fn draw_sample<R: Rng + ?Sized>(dataset: &Dataset, n: Option<usize>, rng: &mut R) -> Sample {
    let len = dataset.len();
    let n = match n {
        Some(n) if n < len => n,
        _ => return Sample::full(dataset),
    };

    let mut indices = index::sample(rng, len, n).into_vec();
    indices.sort_by(|&a, &b| dataset.x[a].total_cmp(&dataset.x[b]));
    Sample::gather(dataset, indices)
}
