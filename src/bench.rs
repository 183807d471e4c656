use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;
use crate::data::sampler::{draw_sample, rng_for_trial, SeedPolicy};
use crate::regression::{self, FitError, FitResult};
use crate::report::{self, ReportRow};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when a trial cannot be fitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the whole run and propagate the error.
    #[default]
    Abort,
    /// Leave the sample size out of the report and carry on.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Sample sizes, processed in this order.
    pub sample_sizes: Vec<usize>,
    pub iterations: usize,
    pub seed: u64,
    pub seed_policy: SeedPolicy,
    pub failure_policy: FailurePolicy,
}

// ---------------------------------------------------------------------------
// TrialBatch – raw results for one sample size
// ---------------------------------------------------------------------------

/// Per-trial results for a single sample size, reduced to a [`ReportRow`].
#[derive(Debug, Default)]
pub struct TrialBatch {
    results: Vec<FitResult>,
    times: Vec<Duration>,
}

impl TrialBatch {
    pub fn with_capacity(trials: usize) -> Self {
        Self {
            results: Vec::with_capacity(trials),
            times: Vec::with_capacity(trials),
        }
    }

    pub fn push(&mut self, result: FitResult, elapsed: Duration) {
        self.results.push(result);
        self.times.push(elapsed);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Arithmetic means over all trials, or `None` if nothing was recorded.
    pub fn into_row(self, sample_size: usize) -> Option<ReportRow> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let mean = |f: fn(&FitResult) -> f64| self.results.iter().map(f).sum::<f64>() / n;
        let total_secs: f64 = self.times.iter().map(Duration::as_secs_f64).sum();

        Some(ReportRow {
            sample_size,
            mean_intercept: mean(|r| r.intercept),
            mean_slope: mean(|r| r.slope),
            mean_mse: mean(|r| r.mse),
            mean_time: Duration::from_secs_f64(total_secs / n),
        })
    }
}

// ---------------------------------------------------------------------------
// Benchmark driver
// ---------------------------------------------------------------------------

pub struct Benchmark {
    config: BenchConfig,
}

impl Benchmark {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Run every configured sample size against `dataset`.
    ///
    /// Progress lines go to `out`; the returned rows follow the order of
    /// `sample_sizes`, minus any size skipped under [`FailurePolicy::Skip`].
    pub fn run<W: Write + ?Sized>(&self, dataset: &Dataset, out: &mut W) -> Result<Vec<ReportRow>> {
        if self.config.iterations == 0 {
            bail!("iterations per sample size must be at least 1");
        }

        let mut rows = Vec::with_capacity(self.config.sample_sizes.len());
        for &size in &self.config.sample_sizes {
            match self.run_size(dataset, size, out) {
                Ok(row) => rows.push(row),
                Err(err) => {
                    let is_fit_error = err.downcast_ref::<FitError>().is_some();
                    if self.config.failure_policy == FailurePolicy::Skip && is_fit_error {
                        log::warn!("skipping sample size {size}: {err:#}");
                        continue;
                    }
                    return Err(err);
                }
            }
        }
        Ok(rows)
    }

    fn run_size<W: Write + ?Sized>(
        &self,
        dataset: &Dataset,
        size: usize,
        out: &mut W,
    ) -> Result<ReportRow> {
        report::write_size_header(out, size)?;
        if size > dataset.len() {
            log::warn!(
                "sample size {size} exceeds the {} loaded rows, using all of them",
                dataset.len()
            );
        }

        let mut batch = TrialBatch::with_capacity(self.config.iterations);
        for trial in 0..self.config.iterations {
            let mut rng = rng_for_trial(self.config.seed, self.config.seed_policy, trial);
            let sample = draw_sample(dataset, Some(size), &mut rng);
            log::debug!("trial {} drew {} rows", trial + 1, sample.len());

            let started = Instant::now();
            let line = regression::fit(&sample.x, &sample.y)
                .with_context(|| format!("sample size {size}, iteration {}", trial + 1))?;
            let elapsed = started.elapsed();

            let result = line.score(&sample.x, &sample.y);
            report::write_trial_line(out, trial, &result, elapsed)?;
            batch.push(result, elapsed);
        }

        let row = batch
            .into_row(size)
            .with_context(|| format!("no trials recorded for sample size {size}"))?;
        report::write_summary_line(out, &row)?;
        log::info!(
            "n={size}: A={:.6} B={:.6} MSE={:.8} in {:?}",
            row.mean_intercept,
            row.mean_slope,
            row.mean_mse,
            row.mean_time
        );
        Ok(row)
    }
}
