use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bench::{BenchConfig, FailurePolicy};
use crate::data::loader::LoaderOptions;
use crate::data::sampler::SeedPolicy;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no sample sizes configured")]
    NoSampleSizes,
    #[error("iterations_per_size must be at least 1")]
    NoIterations,
    #[error("delimiter {0:?} is not a single ASCII character")]
    BadDelimiter(char),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    #[serde(default = "default_sample_sizes")]
    pub sample_sizes: Vec<usize>,
    #[serde(default = "default_iterations_per_size")]
    pub iterations_per_size: usize,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("dados.csv")
}
fn default_sample_sizes() -> Vec<usize> {
    vec![10_000, 100_000, 1_000_000, 10_000_000]
}
fn default_iterations_per_size() -> usize {
    10
}
fn default_random_seed() -> u64 {
    42
}
fn default_delimiter() -> char {
    ','
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            sample_sizes: default_sample_sizes(),
            iterations_per_size: default_iterations_per_size(),
            random_seed: default_random_seed(),
            seed_policy: SeedPolicy::default(),
            failure_policy: FailurePolicy::default(),
            delimiter: default_delimiter(),
        }
    }
}

impl Config {
    /// Read a TOML file; missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_sizes.is_empty() {
            return Err(ConfigError::NoSampleSizes);
        }
        if self.iterations_per_size == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::BadDelimiter(self.delimiter));
        }
        Ok(())
    }

    pub fn loader(&self) -> LoaderOptions {
        LoaderOptions {
            delimiter: self.delimiter as u8,
        }
    }

    pub fn bench(&self) -> BenchConfig {
        BenchConfig {
            sample_sizes: self.sample_sizes.clone(),
            iterations: self.iterations_per_size,
            seed: self.random_seed,
            seed_policy: self.seed_policy,
            failure_policy: self.failure_policy,
        }
    }
}
