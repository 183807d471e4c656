use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ols_bench::bench::{Benchmark, FailurePolicy};
use ols_bench::config::Config;
use ols_bench::data::loader::load_csv;
use ols_bench::data::sampler::SeedPolicy;
use ols_bench::{predict, regression, report};

#[derive(Parser)]
#[command(
    name = "ols-bench",
    version,
    about = "Benchmark least-squares line fits across sample sizes"
)]
struct Cli {
    #[arg(short, long, help = "TOML file with run parameters")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Two-column x,y input file")]
    file: Option<PathBuf>,

    #[arg(short, long, value_delimiter = ',', help = "Sample sizes, e.g. 1000,10000")]
    sizes: Option<Vec<usize>>,

    #[arg(short, long, help = "Trials per sample size")]
    iterations: Option<usize>,

    #[arg(long, help = "Base seed for subsampling")]
    seed: Option<u64>,

    #[arg(long, value_enum, help = "Reuse the seed for every trial or offset it per trial")]
    seed_policy: Option<SeedPolicy>,

    #[arg(long, value_enum, help = "Abort the run or skip a sample size when a fit fails")]
    on_error: Option<FailurePolicy>,

    #[arg(short, long, help = "Field delimiter")]
    delimiter: Option<char>,

    #[arg(short, long, help = "Fit the full dataset and start an interactive prediction prompt")]
    predict: bool,
}

impl Cli {
    fn into_config(self) -> Result<(Config, bool)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(file) = self.file {
            config.source_path = file;
        }
        if let Some(sizes) = self.sizes {
            config.sample_sizes = sizes;
        }
        if let Some(iterations) = self.iterations {
            config.iterations_per_size = iterations;
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if let Some(policy) = self.seed_policy {
            config.seed_policy = policy;
        }
        if let Some(policy) = self.on_error {
            config.failure_policy = policy;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        config.validate()?;
        Ok((config, self.predict))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let started = Instant::now();

    let (config, predict_mode) = Cli::parse().into_config()?;
    log::debug!("{config:?}");

    let loaded = load_csv(&config.source_path, &config.loader())?;
    let dataset = loaded.dataset;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rows = Benchmark::new(config.bench()).run(&dataset, &mut out)?;
    report::write_table(&mut out, &rows)?;
    out.flush()?;
    log::info!("total time {:.6}s", started.elapsed().as_secs_f64());

    if predict_mode {
        let line = regression::fit(&dataset.x, &dataset.y)
            .context("fitting the full dataset for prediction")?;
        predict::prediction_loop(&line, io::stdin().lock(), &mut out)?;
    }
    Ok(())
}
