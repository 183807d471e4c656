use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// True line the generated points scatter around.
const INTERCEPT: f64 = 2.0;
const SLOPE: f64 = 3.5;

#[derive(Parser)]
#[command(
    name = "generate_sample",
    about = "Write an x,y file along y = 2 + 3.5x with optional uniform noise"
)]
struct Cli {
    /// Output CSV path.
    output: PathBuf,

    /// Number of rows.
    count: u64,

    #[arg(short, long, default_value_t = 0.0, help = "Noise amplitude, y gets ±noise")]
    noise: f64,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if !(cli.noise.is_finite() && cli.noise >= 0.0) {
        bail!("noise must be a non-negative number, got {}", cli.noise);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    writer.write_record(["x", "y"])?;

    for i in 0..cli.count {
        // x grows in steps of 0.1
        let x = i as f64 / 10.0;
        let jitter = if cli.noise > 0.0 {
            rng.random_range(-cli.noise..=cli.noise)
        } else {
            0.0
        };
        let y = INTERCEPT + SLOPE * x + jitter;
        writer.write_record([format!("{x:.6}"), format!("{y:.6}")])?;
    }
    writer.flush()?;

    log::info!("seed {}", cli.seed);
    println!(
        "Wrote {} rows to {} (noise = {:.2})",
        cli.count,
        cli.output.display(),
        cli.noise
    );
    Ok(())
}
