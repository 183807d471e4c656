use std::io::{self, Write};
use std::time::Duration;

use crate::regression::FitResult;

// ---------------------------------------------------------------------------
// ReportRow – one averaged line per sample size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    /// Sample size as requested, even when the dataset was smaller.
    pub sample_size: usize,
    pub mean_intercept: f64,
    pub mean_slope: f64,
    pub mean_mse: f64,
    pub mean_time: Duration,
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

pub fn write_size_header<W: Write + ?Sized>(out: &mut W, sample_size: usize) -> io::Result<()> {
    writeln!(out, "\n--- Testing with {sample_size} points ---")
}

pub fn write_trial_line<W: Write + ?Sized>(
    out: &mut W,
    trial: usize,
    result: &FitResult,
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(out, "Iteration {}...", trial + 1)?;
    writeln!(
        out,
        "  A = {:.6}, B = {:.6}, MSE = {:.8}, Time = {:.6}s",
        result.intercept,
        result.slope,
        result.mse,
        elapsed.as_secs_f64()
    )
}

pub fn write_summary_line<W: Write + ?Sized>(out: &mut W, row: &ReportRow) -> io::Result<()> {
    writeln!(out, "=== Means for {} points ===", row.sample_size)?;
    writeln!(
        out,
        "A = {:.6}, B = {:.6}, MSE = {:.8}, Time = {:.6}s",
        row.mean_intercept,
        row.mean_slope,
        row.mean_mse,
        row.mean_time.as_secs_f64()
    )
}

/// Final tab-separated table, one row per sample size in run order.
pub fn write_table<W: Write + ?Sized>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    writeln!(out, "\n=== Final summary ===")?;
    writeln!(out, "N\tA\tB\tMSE\tTime(s)")?;
    for row in rows {
        writeln!(
            out,
            "{}\t{:.6}\t{:.6}\t{:.8}\t{:.4}",
            row.sample_size,
            row.mean_intercept,
            row.mean_slope,
            row.mean_mse,
            row.mean_time.as_secs_f64()
        )?;
    }
    Ok(())
}
