use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ByteRecord, ErrorKind, ReaderBuilder, Trim};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Options / results
// ---------------------------------------------------------------------------

/// How to tokenize the input file.
#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    /// Field delimiter, `,` unless configured otherwise.
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Row counters collected while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records the tokenizer produced, header included.
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// A cleaned dataset together with what was thrown away to get it.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    pub stats: LoadStats,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a two-column `x,y` file.
///
/// Rows that do not hold exactly two finite numbers are dropped, which also
/// takes care of an optional header line. Only I/O failures are errors.
pub fn load_csv(path: &Path, options: &LoaderOptions) -> Result<Loaded> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let loaded =
        load_reader(file, options).with_context(|| format!("reading {}", path.display()))?;

    log::info!(
        "{}: kept {} rows, dropped {} (header included)",
        path.display(),
        loaded.stats.rows_kept,
        loaded.stats.rows_dropped
    );
    Ok(loaded)
}

/// Same as [`load_csv`] but over any reader.
pub fn load_reader<R: Read>(reader: R, options: &LoaderOptions) -> Result<Loaded> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut stats = LoadStats::default();
    let mut record = ByteRecord::new();

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                stats.rows_read += 1;
                match parse_row(&record) {
                    Some((xv, yv)) => {
                        x.push(xv);
                        y.push(yv);
                        stats.rows_kept += 1;
                    }
                    None => {
                        log::trace!("dropping row {}: {record:?}", stats.rows_read);
                        stats.rows_dropped += 1;
                    }
                }
            }
            Err(err) => {
                if let ErrorKind::Io(_) = err.kind() {
                    return Err(err).context("reading delimited input");
                }
                stats.rows_read += 1;
                stats.rows_dropped += 1;
                log::trace!("dropping malformed record: {err}");
            }
        }
    }

    Ok(Loaded {
        dataset: Dataset { x, y },
        stats,
    })
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(record: &ByteRecord) -> Option<(f64, f64)> {
    if record.len() != 2 {
        return None;
    }
    let x = parse_field(record.get(0)?)?;
    let y = parse_field(record.get(1)?)?;
    Some((x, y))
}

fn parse_field(bytes: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
