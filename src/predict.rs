use std::io::{self, BufRead, Write};

use crate::regression::LinearFit;

/// Interactive prompt: read x values, print the fitted y.
///
/// Ends on `q` / `quit` / `exit` or end of input. Entries that are not
/// numbers get a message and the prompt repeats.
pub fn prediction_loop<R, W>(line: &LinearFit, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write + ?Sized,
{
    writeln!(out, "\n=== Prediction mode ===")?;
    writeln!(
        out,
        "y = {:.6} + {:.6}x",
        line.intercept, line.slope
    )?;
    writeln!(out, "Enter an x value to predict y ('q' to quit)")?;

    let mut lines = input.lines();
    loop {
        write!(out, "x = ")?;
        out.flush()?;

        let Some(entry) = lines.next().transpose()? else {
            break;
        };
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if matches!(entry, "q" | "quit" | "exit") {
            break;
        }
        match entry.parse::<f64>() {
            Ok(x) => writeln!(out, "-> y = {:.6}", line.predict(x))?,
            Err(_) => writeln!(out, "Invalid entry, type a number or 'q' to quit.")?,
        }
    }

    writeln!(out, "Leaving prediction mode.")
}
