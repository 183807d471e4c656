use thiserror::Error;

// ---------------------------------------------------------------------------
// FitError – inputs that have no least-squares line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FitError {
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("need at least 2 points to fit a line, got {n}")]
    TooFewPoints { n: usize },
    #[error("every x equals {value}, slope is undefined")]
    ZeroVariance { value: f64 },
    #[error("coefficients are not finite (intercept {intercept}, slope {slope})")]
    NonFinite { intercept: f64, slope: f64 },
}

// ---------------------------------------------------------------------------
// LinearFit – y = intercept + slope · x
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Mean squared residual of this line over `(x, y)`.
    ///
    /// Callers pass equally long, non-empty columns; an empty input yields NaN.
    pub fn mse(&self, x: &[f64], y: &[f64]) -> f64 {
        let sum: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let err = yi - self.predict(xi);
                err * err
            })
            .sum();
        sum / x.len() as f64
    }

    /// Score this line on the points it was fitted to.
    pub fn score(&self, x: &[f64], y: &[f64]) -> FitResult {
        FitResult {
            intercept: self.intercept,
            slope: self.slope,
            mse: self.mse(x, y),
        }
    }
}

/// Intercept, slope and in-sample MSE of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub intercept: f64,
    pub slope: f64,
    pub mse: f64,
}

/// Closed-form ordinary least squares for a single predictor.
///
/// Sums are taken around the means, which keeps `Sxx` accurate for large x
/// offsets where the textbook `n·Σx² − (Σx)²` form cancels badly.
pub fn fit(x: &[f64], y: &[f64]) -> Result<LinearFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(FitError::TooFewPoints { n });
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(FitError::ZeroVariance { value: x[0] });
    }

    let count = n as f64;
    let mean_x = x.iter().sum::<f64>() / count;
    let mean_y = y.iter().sum::<f64>() / count;

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    // Distinct x values can still underflow to a zero spread.
    if sxx <= 0.0 {
        return Err(FitError::ZeroVariance { value: mean_x });
    }

    // Overflowing sums or a near-zero spread push the ratio out of range.
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(FitError::NonFinite { intercept, slope });
    }
    Ok(LinearFit { intercept, slope })
}

/// Fit and score on the same points.
pub fn score(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    Ok(fit(x, y)?.score(x, y))
}
