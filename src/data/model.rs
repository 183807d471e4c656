use thiserror::Error;

// ---------------------------------------------------------------------------
// DatasetError
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
}

// ---------------------------------------------------------------------------
// Dataset – the cleaned two-column input
// ---------------------------------------------------------------------------

/// Paired predictor / response columns as loaded from disk.
///
/// Both columns always have the same length and only hold finite values;
/// the loader drops any row that would break this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Predictor column.
    pub x: Vec<f64>,
    /// Response column – same length as `x`.
    pub y: Vec<f64>,
}

impl Dataset {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (x, y) = pairs.into_iter().unzip();
        Self { x, y }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` rows in load order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Sample – the rows one trial fits
// ---------------------------------------------------------------------------

/// A subset of a [`Dataset`] drawn for a single trial.
///
/// `indices[i]` is the source row that `x[i]` / `y[i]` came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub indices: Vec<usize>,
}

impl Sample {
    /// The whole dataset, in load order.
    pub fn full(dataset: &Dataset) -> Self {
        Self {
            x: dataset.x.clone(),
            y: dataset.y.clone(),
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Gather the given source rows, keeping the order of `indices`.
    pub fn gather(dataset: &Dataset, indices: Vec<usize>) -> Self {
        let x = indices.iter().map(|&i| dataset.x[i]).collect();
        let y = indices.iter().map(|&i| dataset.y[i]).collect();
        Self { x, y, indices }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
