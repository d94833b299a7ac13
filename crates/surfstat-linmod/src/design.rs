//! Design matrix input.

use faer::Mat;
use surfstat_types::{StatsError, StatsResult};

/// The fixed-effects design as supplied by the caller.
#[derive(Debug, Clone)]
pub enum DesignInput {
    /// One predictor column filled with this value.
    Scalar(f64),
    /// A row of predictor values repeated for every observation.
    Row(Vec<f64>),
    /// A full `observations × predictors` matrix.
    Matrix(Mat<f64>),
}

impl DesignInput {
    /// Expands the input to an `observations × predictors` matrix.
    ///
    /// Fails with `DimensionMismatch` when a matrix has the wrong row
    /// count, and with `DegenerateDesign` when the result has no
    /// predictors, non-finite entries, or is entirely zero.
    pub fn resolve(&self, observations: usize) -> StatsResult<Mat<f64>> {
        let x = match self {
            DesignInput::Scalar(value) => Mat::from_fn(observations, 1, |_, _| *value),
            DesignInput::Row(row) => Mat::from_fn(observations, row.len(), |_, j| row[j]),
            DesignInput::Matrix(m) => {
                if m.nrows() != observations {
                    return Err(StatsError::DimensionMismatch(format!(
                        "design has {} observations but response has {observations}",
                        m.nrows()
                    )));
                }
                m.clone()
            }
        };

        let (n, p) = (x.nrows(), x.ncols());
        if n == 0 || p == 0 {
            return Err(StatsError::DegenerateDesign(format!(
                "design matrix of shape {n}×{p} is empty"
            )));
        }

        let mut all_zero = true;
        for j in 0..p {
            for i in 0..n {
                let value = x[(i, j)];
                if !value.is_finite() {
                    return Err(StatsError::DegenerateDesign(format!(
                        "design entry ({i}, {j}) is {value}"
                    )));
                }
                if value != 0.0 {
                    all_zero = false;
                }
            }
        }
        if all_zero {
            return Err(StatsError::DegenerateDesign(format!(
                "design matrix of shape {n}×{p} is entirely zero"
            )));
        }

        Ok(x)
    }
}

impl From<f64> for DesignInput {
    fn from(value: f64) -> Self {
        DesignInput::Scalar(value)
    }
}

impl From<Vec<f64>> for DesignInput {
    fn from(row: Vec<f64>) -> Self {
        DesignInput::Row(row)
    }
}

impl From<Mat<f64>> for DesignInput {
    fn from(m: Mat<f64>) -> Self {
        DesignInput::Matrix(m)
    }
}
