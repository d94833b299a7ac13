//! Response arrays: observations × vertices × components.

use faer::{Mat, MatRef};
use surfstat_types::{StatsError, StatsResult};

/// Measured values, one `observations × vertices` matrix per component.
#[derive(Debug, Clone)]
pub struct Response {
    components: Vec<Mat<f64>>,
}

impl Response {
    /// A single vertex measured across observations (`n × 1`).
    pub fn from_vector(values: &[f64]) -> Self {
        Self {
            components: vec![Mat::from_fn(values.len(), 1, |i, _| values[i])],
        }
    }

    /// A univariate response (`n × v`, one component).
    pub fn univariate(y: Mat<f64>) -> Self {
        Self {
            components: vec![y],
        }
    }

    /// A multivariate response; every component must share one shape.
    pub fn multivariate(components: Vec<Mat<f64>>) -> StatsResult<Self> {
        let first = components.first().ok_or_else(|| {
            StatsError::DimensionMismatch("multivariate response has no components".into())
        })?;
        let (n, v) = (first.nrows(), first.ncols());
        for (j, c) in components.iter().enumerate() {
            if c.nrows() != n || c.ncols() != v {
                return Err(StatsError::DimensionMismatch(format!(
                    "component {j} has shape {}×{} but component 0 has {n}×{v}",
                    c.nrows(),
                    c.ncols()
                )));
            }
        }
        Ok(Self { components })
    }

    /// Builds a response from `f(observation, vertex, component)`.
    pub fn from_fn(
        observations: usize,
        vertices: usize,
        components: usize,
        f: impl Fn(usize, usize, usize) -> f64,
    ) -> Self {
        Self {
            components: (0..components)
                .map(|j| Mat::from_fn(observations, vertices, |i, v| f(i, v, j)))
                .collect(),
        }
    }

    #[inline]
    pub fn observations(&self) -> usize {
        self.components.first().map_or(0, |c| c.nrows())
    }

    #[inline]
    pub fn vertices(&self) -> usize {
        self.components.first().map_or(0, |c| c.ncols())
    }

    /// Number of components `k` (1 for univariate data).
    #[inline]
    pub fn components(&self) -> usize {
        self.components.len()
    }

    /// The `observations × vertices` matrix of component `j`.
    #[inline]
    pub fn component(&self, j: usize) -> MatRef<'_, f64> {
        self.components[j].as_ref()
    }
}
