//! Packed storage for per-vertex symmetric cross-product matrices.
//!
//! A `k × k` symmetric matrix is stored as its `k·(k+1)/2` lower
//! triangle entries (equivalently the upper triangle of the transpose),
//! one column per vertex. Packing is row-major over the triangle:
//!
//! ```text
//! row 0: (0,0)
//! row 1: (1,0) (1,1)
//! row 2: (2,0) (2,1) (2,2)
//! ```
//!
//! so entry `(j1, j2)` with `j2 <= j1` lives at row `j1·(j1+1)/2 + j2`.

use faer::{Mat, MatRef};
use surfstat_types::{StatsError, StatsResult};

/// Per-vertex symmetric matrices in packed triangular layout.
#[derive(Debug, Clone)]
pub struct PackedSymmetric {
    components: usize,
    data: Mat<f64>,
}

/// Number of packed rows for `k` components.
#[inline]
pub fn packed_len(components: usize) -> usize {
    components * (components + 1) / 2
}

/// Packed row of entry `(j1, j2)`; argument order does not matter.
#[inline]
pub fn packed_index(j1: usize, j2: usize) -> usize {
    let (hi, lo) = if j1 >= j2 { (j1, j2) } else { (j2, j1) };
    hi * (hi + 1) / 2 + lo
}

/// Inverts [`packed_len`]: returns `k` if `rows == k·(k+1)/2`.
pub fn components_for_rows(rows: usize) -> Option<usize> {
    let mut k = 0;
    while packed_len(k) < rows {
        k += 1;
    }
    (packed_len(k) == rows && k > 0).then_some(k)
}

impl PackedSymmetric {
    /// Creates zeroed storage for `components` and `columns` vertices.
    pub fn zeros(components: usize, columns: usize) -> Self {
        Self {
            components,
            data: Mat::zeros(packed_len(components), columns),
        }
    }

    /// Wraps an already packed `k·(k+1)/2 × v` matrix.
    pub fn from_rows(data: Mat<f64>) -> StatsResult<Self> {
        let components = components_for_rows(data.nrows()).ok_or_else(|| {
            StatsError::DimensionMismatch(format!(
                "packed symmetric storage needs k·(k+1)/2 rows, got {}",
                data.nrows()
            ))
        })?;
        Ok(Self { components, data })
    }

    /// Builds univariate storage (`k = 1`) from one value per vertex.
    pub fn univariate(values: &[f64]) -> Self {
        Self {
            components: 1,
            data: Mat::from_fn(1, values.len(), |_, j| values[j]),
        }
    }

    /// Number of components `k`.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of vertices (columns).
    #[inline]
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Number of packed rows, `k·(k+1)/2`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Entry `(j1, j2)` of the matrix at `column`.
    #[inline]
    pub fn get(&self, j1: usize, j2: usize, column: usize) -> f64 {
        self.data[(packed_index(j1, j2), column)]
    }

    /// Sets entry `(j1, j2)` (and thereby `(j2, j1)`) at `column`.
    #[inline]
    pub fn set(&mut self, j1: usize, j2: usize, column: usize, value: f64) {
        self.data[(packed_index(j1, j2), column)] = value;
    }

    /// Diagonal entry `(j, j)` for every vertex.
    pub fn diagonal(&self, j: usize) -> Vec<f64> {
        let row = packed_index(j, j);
        (0..self.columns()).map(|c| self.data[(row, c)]).collect()
    }

    /// Unpacks the full symmetric `k × k` matrix at `column`.
    pub fn full_matrix(&self, column: usize) -> Mat<f64> {
        Mat::from_fn(self.components, self.components, |i, j| {
            self.get(i, j, column)
        })
    }

    /// The raw packed matrix.
    pub fn as_mat(&self) -> MatRef<'_, f64> {
        self.data.as_ref()
    }

    /// Copies `block` into the columns starting at `start`.
    pub fn write_columns(&mut self, start: usize, block: &PackedSymmetric) -> StatsResult<()> {
        if block.components != self.components {
            return Err(StatsError::DimensionMismatch(format!(
                "block has {} components, storage has {}",
                block.components, self.components
            )));
        }
        if start + block.columns() > self.columns() {
            return Err(StatsError::DimensionMismatch(format!(
                "block of {} columns at offset {start} exceeds {} columns",
                block.columns(),
                self.columns()
            )));
        }
        for c in 0..block.columns() {
            for r in 0..self.rows() {
                self.data[(r, start + c)] = block.data[(r, c)];
            }
        }
        Ok(())
    }

    /// Entry-wise difference `self − other`.
    pub fn difference(&self, other: &PackedSymmetric) -> StatsResult<Self> {
        if self.components != other.components || self.columns() != other.columns() {
            return Err(StatsError::DimensionMismatch(format!(
                "cannot subtract packed {}×{} from {}×{}",
                other.rows(),
                other.columns(),
                self.rows(),
                self.columns()
            )));
        }
        Ok(Self {
            components: self.components,
            data: Mat::from_fn(self.rows(), self.columns(), |r, c| {
                self.data[(r, c)] - other.data[(r, c)]
            }),
        })
    }
}
