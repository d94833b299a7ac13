//! The fitted linear model record.

use std::sync::Arc;

use faer::Mat;
use surfstat_math::PackedSymmetric;
use surfstat_mesh::{Mesh, MeshCarrier};
use surfstat_types::{StatsError, StatsResult};

/// A fixed-effects linear model fitted at every vertex.
///
/// Produced once by [`crate::fit`] and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct FittedModel {
    /// Design matrix, `observations × predictors`.
    pub x: Mat<f64>,
    /// Residual degrees of freedom, `observations − rank(X)`.
    pub df: usize,
    /// Coefficients, one `predictors × vertices` matrix per component.
    pub coef: Vec<Mat<f64>>,
    /// Packed residual cross-products, `k·(k+1)/2 × vertices`.
    pub sse: PackedSymmetric,
    /// The mesh the model was fitted on, shared with the caller.
    pub mesh: Option<Arc<Mesh>>,
    /// Normalized squared residual differences, `edges × components`.
    pub resl: Option<Mat<f64>>,
}

impl FittedModel {
    /// Assembles a model from precomputed parts.
    ///
    /// Checks that `coef` has one matrix per component of `sse`, each with
    /// one row per design column and one column per vertex, and that
    /// `df` does not exceed the number of observations.
    pub fn from_parts(
        x: Mat<f64>,
        df: usize,
        coef: Vec<Mat<f64>>,
        sse: PackedSymmetric,
    ) -> StatsResult<Self> {
        if coef.len() != sse.components() {
            return Err(StatsError::DimensionMismatch(format!(
                "coef has {} components but SSE packs {}",
                coef.len(),
                sse.components()
            )));
        }
        for (j, c) in coef.iter().enumerate() {
            if c.nrows() != x.ncols() || c.ncols() != sse.columns() {
                return Err(StatsError::DimensionMismatch(format!(
                    "coef component {j} has shape {}×{}, expected {}×{}",
                    c.nrows(),
                    c.ncols(),
                    x.ncols(),
                    sse.columns()
                )));
            }
        }
        if df > x.nrows() {
            return Err(StatsError::DimensionMismatch(format!(
                "df {df} exceeds {} observations",
                x.nrows()
            )));
        }
        Ok(Self {
            x,
            df,
            coef,
            sse,
            mesh: None,
            resl: None,
        })
    }

    /// Attaches a mesh and its edge statistics.
    pub fn with_mesh(mut self, mesh: Arc<Mesh>, resl: Mat<f64>) -> StatsResult<Self> {
        if resl.ncols() != self.components() {
            return Err(StatsError::DimensionMismatch(format!(
                "resl has {} columns but the model has {} components",
                resl.ncols(),
                self.components()
            )));
        }
        self.mesh = Some(mesh);
        self.resl = Some(resl);
        Ok(self)
    }

    #[inline]
    pub fn observations(&self) -> usize {
        self.x.nrows()
    }

    #[inline]
    pub fn predictors(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn vertices(&self) -> usize {
        self.sse.columns()
    }

    /// Number of response components `k`.
    #[inline]
    pub fn components(&self) -> usize {
        self.sse.components()
    }

    #[inline]
    pub fn is_multivariate(&self) -> bool {
        self.components() > 1
    }

    /// Residual standard deviation `sqrt(SSE_jj / df)` of component `j`.
    ///
    /// NaN everywhere when `df` is zero.
    pub fn residual_sd(&self, j: usize) -> Vec<f64> {
        let df = self.df as f64;
        self.sse
            .diagonal(j)
            .into_iter()
            .map(|s| if df > 0.0 { (s / df).sqrt() } else { f64::NAN })
            .collect()
    }
}

impl MeshCarrier for FittedModel {
    fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_deref()
    }
}
