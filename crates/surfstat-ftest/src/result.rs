//! The comparison result record.

use faer::Mat;
use surfstat_linmod::FittedModel;
use surfstat_mesh::{Mesh, MeshCarrier};

/// Output of [`crate::compare`].
#[derive(Debug, Clone)]
pub struct FTestResult {
    /// F statistic per vertex. NaN where the full model's SSE is degenerate.
    pub f: Vec<f64>,
    /// `(numerator, denominator)` degrees of freedom.
    pub df: (f64, f64),
    /// Roy's largest roots, `min(k, q) × vertices`, descending per column.
    /// `None` for univariate responses.
    pub roy: Option<Mat<f64>>,
    /// A copy of the full (smaller df) model, with the mesh and `resl`
    /// of whichever input carried them.
    pub full: FittedModel,
}

impl FTestResult {
    #[inline]
    pub fn vertices(&self) -> usize {
        self.f.len()
    }

    /// Number of response components `k`.
    #[inline]
    pub fn components(&self) -> usize {
        self.full.components()
    }

    /// Full-model coefficients, one `predictors × vertices` matrix per component.
    #[inline]
    pub fn effect(&self) -> &[Mat<f64>] {
        &self.full.coef
    }

    /// Full-model residual standard deviation of component `j`.
    pub fn residual_sd(&self, j: usize) -> Vec<f64> {
        self.full.residual_sd(j)
    }

    #[inline]
    pub fn resl(&self) -> Option<&Mat<f64>> {
        self.full.resl.as_ref()
    }
}

impl MeshCarrier for FTestResult {
    fn mesh(&self) -> Option<&Mesh> {
        self.full.mesh.as_deref()
    }
}
