//! Edge-wise residual roughness used for smoothness (resel) estimation.

use faer::Mat;
use surfstat_math::PackedSymmetric;
use surfstat_mesh::EdgeList;

/// Computes `resl`, an `edges × components` matrix.
///
/// For component `j`, residuals are divided by `sqrt(SSE_jj)` at each
/// vertex; entry `(e, j)` is the sum over observations of the squared
/// difference of these normalized residuals at the two ends of edge `e`.
/// A vertex with zero SSE gives non-finite values on its edges.
pub fn edge_roughness(residuals: &[Mat<f64>], sse: &PackedSymmetric, edges: &EdgeList) -> Mat<f64> {
    let k = residuals.len();
    let mut resl = Mat::zeros(edges.len(), k);

    for (j, r) in residuals.iter().enumerate() {
        let norm: Vec<f64> = sse.diagonal(j).into_iter().map(f64::sqrt).collect();
        let n = r.nrows();
        for (e, &[a, b]) in edges.iter().enumerate() {
            let (a, b) = (a as usize, b as usize);
            let mut s = 0.0;
            for i in 0..n {
                let d = r[(i, a)] / norm[a] - r[(i, b)] / norm[b];
                s += d * d;
            }
            resl[(e, j)] = s;
        }
    }

    resl
}
