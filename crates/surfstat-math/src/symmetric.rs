//! Eigenvalue helpers for small symmetric matrices.

use faer::{Mat, MatRef, Side};
use surfstat_types::constants::MACHINE_EPSILON;
use surfstat_types::{StatsError, StatsResult};

/// Eigenvalues of a symmetric matrix (only the lower triangle is read).
pub fn symmetric_eigenvalues(m: MatRef<'_, f64>) -> StatsResult<Vec<f64>> {
    let n = m.nrows();
    if n == 0 {
        return Ok(Vec::new());
    }
    let eig = m
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| StatsError::Decomposition(format!("eigendecomposition of {n}×{n}: {e:?}")))?;
    let diag = eig.S();
    Ok((0..n).map(|i| diag[i]).collect())
}

/// Determinant of a symmetric matrix as the product of its eigenvalues.
pub fn symmetric_determinant(m: MatRef<'_, f64>) -> StatsResult<f64> {
    Ok(symmetric_eigenvalues(m)?.iter().product())
}

/// Eigenvalues of `E⁻¹·H` for symmetric `E` (positive definite) and `H`.
///
/// Solved as the symmetric problem `E^{-1/2}·H·E^{-1/2}`. Returns `None`
/// when `E` is not numerically positive definite. Values are sorted descending.
pub fn whitened_eigenvalues(
    e: MatRef<'_, f64>,
    h: MatRef<'_, f64>,
) -> StatsResult<Option<Vec<f64>>> {
    let n = e.nrows();
    if h.nrows() != n || h.ncols() != n || e.ncols() != n {
        return Err(StatsError::DimensionMismatch(format!(
            "whitening needs square matrices of equal size, got {}×{} and {}×{}",
            e.nrows(),
            e.ncols(),
            h.nrows(),
            h.ncols()
        )));
    }
    if n == 0 {
        return Ok(Some(Vec::new()));
    }

    let eig = e
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| StatsError::Decomposition(format!("eigendecomposition of {n}×{n}: {err:?}")))?;
    let lambda = eig.S();
    let q = eig.U();

    let lambda_max = (0..n).map(|i| lambda[i]).fold(0.0_f64, f64::max);
    let tol = lambda_max * (n as f64) * MACHINE_EPSILON;

    let mut inv_sqrt = Vec::with_capacity(n);
    for i in 0..n {
        let l = lambda[i];
        if l <= tol || !l.is_finite() {
            return Ok(None);
        }
        inv_sqrt.push(1.0 / l.sqrt());
    }

    // W = Q·diag(λ^{-1/2})·Qᵀ
    let w = Mat::from_fn(n, n, |i, j| {
        (0..n).map(|r| q[(i, r)] * inv_sqrt[r] * q[(j, r)]).sum::<f64>()
    });
    let wh = w.as_ref() * h;
    let m = wh.as_ref() * w.as_ref();

    // Symmetrize against round-off before the symmetric solver.
    let m = Mat::from_fn(n, n, |i, j| 0.5 * (m[(i, j)] + m[(j, i)]));

    let mut values = symmetric_eigenvalues(m.as_ref())?;
    values.sort_by(|a, b| b.total_cmp(a));
    Ok(Some(values))
}
