//! Moore–Penrose pseudo-inverse and numerical rank.
//!
//! Both are read off one thin SVD, `X = U·Σ·Vᵀ`:
//! - `pinv(X) = V·Σ⁺·Uᵀ`, zeroing singular values below `rcond·σ_max`
//! - `rank(X)` counts singular values above `σ_max·max(n, p)·ε`
//!
//! Rank-deficient designs are not an error; they simply reduce the rank.

use faer::{Mat, MatRef};
use surfstat_types::constants::{MACHINE_EPSILON, PINV_RCOND};
use surfstat_types::{StatsError, StatsResult};

/// Pseudo-inverse of a design matrix together with its numerical rank.
#[derive(Debug, Clone)]
pub struct PseudoInverse {
    /// `p × n` pseudo-inverse of the `n × p` input.
    pub pinv: Mat<f64>,
    /// Number of singular values above the rank tolerance.
    pub rank: usize,
}

impl PseudoInverse {
    /// Computes the pseudo-inverse and rank of `x`.
    pub fn compute(x: MatRef<'_, f64>) -> StatsResult<Self> {
        let n = x.nrows();
        let p = x.ncols();

        if n == 0 || p == 0 {
            return Ok(Self {
                pinv: Mat::zeros(p, n),
                rank: 0,
            });
        }

        let svd = x
            .thin_svd()
            .map_err(|e| StatsError::Decomposition(format!("SVD of {n}×{p} matrix: {e:?}")))?;
        let u = svd.U();
        let v = svd.V();
        let s = svd.S();
        let m = n.min(p);

        let sigma: Vec<f64> = (0..m).map(|i| s[i]).collect();
        let sigma_max = sigma.iter().copied().fold(0.0_f64, f64::max);

        let rank_tol = sigma_max * (n.max(p) as f64) * MACHINE_EPSILON;
        let rank = sigma.iter().filter(|&&sv| sv > rank_tol).count();

        let cutoff = PINV_RCOND * sigma_max;
        let inv_sigma: Vec<f64> = sigma
            .iter()
            .map(|&sv| if sv > cutoff { 1.0 / sv } else { 0.0 })
            .collect();

        // pinv[i, j] = Σ_r V[i, r] · σ_r⁻¹ · U[j, r]
        let pinv = Mat::from_fn(p, n, |i, j| {
            let mut acc = 0.0;
            for (r, &inv) in inv_sigma.iter().enumerate() {
                if inv != 0.0 {
                    acc += v[(i, r)] * inv * u[(j, r)];
                }
            }
            acc
        });

        Ok(Self { pinv, rank })
    }

    /// Returns the projection `X·pinv(X)·b` of a vector onto the column space of `x`.
    pub fn project(&self, x: MatRef<'_, f64>, b: &[f64]) -> Vec<f64> {
        let p = self.pinv.nrows();
        let coef: Vec<f64> = (0..p)
            .map(|i| (0..b.len()).map(|j| self.pinv[(i, j)] * b[j]).sum())
            .collect();
        (0..x.nrows())
            .map(|i| (0..p).map(|c| x[(i, c)] * coef[c]).sum())
            .collect()
    }
}
