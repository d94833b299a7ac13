//! Nested model comparison.

use faer::{Mat, MatRef};
use surfstat_linmod::FittedModel;
use surfstat_math::norms::frobenius_norm_sq;
use surfstat_math::symmetric::{symmetric_determinant, whitened_eigenvalues};
use surfstat_math::PseudoInverse;
use surfstat_types::constants::NESTING_TOLERANCE;
use surfstat_types::{StatsError, StatsResult};

use crate::result::FTestResult;
use crate::wilks::RaoApproximation;

/// Compares two fitted models with an F-test.
///
/// Argument order does not matter: the model with more residual degrees
/// of freedom is taken as the reduced one. The reduced design must lie in
/// the column space of the full design.
///
/// Fails with `DimensionMismatch` when the models disagree on
/// observations, vertices or components, and with `NestingViolation`
/// when the df are equal or the designs are not nested.
pub fn compare(a: &FittedModel, b: &FittedModel) -> StatsResult<FTestResult> {
    check_shapes(a, b)?;

    let (reduced, full) = match a.df.cmp(&b.df) {
        std::cmp::Ordering::Greater => (a, b),
        std::cmp::Ordering::Less => (b, a),
        std::cmp::Ordering::Equal => {
            return Err(StatsError::NestingViolation(format!(
                "both models have {} residual df; cannot tell reduced from full",
                a.df
            )));
        }
    };
    verify_nesting(reduced.x.as_ref(), full.x.as_ref())?;

    let q = reduced.df - full.df;
    let nu = full.df;
    let k = full.components();

    let (f, df, roy) = if k == 1 {
        let f = univariate_f(reduced, full, q, nu);
        (f, (q as f64, nu as f64), None)
    } else {
        let (f, roy, rao) = multivariate_f(reduced, full, q, nu)?;
        (f, rao.df(), Some(roy))
    };

    let undefined = f.iter().filter(|x| x.is_nan()).count();
    tracing::debug!(
        reduced_df = reduced.df,
        full_df = full.df,
        components = k,
        vertices = f.len(),
        undefined,
        "f_test"
    );

    let mut carried = full.clone();
    if carried.mesh.is_none() {
        carried.mesh = reduced.mesh.clone();
        carried.resl = reduced.resl.clone();
    }

    Ok(FTestResult {
        f,
        df,
        roy,
        full: carried,
    })
}

fn check_shapes(a: &FittedModel, b: &FittedModel) -> StatsResult<()> {
    if a.components() != b.components() {
        return Err(StatsError::DimensionMismatch(format!(
            "models have {} and {} response components",
            a.components(),
            b.components()
        )));
    }
    if a.vertices() != b.vertices() {
        return Err(StatsError::DimensionMismatch(format!(
            "models have {} and {} vertices",
            a.vertices(),
            b.vertices()
        )));
    }
    if a.observations() != b.observations() {
        return Err(StatsError::DimensionMismatch(format!(
            "models have {} and {} observations",
            a.observations(),
            b.observations()
        )));
    }
    Ok(())
}

/// Fails unless every column of `reduced` is in the span of `full`.
fn verify_nesting(reduced: MatRef<'_, f64>, full: MatRef<'_, f64>) -> StatsResult<()> {
    let scale = frobenius_norm_sq(reduced);
    if scale == 0.0 {
        return Ok(());
    }
    let pinv = PseudoInverse::compute(full)?;
    let coef = pinv.pinv.as_ref() * reduced;
    let projected = full * coef.as_ref();
    let residual = Mat::from_fn(reduced.nrows(), reduced.ncols(), |i, j| {
        reduced[(i, j)] - projected[(i, j)]
    });
    let ratio = frobenius_norm_sq(residual.as_ref()) / scale;
    if ratio > NESTING_TOLERANCE {
        return Err(StatsError::NestingViolation(format!(
            "reduced design leaves relative residual {ratio:.3e} against the full design"
        )));
    }
    Ok(())
}

fn univariate_f(reduced: &FittedModel, full: &FittedModel, q: usize, nu: usize) -> Vec<f64> {
    let (q, nu) = (q as f64, nu as f64);
    (0..full.vertices())
        .map(|c| {
            let sse_r = reduced.sse.get(0, 0, c);
            let sse_f = full.sse.get(0, 0, c);
            if sse_f <= 0.0 || nu == 0.0 {
                f64::NAN
            } else {
                ((sse_r - sse_f) / q) / (sse_f / nu)
            }
        })
        .collect()
}

/// Wilks' Λ per vertex with Rao's F, plus Roy's largest roots.
fn multivariate_f(
    reduced: &FittedModel,
    full: &FittedModel,
    q: usize,
    nu: usize,
) -> StatsResult<(Vec<f64>, Mat<f64>, RaoApproximation)> {
    let k = full.components();
    let v = full.vertices();
    let rao = RaoApproximation::new(k, q, nu);
    let roots_kept = k.min(q);

    let mut f = vec![f64::NAN; v];
    let mut roy = Mat::from_fn(roots_kept, v, |_, _| f64::NAN);

    for c in 0..v {
        let e = full.sse.full_matrix(c);
        let r = reduced.sse.full_matrix(c);
        if !(all_finite(e.as_ref()) && all_finite(r.as_ref())) {
            continue;
        }
        let h = Mat::from_fn(k, k, |i, j| r[(i, j)] - e[(i, j)]);
        let Some(roots) = whitened_eigenvalues(e.as_ref(), h.as_ref())? else {
            continue;
        };

        let lambda = symmetric_determinant(e.as_ref())? / symmetric_determinant(r.as_ref())?;
        f[c] = rao.statistic(lambda);
        for (i, &root) in roots.iter().take(roots_kept).enumerate() {
            roy[(i, c)] = root;
        }
    }

    Ok((f, roy, rao))
}

fn all_finite(m: MatRef<'_, f64>) -> bool {
    (0..m.ncols()).all(|j| (0..m.nrows()).all(|i| m[(i, j)].is_finite()))
}
