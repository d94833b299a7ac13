//! Matrix norms.

use faer::MatRef;

/// Sum of squared entries of a matrix.
pub fn frobenius_norm_sq(x: MatRef<'_, f64>) -> f64 {
    let mut acc = 0.0;
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            acc += x[(i, j)] * x[(i, j)];
        }
    }
    acc
}
