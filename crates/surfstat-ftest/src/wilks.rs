//! Rao's F approximation to Wilks' Λ.

/// Degrees of freedom and exponent of Rao's approximation for `p`
/// response components, `q` hypothesis df and `nu` error df.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaoApproximation {
    /// Root applied to Λ.
    pub t: f64,
    /// Numerator degrees of freedom `p·q`.
    pub df1: f64,
    /// Denominator degrees of freedom.
    pub df2: f64,
}

impl RaoApproximation {
    pub fn new(p: usize, q: usize, nu: usize) -> Self {
        let (p, q, nu) = (p as f64, q as f64, nu as f64);
        let pq = p * q;
        let denom = p * p + q * q - 5.0;
        let t = if denom > 0.0 {
            ((pq * pq - 4.0) / denom).sqrt()
        } else {
            1.0
        };
        let w = nu + q - (p + q + 1.0) / 2.0;
        Self {
            t,
            df1: pq,
            df2: w * t - (pq - 2.0) / 2.0,
        }
    }

    /// `(numerator, denominator)` degrees of freedom.
    #[inline]
    pub fn df(&self) -> (f64, f64) {
        (self.df1, self.df2)
    }

    /// F statistic for a given Λ; NaN unless `0 < Λ` and finite.
    pub fn statistic(&self, lambda: f64) -> f64 {
        if !(lambda.is_finite() && lambda > 0.0) {
            return f64::NAN;
        }
        let root = lambda.powf(1.0 / self.t);
        (1.0 - root) / root * self.df2 / self.df1
    }
}
