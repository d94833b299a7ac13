//! # surfstat-ftest
//!
//! F-test comparison of two nested fitted linear models.
//!
//! [`compare`] orders the models by residual degrees of freedom, checks
//! that the reduced design lies in the span of the full one, then
//! computes a per-vertex F statistic:
//!
//! - univariate responses use the classical extra-sum-of-squares F
//! - multivariate responses use Wilks' Λ with Rao's F approximation and
//!   also report Roy's largest roots

pub mod compare;
pub mod result;
pub mod wilks;

pub use compare::compare;
pub use result::FTestResult;
pub use wilks::RaoApproximation;
