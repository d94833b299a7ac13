//! # surfstat-math
//!
//! Dense linear algebra primitives for surfstat, backed by `faer`.
//!
//! Provides:
//! - Moore–Penrose pseudo-inverse with numerical rank (SVD-based)
//! - Packed upper-triangular storage for per-vertex cross-product matrices
//! - Symmetric eigenvalue helpers for multivariate test statistics
//! - Frobenius norm used by the nesting check

pub mod norms;
pub mod packed;
pub mod pinv;
pub mod symmetric;

pub use packed::PackedSymmetric;
pub use pinv::PseudoInverse;

// Re-export the faer types used at crate boundaries.
pub use faer::{Mat, MatRef};
