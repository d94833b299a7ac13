//! Numerical constants and fitting defaults.

/// Largest number of vertices fitted in one chunk.
pub const DEFAULT_MAX_CHUNK: usize = 1 << 20;

/// Chunk size used by the low-memory fit preset.
pub const LOW_MEMORY_MAX_CHUNK: usize = 1 << 12;

/// Default number of variance-component iterations (1 = fixed effects only).
pub const DEFAULT_ITERATIONS: u32 = 1;

/// Default limit on the variance-component parameter change.
pub const DEFAULT_THETA_LIMIT: f64 = 0.01;

/// Default limit on the relative deviance change.
pub const DEFAULT_DR_LIMIT: f64 = 0.1;

/// Relative cutoff on singular values used by the pseudo-inverse.
pub const PINV_RCOND: f64 = 1.0e-15;

/// Machine epsilon for `f64`; the missing-intercept threshold.
pub const MACHINE_EPSILON: f64 = f64::EPSILON;

/// Largest relative residual `‖X₁ − P₂X₁‖² / ‖X₁‖²` still treated as nested.
pub const NESTING_TOLERANCE: f64 = 1.0e-10;
