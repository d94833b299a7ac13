//! Error types for surfstat.
//!
//! All crates return `StatsResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for mesh extraction, model fitting and comparison.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The mesh is neither a triangle list nor a lattice.
    #[error("Unsupported mesh format: {0}")]
    UnsupportedMeshFormat(String),

    /// Array shapes disagree (observations, vertices, components, mask length).
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The design matrix cannot be used for a fit.
    #[error("Degenerate design: {0}")]
    DegenerateDesign(String),

    /// Two models cannot be ordered as reduced/full.
    #[error("Models are not nested: {0}")]
    NestingViolation(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Config(String),

    /// A dense matrix decomposition failed.
    #[error("Decomposition failed: {0}")]
    Decomposition(String),
}

/// Convenience alias for `Result<T, StatsError>`.
pub type StatsResult<T> = Result<T, StatsError>;
