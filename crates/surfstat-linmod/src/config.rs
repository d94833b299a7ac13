//! Fit configuration.
//!
//! Parameters that control the fitting engine: chunk size and the
//! reserved variance-components settings.

use serde::{Deserialize, Serialize};
use surfstat_types::constants::{
    DEFAULT_DR_LIMIT, DEFAULT_ITERATIONS, DEFAULT_MAX_CHUNK, DEFAULT_THETA_LIMIT,
    LOW_MEMORY_MAX_CHUNK,
};
use surfstat_types::{StatsError, StatsResult};

/// Configuration for [`crate::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Maximum number of vertices fitted per chunk.
    /// Bounds peak memory; never changes the result.
    pub max_chunk: usize,

    /// Variance-component iterations. Only `1` (fixed effects) is modelled.
    pub iterations: u32,

    /// Variance-component parameter change limit (reserved).
    pub theta_limit: f64,

    /// Relative deviance change limit (reserved).
    pub dr_limit: f64,

    /// Whether to log a warning when the design seems to lack an intercept.
    pub warn_on_missing_intercept: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_chunk: DEFAULT_MAX_CHUNK,
            iterations: DEFAULT_ITERATIONS,
            theta_limit: DEFAULT_THETA_LIMIT,
            dr_limit: DEFAULT_DR_LIMIT,
            warn_on_missing_intercept: true,
        }
    }
}

impl FitConfig {
    /// Creates a config with small chunks for memory-constrained runs.
    pub fn low_memory() -> Self {
        Self {
            max_chunk: LOW_MEMORY_MAX_CHUNK,
            ..Default::default()
        }
    }

    /// Returns a copy with the given chunk size.
    pub fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = max_chunk;
        self
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> StatsResult<Self> {
        let config: FitConfig =
            toml::from_str(text).map_err(|e| StatsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> StatsResult<()> {
        if self.max_chunk == 0 {
            return Err(StatsError::InvalidConfig(
                "max_chunk must be >= 1".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(StatsError::InvalidConfig(
                "iterations must be >= 1".into(),
            ));
        }
        if !(self.theta_limit.is_finite() && self.theta_limit > 0.0) {
            return Err(StatsError::InvalidConfig(format!(
                "theta_limit must be positive and finite, got {}",
                self.theta_limit
            )));
        }
        if !(self.dr_limit.is_finite() && self.dr_limit > 0.0) {
            return Err(StatsError::InvalidConfig(format!(
                "dr_limit must be positive and finite, got {}",
                self.dr_limit
            )));
        }
        Ok(())
    }
}
