//! # surfstat-types
//!
//! Shared error types and numerical constants for the surfstat
//! mesh statistics crates.
//!
//! Holds no domain logic, only the vocabulary
//! that all other surfstat crates share.

pub mod constants;
pub mod error;

pub use error::{StatsError, StatsResult};
