//! # surfstat-linmod
//!
//! Vertex-wise fixed-effects linear models.
//!
//! ## Key Types
//!
//! - [`Response`] — `observations × vertices × components` data
//! - [`DesignInput`] — scalar, repeated row, or full design matrix
//! - [`FitConfig`] — chunk size and reserved variance-component settings
//! - [`FittedModel`] — coefficients, df, packed SSE, optional mesh and `resl`
//! - [`fit`] — the chunked least-squares engine

pub mod config;
pub mod design;
pub mod fit;
pub mod model;
pub mod resl;
pub mod response;

pub use config::FitConfig;
pub use design::DesignInput;
pub use fit::{fit, fit_with_shared_mesh};
pub use model::FittedModel;
pub use response::Response;
