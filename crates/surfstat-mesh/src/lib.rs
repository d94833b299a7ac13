//! # surfstat-mesh
//!
//! Mesh topology for surface and volume statistics.
//!
//! ## Key Types
//!
//! - [`TriangleList`] / [`Lattice`] — the two mesh representations.
//! - [`MeshSource`] — tagged mesh input (triangles, lattice, or a fitted
//!   model carrying one of those).
//! - [`EdgeList`] — canonical, deduplicated vertex pairs.
//! - [`extract_edges`] / [`mask_edges`] — the topology extractor.
//! - Procedural generators for test meshes.

pub mod generators;
pub mod lattice;
pub mod mask;
pub mod mesh;
pub mod topology;

pub use mask::{mask_edges, MaskedEdges};
pub use mesh::{Lattice, Mesh, MeshCarrier, MeshSource, TriangleList};
pub use topology::{extract_edges, Edge, EdgeList};
