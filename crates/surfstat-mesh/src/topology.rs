//! Edge extraction.
//!
//! Turns a triangle list or an occupancy lattice into a canonical,
//! deduplicated list of 0-based vertex pairs, optionally restricted
//! to a vertex mask.

use serde::{Deserialize, Serialize};
use surfstat_types::{StatsError, StatsResult};

use crate::lattice::lattice_edges;
use crate::mask::mask_edges;
use crate::mesh::{MeshSource, TriangleList};

/// An unordered vertex pair stored as `[lo, hi]`.
pub type Edge = [u32; 2];

/// Unique undirected edges between mesh vertices.
///
/// Deserialized pairs are canonicalized as in [`EdgeList::from_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EdgeListFields")]
pub struct EdgeList {
    edges: Vec<Edge>,
}

/// Wire form of [`EdgeList`], possibly unordered or repeated.
#[derive(Deserialize)]
struct EdgeListFields {
    edges: Vec<Edge>,
}

impl From<EdgeListFields> for EdgeList {
    fn from(raw: EdgeListFields) -> Self {
        EdgeList::from_pairs(raw.edges)
    }
}

impl EdgeList {
    /// Wraps edges that are already canonical and unique.
    pub fn from_canonical(edges: Vec<Edge>) -> Self {
        debug_assert!(edges.iter().all(|e| e[0] < e[1]));
        Self { edges }
    }

    /// Canonicalizes arbitrary pairs: orders each pair, drops self-loops,
    /// then sorts and deduplicates.
    pub fn from_pairs(pairs: impl IntoIterator<Item = Edge>) -> Self {
        let mut edges: Vec<Edge> = pairs
            .into_iter()
            .filter(|e| e[0] != e[1])
            .map(|[a, b]| if a < b { [a, b] } else { [b, a] })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }

    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Largest vertex index referenced, if any.
    pub fn max_vertex(&self) -> Option<u32> {
        self.edges.iter().map(|e| e[1].max(e[0])).max()
    }

    pub fn into_inner(self) -> Vec<Edge> {
        self.edges
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Extracts the edge list of a mesh, optionally restricted to `mask`.
///
/// `mask` is indexed by the vertices of the unmasked mesh (occupied
/// voxels for a lattice). Masked edges are renumbered contiguously.
pub fn extract_edges(source: MeshSource<'_>, mask: Option<&[bool]>) -> StatsResult<EdgeList> {
    let (edges, vertex_count) = match source.resolve()? {
        MeshSource::Triangles(tri) => (triangle_edges(tri), tri.vertex_count),
        MeshSource::Lattice(lat) => (lattice_edges(lat), lat.occupied_count()),
        MeshSource::FromFittedModel(_) => {
            return Err(StatsError::UnsupportedMeshFormat(
                "fitted model wraps another fitted model".into(),
            ))
        }
    };

    tracing::debug!(
        edges = edges.len(),
        vertices = vertex_count,
        masked = mask.is_some(),
        "mesh_edges_extracted"
    );

    match mask {
        None => Ok(edges),
        Some(mask) => {
            if mask.len() != vertex_count {
                return Err(StatsError::DimensionMismatch(format!(
                    "mask has {} entries but mesh has {vertex_count} vertices",
                    mask.len()
                )));
            }
            Ok(mask_edges(&edges, mask)?.edges)
        }
    }
}

/// Unique edges of a triangle list.
///
/// Triangle `(a, b, c)` contributes `(a, b)`, `(a, c)`, `(b, c)`; edges
/// shared by adjacent triangles collapse to one. The output is sorted.
pub fn triangle_edges(tri: &TriangleList) -> EdgeList {
    let mut pairs = Vec::with_capacity(tri.triangle_count() * 3);
    for t in &tri.triangles {
        let mut s = *t;
        s.sort_unstable();
        pairs.push([s[0], s[1]]);
        pairs.push([s[0], s[2]]);
        pairs.push([s[1], s[2]]);
    }
    EdgeList::from_pairs(pairs)
}
