//! Restricting an edge list to a vertex mask.

use surfstat_types::{StatsError, StatsResult};

use crate::topology::{Edge, EdgeList};

/// Result of [`mask_edges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedEdges {
    /// Surviving edges, renumbered to `0..m`.
    pub edges: EdgeList,
    /// For each input edge, whether it survived.
    pub kept: Vec<bool>,
}

/// Drops every edge touching a vertex where `mask` is false, then
/// renumbers the vertices still referenced to a contiguous `0..m` range
/// in ascending original order.
pub fn mask_edges(edges: &EdgeList, mask: &[bool]) -> StatsResult<MaskedEdges> {
    if let Some(max) = edges.max_vertex() {
        if max as usize >= mask.len() {
            return Err(StatsError::DimensionMismatch(format!(
                "edge references vertex {max} but mask has {} entries",
                mask.len()
            )));
        }
    }

    let kept: Vec<bool> = edges
        .iter()
        .map(|e| mask[e[0] as usize] && mask[e[1] as usize])
        .collect();

    // Arena mapping original vertex -> compact index for referenced vertices.
    let mut referenced = vec![false; mask.len()];
    for (e, _) in edges.iter().zip(&kept).filter(|(_, k)| **k) {
        referenced[e[0] as usize] = true;
        referenced[e[1] as usize] = true;
    }
    let mut remap: Vec<Option<u32>> = vec![None; mask.len()];
    let mut next = 0u32;
    for (v, &r) in referenced.iter().enumerate() {
        if r {
            remap[v] = Some(next);
            next += 1;
        }
    }

    let mut out: Vec<Edge> = Vec::with_capacity(kept.iter().filter(|&&k| k).count());
    for (e, _) in edges.iter().zip(&kept).filter(|(_, k)| **k) {
        if let (Some(a), Some(b)) = (remap[e[0] as usize], remap[e[1] as usize]) {
            out.push([a, b]);
        }
    }

    tracing::debug!(
        input = edges.len(),
        kept = out.len(),
        vertices = next,
        "edges_masked"
    );

    Ok(MaskedEdges {
        edges: EdgeList::from_canonical(out),
        kept,
    })
}
