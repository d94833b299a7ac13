//! Edge extraction for 3-D occupancy lattices.
//!
//! Each `I × J` slice is triangulated with a checkerboard of diagonals:
//! a voxel whose `i + j` parity matches the slice's parity class owns the
//! edges to its `+i`, `+j` and `(+i, +j)` neighbors (the `c1` family) and,
//! towards `-i`, the edges closing the anti-diagonal square (the `c2`
//! family). Voxels on the last row/column get the reduced `c11`/`c21`/
//! `c12`/`c22` families. Between slices, the same cells link upward to
//! the voxel above and its diagonal neighbors, so consecutive slices
//! are stitched into tetrahedra.
//!
//! Templates are built once per parity class on the dense grid, tiled
//! over the `K − 1` slice boundaries (even boundaries use parity 0, odd
//! boundaries parity 1), and closed with an in-slice template for the top
//! slice. Voxels are then numbered by a running count over the
//! column-major occupancy flags and any template edge touching an
//! unoccupied voxel is dropped.

use crate::mesh::Lattice;
use crate::topology::{Edge, EdgeList};

/// Voxel positions in one slice, grouped by the families above.
struct ParityCells {
    c1: Vec<usize>,
    c2: Vec<usize>,
    c11: Vec<usize>,
    c21: Vec<usize>,
    c12: Vec<usize>,
    c22: Vec<usize>,
}

impl ParityCells {
    fn collect(ni: usize, nj: usize, parity: usize) -> Self {
        let mut cells = Self {
            c1: Vec::new(),
            c2: Vec::new(),
            c11: Vec::new(),
            c21: Vec::new(),
            c12: Vec::new(),
            c22: Vec::new(),
        };
        for idx in 0..ni * nj {
            let i = idx % ni;
            let j = idx / ni;
            if (i + j) % 2 != parity {
                continue;
            }
            let last_i = i + 1 == ni;
            let last_j = j + 1 == nj;
            if !last_i && !last_j {
                cells.c1.push(idx);
            }
            if i > 0 && !last_j {
                cells.c2.push(idx);
            }
            if last_i && !last_j {
                cells.c11.push(idx);
            }
            if last_i && j > 0 {
                cells.c21.push(idx);
            }
            if !last_i && last_j {
                cells.c12.push(idx);
            }
            if i > 0 && last_j {
                cells.c22.push(idx);
            }
        }
        cells
    }
}

type Pair = [usize; 2];

fn push_family(out: &mut Vec<Pair>, cells: &[usize], f: impl Fn(usize) -> Pair) {
    out.extend(cells.iter().map(|&c| f(c)));
}

/// Edges inside one slice.
fn in_slice_template(cells: &ParityCells, ni: usize) -> Vec<Pair> {
    let mut e = Vec::new();
    push_family(&mut e, &cells.c1, |c| [c, c + 1]);
    push_family(&mut e, &cells.c1, |c| [c, c + ni]);
    push_family(&mut e, &cells.c1, |c| [c, c + 1 + ni]);
    push_family(&mut e, &cells.c2, |c| [c - 1, c]);
    push_family(&mut e, &cells.c2, |c| [c - 1, c - 1 + ni]);
    push_family(&mut e, &cells.c2, |c| [c, c - 1 + ni]);
    push_family(&mut e, &cells.c11, |c| [c, c + ni]);
    push_family(&mut e, &cells.c21, |c| [c - ni, c]);
    push_family(&mut e, &cells.c12, |c| [c, c + 1]);
    push_family(&mut e, &cells.c22, |c| [c - 1, c]);
    e
}

/// Edges from parity cells to the slice above.
fn upward_template(cells: &ParityCells, ni: usize, ij: usize) -> Vec<Pair> {
    let mut e = Vec::new();
    push_family(&mut e, &cells.c1, |c| [c, c + ij]);
    push_family(&mut e, &cells.c1, |c| [c, c + 1 + ij]);
    push_family(&mut e, &cells.c1, |c| [c, c + ni + ij]);
    push_family(&mut e, &cells.c11, |c| [c, c + ij]);
    push_family(&mut e, &cells.c11, |c| [c, c + ni + ij]);
    push_family(&mut e, &cells.c12, |c| [c, c + ij]);
    push_family(&mut e, &cells.c12, |c| [c, c + 1 + ij]);
    e
}

/// Edges from the opposite-parity neighbors to the slice above.
fn shifted_template(cells: &ParityCells, ni: usize, ij: usize) -> Vec<Pair> {
    let mut e = Vec::new();
    push_family(&mut e, &cells.c2, |c| [c - 1, c - 1 + ij]);
    push_family(&mut e, &cells.c2, |c| [c, c - 1 + ij]);
    push_family(&mut e, &cells.c2, |c| [c - 1 + ni, c - 1 + ij]);
    push_family(&mut e, &cells.c21, |c| [c - ni, c - ni + ij]);
    push_family(&mut e, &cells.c21, |c| [c, c - ni + ij]);
    push_family(&mut e, &cells.c22, |c| [c - 1, c - 1 + ij]);
    push_family(&mut e, &cells.c22, |c| [c, c - 1 + ij]);
    e
}

/// Edge template of the fully occupied `I × J × K` grid, in voxel indices.
fn dense_template(ni: usize, nj: usize, nk: usize) -> Vec<Pair> {
    let ij = ni * nj;
    // One block per slice boundary, plus the top slice.
    let mut blocks: Vec<Vec<Pair>> = vec![Vec::new(); nk];

    for parity in 0..2 {
        let cells = ParityCells::collect(ni, nj, parity);
        let in_slice = in_slice_template(&cells, ni);
        let upward = upward_template(&cells, ni, ij);
        let shifted = shifted_template(&cells, ni, ij);
        let (first, second) = if parity == 0 {
            (&upward, &shifted)
        } else {
            (&shifted, &upward)
        };
        // The corner voxel's vertical edge belongs to no family.
        let corner = [ij - 1, 2 * ij - 1];

        for boundary in (parity..nk - 1).step_by(2) {
            let offset = boundary * ij;
            blocks[boundary] = in_slice
                .iter()
                .chain(first.iter())
                .chain(second.iter())
                .chain(std::iter::once(&corner))
                .map(|&[a, b]| [a + offset, b + offset])
                .collect();
        }

        if (nk + 1) % 2 == parity {
            let offset = (nk - 1) * ij;
            blocks[nk - 1] = in_slice
                .iter()
                .map(|&[a, b]| [a + offset, b + offset])
                .collect();
        }
    }

    blocks.into_iter().flatten().collect()
}

/// Edges of a lattice between occupied voxels, in compact vertex indices.
///
/// An empty lattice yields an empty list.
pub fn lattice_edges(lat: &Lattice) -> EdgeList {
    let [ni, nj, nk] = lat.dims();
    if ni == 0 || nj == 0 || nk == 0 || lat.occupied_count() == 0 {
        return EdgeList::default();
    }

    let vid = lat.compact_index();
    let edges: Vec<Edge> = dense_template(ni, nj, nk)
        .into_iter()
        .filter_map(|[a, b]| match (vid[a], vid[b]) {
            (Some(va), Some(vb)) => Some([va, vb]),
            _ => None,
        })
        .collect();

    EdgeList::from_canonical(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_sizes(ni: usize, nj: usize, nk: usize) -> (usize, usize) {
        let n1 = (ni - 1) * (nj - 1) * 6 + (ni - 1) * 3 + (nj - 1) * 3 + 1;
        let n2 = (ni - 1) * (nj - 1) * 3 + (ni - 1) + (nj - 1);
        (n1, n2)
    }

    #[test]
    fn dense_template_size_matches_closed_form() {
        for &(ni, nj, nk) in &[(2, 2, 1), (3, 4, 2), (4, 3, 5), (1, 5, 3), (5, 1, 2)] {
            let (n1, n2) = template_sizes(ni, nj, nk);
            assert_eq!(dense_template(ni, nj, nk).len(), (nk - 1) * n1 + n2);
        }
    }

    #[test]
    fn dense_template_has_no_duplicates() {
        let mut edges = dense_template(4, 5, 4);
        let before = edges.len();
        for e in &mut edges {
            assert!(e[0] < e[1]);
        }
        edges.sort_unstable();
        edges.dedup();
        assert_eq!(edges.len(), before);
    }

    #[test]
    fn single_column_is_a_path() {
        let edges = dense_template(1, 1, 4);
        assert_eq!(edges, vec![[0, 1], [1, 2], [2, 3]]);
    }
}
