//! Procedural meshes for tests and benchmarks.
//!
//! Deterministic, resolution-configurable triangle grids and lattices.

use crate::mesh::{Lattice, TriangleList};

/// Generates a flat `cols × rows` quad grid split into two triangles per quad.
///
/// Vertices are numbered row by row, `(cols + 1) · (rows + 1)` in total.
///
/// # Example
/// ```
/// use surfstat_mesh::generators::triangle_grid;
/// let grid = triangle_grid(2, 2);
/// assert_eq!(grid.vertex_count, 9);   // 3×3 vertices
/// assert_eq!(grid.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn triangle_grid(cols: usize, rows: usize) -> TriangleList {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut triangles = Vec::with_capacity(cols * rows * 2);

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            triangles.push([top_left, bot_left, top_right]);
            triangles.push([top_right, bot_left, bot_right]);
        }
    }

    TriangleList {
        triangles,
        vertex_count: verts_x * verts_y,
    }
}

/// Closed octahedron: 6 vertices, 8 triangles, 12 edges.
pub fn octahedron() -> TriangleList {
    TriangleList {
        triangles: vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
        vertex_count: 6,
    }
}

/// Generates a fully occupied `ni × nj × nk` lattice.
pub fn full_lattice(ni: usize, nj: usize, nk: usize) -> Lattice {
    Lattice::full(ni, nj, nk)
}

/// Generates a lattice occupied inside the ball of `radius` voxels
/// centered in a `(2r + 1)³` grid.
pub fn ball_lattice(radius: usize) -> Lattice {
    let n = 2 * radius + 1;
    let r = radius as f64;
    Lattice::from_fn([n, n, n], |i, j, k| {
        let d = |x: usize| x as f64 - r;
        d(i).powi(2) + d(j).powi(2) + d(k).powi(2) <= r * r
    })
}
