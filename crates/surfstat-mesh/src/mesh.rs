//! Mesh data model: triangle lists, occupancy lattices, and the
//! tagged [`MeshSource`] accepted by edge extraction.

use std::fmt;

use serde::{Deserialize, Serialize};
use surfstat_types::{StatsError, StatsResult};

/// A triangulated surface given as vertex-index triples (0-based).
///
/// Deserialization runs [`TriangleList::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TriangleListFields")]
pub struct TriangleList {
    /// Triangles as `[v0, v1, v2]`.
    pub triangles: Vec<[u32; 3]>,
    /// Number of vertices in the coordinate set the indices refer to.
    pub vertex_count: usize,
}

impl TriangleList {
    /// Creates a validated triangle list.
    pub fn new(triangles: Vec<[u32; 3]>, vertex_count: usize) -> StatsResult<Self> {
        let list = Self {
            triangles,
            vertex_count,
        };
        list.validate()?;
        Ok(list)
    }

    /// Creates a triangle list whose vertex count is one past the largest index.
    pub fn from_triangles(triangles: Vec<[u32; 3]>) -> Self {
        let vertex_count = triangles
            .iter()
            .flat_map(|t| t.iter())
            .map(|&v| v as usize + 1)
            .max()
            .unwrap_or(0);
        Self {
            triangles,
            vertex_count,
        }
    }

    /// Converts 1-based triangle indices (surface file convention) to 0-based.
    pub fn from_one_based(triangles: &[[u32; 3]], vertex_count: usize) -> StatsResult<Self> {
        let mut converted = Vec::with_capacity(triangles.len());
        for (t, tri) in triangles.iter().enumerate() {
            if tri.contains(&0) {
                return Err(StatsError::InvalidMesh(format!(
                    "Triangle {t} contains index 0 in a 1-based list: {tri:?}"
                )));
            }
            converted.push([tri[0] - 1, tri[1] - 1, tri[2] - 1]);
        }
        Self::new(converted, vertex_count)
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Checks that every index refers to a vertex.
    pub fn validate(&self) -> StatsResult<()> {
        for (t, tri) in self.triangles.iter().enumerate() {
            for &idx in tri {
                if idx as usize >= self.vertex_count {
                    return Err(StatsError::InvalidMesh(format!(
                        "Triangle {t} index {idx} is out of range (vertex count: {})",
                        self.vertex_count
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A 3-D occupancy grid of shape `(I, J, K)`.
///
/// Flags are stored column-major: voxel `(i, j, k)` lives at
/// `i + j·I + k·I·J`. Dimensions are fixed at construction, and
/// deserialization applies the same flag-count check as [`Lattice::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LatticeFields")]
pub struct Lattice {
    dims: [usize; 3],
    flags: Vec<bool>,
}

/// Unchecked wire form of [`TriangleList`].
#[derive(Deserialize)]
struct TriangleListFields {
    triangles: Vec<[u32; 3]>,
    vertex_count: usize,
}

impl TryFrom<TriangleListFields> for TriangleList {
    type Error = StatsError;

    fn try_from(raw: TriangleListFields) -> StatsResult<Self> {
        TriangleList::new(raw.triangles, raw.vertex_count)
    }
}

/// Unchecked wire form of [`Lattice`].
#[derive(Deserialize)]
struct LatticeFields {
    dims: [usize; 3],
    flags: Vec<bool>,
}

impl TryFrom<LatticeFields> for Lattice {
    type Error = StatsError;

    fn try_from(raw: LatticeFields) -> StatsResult<Self> {
        Lattice::new(raw.dims, raw.flags)
    }
}

impl Lattice {
    /// Creates a lattice from column-major occupancy flags.
    pub fn new(dims: [usize; 3], flags: Vec<bool>) -> StatsResult<Self> {
        let expected = dims[0] * dims[1] * dims[2];
        if flags.len() != expected {
            return Err(StatsError::InvalidMesh(format!(
                "Lattice of shape {}×{}×{} needs {expected} flags, got {}",
                dims[0],
                dims[1],
                dims[2],
                flags.len()
            )));
        }
        Ok(Self { dims, flags })
    }

    /// Creates a single-slice lattice (K = 1) from a 2-D grid.
    pub fn from_2d(ni: usize, nj: usize, flags: Vec<bool>) -> StatsResult<Self> {
        Self::new([ni, nj, 1], flags)
    }

    /// Creates a lattice by evaluating `occupied(i, j, k)` at every voxel.
    pub fn from_fn(dims: [usize; 3], occupied: impl Fn(usize, usize, usize) -> bool) -> Self {
        let [ni, nj, nk] = dims;
        let mut flags = Vec::with_capacity(ni * nj * nk);
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    flags.push(occupied(i, j, k));
                }
            }
        }
        Self { dims, flags }
    }

    /// Creates a fully occupied lattice.
    pub fn full(ni: usize, nj: usize, nk: usize) -> Self {
        Self {
            dims: [ni, nj, nk],
            flags: vec![true; ni * nj * nk],
        }
    }

    /// Returns `[I, J, K]`.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Column-major occupancy flags.
    #[inline]
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Column-major linear index of voxel `(i, j, k)`.
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.dims[0] + k * self.dims[0] * self.dims[1]
    }

    /// Returns true if voxel `(i, j, k)` is inside the domain.
    #[inline]
    pub fn is_occupied(&self, i: usize, j: usize, k: usize) -> bool {
        self.flags[self.linear_index(i, j, k)]
    }

    /// Number of occupied voxels, i.e. the vertex count of the lattice mesh.
    pub fn occupied_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Maps each voxel to its compact vertex index (`None` if unoccupied).
    ///
    /// Indices follow a running count over the column-major flags, so
    /// occupied voxels are numbered `0..occupied_count()` in storage order.
    pub fn compact_index(&self) -> Vec<Option<u32>> {
        let mut next = 0u32;
        self.flags
            .iter()
            .map(|&occupied| {
                occupied.then(|| {
                    let id = next;
                    next += 1;
                    id
                })
            })
            .collect()
    }
}

/// An owned mesh: either a triangle list or a lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mesh {
    Triangles(TriangleList),
    Lattice(Lattice),
}

impl Mesh {
    /// Number of vertices the mesh defines (occupied voxels for a lattice).
    pub fn vertex_count(&self) -> usize {
        match self {
            Mesh::Triangles(t) => t.vertex_count,
            Mesh::Lattice(l) => l.occupied_count(),
        }
    }
}

/// Anything that may carry a mesh, such as a fitted model.
pub trait MeshCarrier {
    /// The mesh attached to this object, if any.
    fn mesh(&self) -> Option<&Mesh>;
}

/// Mesh input accepted by edge extraction.
///
/// `FromFittedModel` unwraps to one of the first two cases before dispatch.
#[derive(Clone, Copy)]
pub enum MeshSource<'a> {
    Triangles(&'a TriangleList),
    Lattice(&'a Lattice),
    FromFittedModel(&'a dyn MeshCarrier),
}

impl fmt::Debug for MeshSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshSource::Triangles(t) => f.debug_tuple("Triangles").field(t).finish(),
            MeshSource::Lattice(l) => f.debug_tuple("Lattice").field(l).finish(),
            MeshSource::FromFittedModel(carrier) => f
                .debug_struct("FromFittedModel")
                .field("mesh", &carrier.mesh())
                .finish(),
        }
    }
}

impl<'a> MeshSource<'a> {
    /// Unwraps `FromFittedModel` to the triangle list or lattice it carries.
    pub fn resolve(self) -> StatsResult<MeshSource<'a>> {
        match self {
            MeshSource::FromFittedModel(carrier) => match carrier.mesh() {
                Some(mesh) => Ok(MeshSource::from(mesh)),
                None => Err(StatsError::UnsupportedMeshFormat(
                    "fitted model has neither triangle nor lattice data".into(),
                )),
            },
            other => Ok(other),
        }
    }

    /// Clones the resolved mesh into an owned [`Mesh`].
    pub fn to_mesh(self) -> StatsResult<Mesh> {
        match self.resolve()? {
            MeshSource::Triangles(t) => Ok(Mesh::Triangles(t.clone())),
            MeshSource::Lattice(l) => Ok(Mesh::Lattice(l.clone())),
            MeshSource::FromFittedModel(_) => Err(StatsError::UnsupportedMeshFormat(
                "nested fitted model mesh".into(),
            )),
        }
    }

    /// Vertex count of the resolved mesh.
    pub fn vertex_count(self) -> StatsResult<usize> {
        match self.resolve()? {
            MeshSource::Triangles(t) => Ok(t.vertex_count),
            MeshSource::Lattice(l) => Ok(l.occupied_count()),
            MeshSource::FromFittedModel(_) => Err(StatsError::UnsupportedMeshFormat(
                "nested fitted model mesh".into(),
            )),
        }
    }
}

impl<'a> From<&'a Mesh> for MeshSource<'a> {
    fn from(mesh: &'a Mesh) -> Self {
        match mesh {
            Mesh::Triangles(t) => MeshSource::Triangles(t),
            Mesh::Lattice(l) => MeshSource::Lattice(l),
        }
    }
}

impl<'a> From<&'a TriangleList> for MeshSource<'a> {
    fn from(tri: &'a TriangleList) -> Self {
        MeshSource::Triangles(tri)
    }
}

impl<'a> From<&'a Lattice> for MeshSource<'a> {
    fn from(lat: &'a Lattice) -> Self {
        MeshSource::Lattice(lat)
    }
}
