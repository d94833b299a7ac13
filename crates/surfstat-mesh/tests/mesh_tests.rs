//! Integration tests for surfstat-mesh.

use surfstat_mesh::generators::{ball_lattice, full_lattice, octahedron, triangle_grid};
use surfstat_mesh::{
    extract_edges, mask_edges, EdgeList, Lattice, Mesh, MeshCarrier, MeshSource, TriangleList,
};
use surfstat_types::StatsError;

fn single_triangle() -> TriangleList {
    TriangleList::new(vec![[0, 1, 2]], 3).unwrap()
}

// ─── TriangleList Tests ───────────────────────────────────────

#[test]
fn validate_catches_oob_index() {
    let result = TriangleList::new(vec![[0, 1, 5]], 3);
    assert!(matches!(result, Err(StatsError::InvalidMesh(_))));
}

#[test]
fn one_based_conversion() {
    let tri = TriangleList::from_one_based(&[[1, 2, 3], [2, 3, 4]], 4).unwrap();
    assert_eq!(tri.triangles, vec![[0, 1, 2], [1, 2, 3]]);
    assert!(TriangleList::from_one_based(&[[0, 1, 2]], 3).is_err());
}

#[test]
fn inferred_vertex_count() {
    let tri = TriangleList::from_triangles(vec![[0, 4, 2]]);
    assert_eq!(tri.vertex_count, 5);
}

// ─── Triangle Edge Tests ──────────────────────────────────────

#[test]
fn single_triangle_edges() {
    let tri = single_triangle();
    let edges = extract_edges(MeshSource::Triangles(&tri), None).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [1, 2]]);
}

#[test]
fn shared_edges_collapse() {
    let tri = TriangleList::new(vec![[0, 1, 2], [2, 1, 3]], 4).unwrap();
    let edges = extract_edges(MeshSource::Triangles(&tri), None).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [1, 2], [1, 3], [2, 3]]);
}

#[test]
fn duplicate_triangles_do_not_change_edges() {
    let grid = triangle_grid(3, 2);
    let base = extract_edges(MeshSource::Triangles(&grid), None).unwrap();

    let mut doubled = grid.clone();
    doubled.triangles.extend(grid.triangles.iter().map(|t| [t[2], t[0], t[1]]));
    let again = extract_edges(MeshSource::Triangles(&doubled), None).unwrap();
    assert_eq!(base, again);
}

#[test]
fn grid_edge_count() {
    // 3×2 quads: horizontal 3·3, vertical 4·2, diagonals 6
    let grid = triangle_grid(3, 2);
    let edges = extract_edges(MeshSource::Triangles(&grid), None).unwrap();
    assert_eq!(edges.len(), 9 + 8 + 6);
}

#[test]
fn octahedron_has_twelve_edges() {
    let tri = octahedron();
    let edges = extract_edges((&tri).into(), None).unwrap();
    assert_eq!(edges.len(), 12);
    assert!(edges.iter().all(|e| e[0] < e[1]));
}

#[test]
fn edges_are_sorted_and_unique() {
    let edges = EdgeList::from_pairs(vec![[3, 1], [1, 3], [2, 2], [0, 4]]);
    assert_eq!(edges.as_slice(), &[[0, 4], [1, 3]]);
}

// ─── Lattice Edge Tests ───────────────────────────────────────

#[test]
fn lattice_2x2x1_exact_edges() {
    let lat = full_lattice(2, 2, 1);
    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    // Four sides plus the (0,0)-(1,1) diagonal.
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [0, 3], [1, 3], [2, 3]]);
}

#[test]
fn lattice_2x2x2_alternates_diagonals() {
    let lat = full_lattice(2, 2, 2);
    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    assert_eq!(edges.len(), 18);
    // Bottom slice uses the main diagonal, top slice the anti-diagonal.
    assert!(edges.as_slice().contains(&[0, 3]));
    assert!(edges.as_slice().contains(&[5, 6]));
    assert!(!edges.as_slice().contains(&[4, 7]));
}

#[test]
fn two_dimensional_lattice_is_single_slice() {
    let flat = Lattice::from_2d(3, 3, vec![true; 9]).unwrap();
    let cube = full_lattice(3, 3, 1);
    let a = extract_edges(MeshSource::Lattice(&flat), None).unwrap();
    let b = extract_edges(MeshSource::Lattice(&cube), None).unwrap();
    assert_eq!(a, b);
    // 2·3 + 3·2 horizontal/vertical, 4 diagonals
    assert_eq!(a.len(), 16);
}

#[test]
fn empty_lattice_has_no_edges() {
    let lat = Lattice::new([3, 3, 3], vec![false; 27]).unwrap();
    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    assert!(edges.is_empty());
}

#[test]
fn lattice_edges_only_join_occupied_voxels() {
    let lat = ball_lattice(2);
    let [ni, nj, _] = lat.dims();
    let occupied: Vec<usize> = lat
        .flags()
        .iter()
        .enumerate()
        .filter(|(_, f)| **f)
        .map(|(i, _)| i)
        .collect();

    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    assert!(!edges.is_empty());
    for e in &edges {
        assert_ne!(e[0], e[1]);
        let a = occupied[e[0] as usize];
        let b = occupied[e[1] as usize];
        assert!(lat.flags()[a] && lat.flags()[b]);
        let coord = |x: usize| (x % ni, (x / ni) % nj, x / (ni * nj));
        let (ai, aj, ak) = coord(a);
        let (bi, bj, bk) = coord(b);
        assert!(ai.abs_diff(bi) <= 1 && aj.abs_diff(bj) <= 1 && ak.abs_diff(bk) <= 1);
    }
}

#[test]
fn partial_lattice_compacts_indices() {
    // Remove voxel 1 of a 2×2×1 lattice.
    let lat = Lattice::new([2, 2, 1], vec![true, false, true, true]).unwrap();
    assert_eq!(lat.compact_index(), vec![Some(0), None, Some(1), Some(2)]);
    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [1, 2]]);
}

#[test]
fn lattice_rejects_wrong_flag_count() {
    assert!(Lattice::new([2, 2, 2], vec![true; 7]).is_err());
}

// ─── Mask Tests ───────────────────────────────────────────────

#[test]
fn mask_drops_and_renumbers() {
    let edges = EdgeList::from_pairs(vec![[0, 1], [1, 2], [2, 3], [0, 3]]);
    let masked = mask_edges(&edges, &[true, false, true, true]).unwrap();
    assert_eq!(masked.kept, vec![false, true, false, true]);
    // Vertices 0, 2, 3 remain and become 0, 1, 2.
    assert_eq!(masked.edges.as_slice(), &[[0, 2], [1, 2]]);
}

#[test]
fn masked_indices_stay_below_true_count() {
    let grid = triangle_grid(4, 4);
    let mask: Vec<bool> = (0..grid.vertex_count).map(|v| v % 3 != 0).collect();
    let edges = extract_edges(MeshSource::Triangles(&grid), Some(&mask)).unwrap();
    let true_count = mask.iter().filter(|&&m| m).count() as u32;
    assert!(edges.max_vertex().unwrap() < true_count);
}

#[test]
fn mask_length_must_match_vertex_count() {
    let tri = single_triangle();
    let result = extract_edges(MeshSource::Triangles(&tri), Some(&[true, true]));
    match result {
        Err(StatsError::DimensionMismatch(msg)) => {
            assert!(msg.contains('2') && msg.contains('3'));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn mask_on_lattice_uses_occupied_count() {
    let lat = full_lattice(2, 2, 1);
    let edges = extract_edges(MeshSource::Lattice(&lat), Some(&[true, true, false, true])).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [1, 2]]);
}

// ─── MeshSource Tests ─────────────────────────────────────────

struct Carrier(Option<Mesh>);

impl MeshCarrier for Carrier {
    fn mesh(&self) -> Option<&Mesh> {
        self.0.as_ref()
    }
}

#[test]
fn carrier_unwraps_to_its_mesh() {
    let carrier = Carrier(Some(Mesh::Triangles(single_triangle())));
    let edges = extract_edges(MeshSource::FromFittedModel(&carrier), None).unwrap();
    assert_eq!(edges.len(), 3);
}

#[test]
fn carrier_without_mesh_is_unsupported() {
    let carrier = Carrier(None);
    let result = extract_edges(MeshSource::FromFittedModel(&carrier), None);
    assert!(matches!(result, Err(StatsError::UnsupportedMeshFormat(_))));
}

#[test]
fn mesh_vertex_counts() {
    assert_eq!(Mesh::Triangles(octahedron()).vertex_count(), 6);
    let lat = Lattice::new([2, 1, 1], vec![true, false]).unwrap();
    assert_eq!(Mesh::Lattice(lat).vertex_count(), 1);
}

// ─── Serialization Tests ──────────────────────────────────────

#[test]
fn lattice_json_roundtrip() {
    let lat = ball_lattice(1);
    let json = serde_json::to_string(&lat).unwrap();
    let recovered: Lattice = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, lat);
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = Mesh::Triangles(octahedron());
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: Mesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

#[test]
fn lattice_json_with_wrong_flag_count_is_rejected() {
    let json = r#"{"dims":[2,2,2],"flags":[true,true,true]}"#;
    let err = serde_json::from_str::<Lattice>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid mesh"), "{err}");

    let wrapped = r#"{"Lattice":{"dims":[2,2,2],"flags":[true,true,true]}}"#;
    assert!(serde_json::from_str::<Mesh>(wrapped).is_err());
}

#[test]
fn lattice_json_with_matching_flags_extracts_edges() {
    let json = r#"{"dims":[2,2,1],"flags":[true,true,true,true]}"#;
    let lat: Lattice = serde_json::from_str(json).unwrap();
    let edges = extract_edges(MeshSource::Lattice(&lat), None).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [0, 2], [0, 3], [1, 3], [2, 3]]);
}

#[test]
fn triangle_json_with_out_of_range_index_is_rejected() {
    let json = r#"{"triangles":[[0,1,5]],"vertex_count":3}"#;
    let err = serde_json::from_str::<TriangleList>(json).unwrap_err();
    assert!(err.to_string().contains("Invalid mesh"), "{err}");
}

#[test]
fn edge_list_json_is_canonicalized() {
    let json = r#"{"edges":[[3,1],[1,3],[2,2],[0,1]]}"#;
    let edges: EdgeList = serde_json::from_str(json).unwrap();
    assert_eq!(edges.as_slice(), &[[0, 1], [1, 3]]);

    let masked = mask_edges(&edges, &[true, true, true, true]).unwrap();
    assert_eq!(masked.edges.as_slice(), &[[0, 1], [1, 2]]);
}

#[test]
fn edge_list_json_roundtrip() {
    let edges = extract_edges(MeshSource::Triangles(&octahedron()), None).unwrap();
    let json = serde_json::to_string(&edges).unwrap();
    let recovered: EdgeList = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, edges);
}

// ─── Debug Formatting Tests ───────────────────────────────────

#[test]
fn mesh_source_debug_names_variant() {
    let tri = single_triangle();
    let shown = format!("{:?}", MeshSource::Triangles(&tri));
    assert!(shown.starts_with("Triangles("), "{shown}");

    let lat = full_lattice(1, 1, 1);
    assert!(format!("{:?}", MeshSource::Lattice(&lat)).starts_with("Lattice("));

    let carrier = Carrier(None);
    let shown = format!("{:?}", MeshSource::FromFittedModel(&carrier));
    assert_eq!(shown, "FromFittedModel { mesh: None }");
}
