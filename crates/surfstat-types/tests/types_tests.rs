//! Integration tests for surfstat-types.

use surfstat_types::constants::{
    DEFAULT_MAX_CHUNK, LOW_MEMORY_MAX_CHUNK, MACHINE_EPSILON, NESTING_TOLERANCE,
};
use surfstat_types::{StatsError, StatsResult};

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn dimension_mismatch_message_names_shapes() {
    let err = StatsError::DimensionMismatch(
        "design has 84 observations but response has 77".into(),
    );
    let msg = err.to_string();
    assert!(msg.contains("84"));
    assert!(msg.contains("77"));
    assert!(msg.starts_with("Dimension mismatch"));
}

#[test]
fn unsupported_mesh_message() {
    let err = StatsError::UnsupportedMeshFormat("no triangles or lattice".into());
    assert_eq!(
        err.to_string(),
        "Unsupported mesh format: no triangles or lattice"
    );
}

#[test]
fn result_alias_propagates() {
    fn inner() -> StatsResult<u32> {
        Err(StatsError::DegenerateDesign("all zero".into()))
    }
    fn outer() -> StatsResult<u32> {
        let v = inner()?;
        Ok(v + 1)
    }
    assert!(matches!(outer(), Err(StatsError::DegenerateDesign(_))));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn chunk_sizes_are_powers_of_two() {
    assert!(DEFAULT_MAX_CHUNK.is_power_of_two());
    assert!(LOW_MEMORY_MAX_CHUNK.is_power_of_two());
    assert!(LOW_MEMORY_MAX_CHUNK < DEFAULT_MAX_CHUNK);
}

#[test]
fn nesting_tolerance_exceeds_round_off() {
    assert!(NESTING_TOLERANCE > 1.0e6 * MACHINE_EPSILON);
    assert!(NESTING_TOLERANCE < 1.0e-6);
}
