use std::path::Path;

use hs_project::{PermeabilityDef, LATEST_VERSION};

fn scenarios_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios")
}

#[test]
fn reference_file_equals_builtin_scenario() {
    let loaded = hs_project::load_yaml(&scenarios_dir().join("reference.yaml"))
        .unwrap_or_else(|e| panic!("Failed to load reference.yaml: {}", e));
    assert_eq!(loaded, hs_project::reference_scenario());
}

#[test]
fn partial_file_fills_defaults() {
    let loaded = hs_project::load_yaml(&scenarios_dir().join("layered_oscillating.yaml"))
        .unwrap_or_else(|e| panic!("Failed to load layered_oscillating.yaml: {}", e));
    assert_eq!(loaded.version, LATEST_VERSION);
    assert_eq!(loaded.grid.dimension, 3);
    assert_eq!(loaded.grid.base_cells_3d, [40, 2, 60]);
    assert_eq!(loaded.boundary.onset_s, 120.0);
    assert_eq!(loaded.boundary.port_liquid_flux, -0.075);
    assert_eq!(loaded.stepping.snapshot_every, 5);
    assert_eq!(loaded.stepping.growth_factor, 1.2);
    assert_eq!(loaded.output.directory, "layered-output");
    assert!(loaded.output.enabled);
    assert!(matches!(
        loaded.permeability,
        PermeabilityDef::Layered { ref layers, .. } if layers.len() == 2
    ));
}

#[test]
fn minimal_document_is_the_reference_configuration() {
    let scenario = hs_project::parse_yaml("version: 2\nname: Hele-Shaw infiltration\n").unwrap();
    assert_eq!(scenario, hs_project::reference_scenario());
}

#[test]
fn invalid_document_is_rejected() {
    let err = hs_project::parse_yaml("version: 2\nname: bad\ngrid:\n  dimension: 4\n").unwrap_err();
    assert!(matches!(err, hs_project::ProjectError::Validation(_)));
}
