use hs_project::schema::*;
use hs_project::{load_json, load_yaml, reference_scenario, save_json, save_yaml};

#[test]
fn roundtrip_yaml_layered_scenario() {
    let mut scenario = reference_scenario();
    scenario.name = "Layered".to_string();
    scenario.permeability = PermeabilityDef::Layered {
        layers: vec![LayerDef {
            top_m: 0.2,
            multiplier: 3.0,
        }],
        default_multiplier: 1.0,
    };

    let path = std::env::temp_dir().join("hs_project_roundtrip_layered.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_reference_scenario() {
    let scenario = reference_scenario();
    let path = std::env::temp_dir().join("hs_project_roundtrip_reference.json");
    save_json(&path, &scenario).unwrap();
    assert_eq!(load_json(&path).unwrap(), scenario);
}

#[test]
fn save_refuses_invalid_scenario() {
    let mut scenario = reference_scenario();
    scenario.stepping.growth_factor = 0.5;
    let path = std::env::temp_dir().join("hs_project_invalid.yaml");
    assert!(save_yaml(&path, &scenario).is_err());
}
