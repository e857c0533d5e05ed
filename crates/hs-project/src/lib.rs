//! hs-project: scenario file format, validation and conversion into model
//! and time-stepping parameters.

pub mod convert;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use convert::{base_cells, domain_lengths, model_params, step_control};
pub use migrate::{migrate_to_latest, LATEST_VERSION};
pub use schema::*;
pub use validate::{validate_scenario, ValidationError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Conversion error: {what}")]
    Conversion { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The built-in reference experiment.
pub fn reference_scenario() -> ScenarioDef {
    ScenarioDef {
        version: LATEST_VERSION,
        name: "Hele-Shaw infiltration".to_string(),
        grid: GridDef::default(),
        domain: DomainDef::default(),
        fluids: FluidsDef::default(),
        capillary: CapillaryDef::default(),
        boundary: BoundaryDef::default(),
        tolerances: TolerancesDef::default(),
        stepping: SteppingDef::default(),
        permeability: PermeabilityDef::default(),
        output: OutputDef::default(),
    }
}

/// Parse, migrate and validate a YAML scenario.
pub fn parse_yaml(content: &str) -> ProjectResult<ScenarioDef> {
    let scenario: ScenarioDef = serde_yaml::from_str(content)?;
    let scenario = migrate_to_latest(scenario)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<ScenarioDef> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &std::path::Path, scenario: &ScenarioDef) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<ScenarioDef> {
    let content = std::fs::read_to_string(path)?;
    let scenario: ScenarioDef = serde_json::from_str(&content)?;
    let scenario = migrate_to_latest(scenario)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &std::path::Path, scenario: &ScenarioDef) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}
