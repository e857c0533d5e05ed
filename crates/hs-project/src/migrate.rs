//! Scenario schema migration.

use crate::schema::ScenarioDef;
use crate::ProjectError;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut scenario: ScenarioDef) -> Result<ScenarioDef, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: ScenarioDef) -> Result<ScenarioDef, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        1 => migrate_v1_to_v2(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut scenario: ScenarioDef) -> Result<ScenarioDef, ProjectError> {
    scenario.version = 1;
    Ok(scenario)
}

/// Version 1 stored the port flux as a positive inflow magnitude.
fn migrate_v1_to_v2(mut scenario: ScenarioDef) -> Result<ScenarioDef, ProjectError> {
    scenario.boundary.port_liquid_flux = -scenario.boundary.port_liquid_flux.abs();
    scenario.version = 2;
    Ok(scenario)
}
