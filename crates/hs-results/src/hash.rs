//! Content-based hashing for run IDs.

use hs_project::ScenarioDef;
use sha2::{Digest, Sha256};

use crate::types::RunSettings;

pub fn compute_run_id(
    scenario: &ScenarioDef,
    settings: &RunSettings,
    solver_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());

    let settings_json = serde_json::to_string(settings).unwrap_or_default();
    hasher.update(settings_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
