//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Command-line settings that, together with the scenario, determine a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSettings {
    pub dimension: usize,
    pub level: u32,
    pub t_end_s: f64,
    pub initial_step_s: f64,
    pub max_step_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub settings: RunSettings,
    pub element_count: usize,
    pub solver_version: String,
    pub rank: usize,
    /// Filled in once the run has finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        scenario_name: &str,
        settings: RunSettings,
        element_count: usize,
        solver_version: &str,
        rank: usize,
    ) -> Self {
        Self {
            run_id,
            scenario_name: scenario_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            settings,
            element_count,
            solver_version: solver_version.to_string(),
            rank,
            summary: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub final_time_s: f64,
    pub accepted_steps: usize,
    pub cutback_retries: usize,
    pub snapshots_written: usize,
    pub snapshot_failures: usize,
    pub wall_time_s: f64,
}
