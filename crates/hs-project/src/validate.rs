//! Scenario validation.

use crate::convert::model_params;
use crate::schema::{PermeabilityDef, ScenarioDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid model parameters: {reason}")]
    InvalidModel { reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

pub fn validate_scenario(scenario: &ScenarioDef) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "", "must not be empty"));
    }

    let grid = &scenario.grid;
    if !matches!(grid.dimension, 2 | 3) {
        return Err(invalid("grid.dimension", grid.dimension, "must be 2 or 3"));
    }
    if grid.base_cells_2d.contains(&0) {
        return Err(invalid(
            "grid.base_cells_2d",
            format!("{:?}", grid.base_cells_2d),
            "every axis needs at least one cell",
        ));
    }
    if grid.base_cells_3d.contains(&0) {
        return Err(invalid(
            "grid.base_cells_3d",
            format!("{:?}", grid.base_cells_3d),
            "every axis needs at least one cell",
        ));
    }

    model_params(scenario)
        .validate()
        .map_err(|e| ValidationError::InvalidModel {
            reason: e.to_string(),
        })?;

    let stepping = &scenario.stepping;
    positive_finite("stepping.min_step_s", stepping.min_step_s)?;
    if !stepping.growth_factor.is_finite() || stepping.growth_factor < 1.0 {
        return Err(invalid(
            "stepping.growth_factor",
            stepping.growth_factor,
            "must be at least 1",
        ));
    }

    match &scenario.permeability {
        PermeabilityDef::Uniform { multiplier } => {
            positive_finite("permeability.multiplier", *multiplier)?;
        }
        PermeabilityDef::Layered {
            layers,
            default_multiplier,
        } => {
            positive_finite("permeability.default_multiplier", *default_multiplier)?;
            for layer in layers {
                positive_finite("permeability.layers.multiplier", layer.multiplier)?;
                if !layer.top_m.is_finite() {
                    return Err(invalid(
                        "permeability.layers.top_m",
                        layer.top_m,
                        "must be finite",
                    ));
                }
            }
        }
    }

    if scenario.output.enabled && scenario.output.directory.trim().is_empty() {
        return Err(invalid(
            "output.directory",
            "",
            "must not be empty when output is enabled",
        ));
    }
    Ok(())
}
