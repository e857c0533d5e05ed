//! Scenario schema definitions.
//!
//! Every section has defaults equal to the reference experiment, so a file
//! only needs `version` and `name`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub grid: GridDef,
    #[serde(default)]
    pub domain: DomainDef,
    #[serde(default)]
    pub fluids: FluidsDef,
    #[serde(default)]
    pub capillary: CapillaryDef,
    #[serde(default)]
    pub boundary: BoundaryDef,
    #[serde(default)]
    pub tolerances: TolerancesDef,
    #[serde(default)]
    pub stepping: SteppingDef,
    #[serde(default)]
    pub permeability: PermeabilityDef,
    #[serde(default)]
    pub output: OutputDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridDef {
    /// 2 or 3
    pub dimension: usize,
    /// Level-0 cells per axis in 2-D (width, height)
    pub base_cells_2d: [usize; 2],
    /// Level-0 cells per axis in 3-D (width, depth, height)
    pub base_cells_3d: [usize; 3],
}

impl Default for GridDef {
    fn default() -> Self {
        Self {
            dimension: 2,
            base_cells_2d: [40, 60],
            base_cells_3d: [40, 2, 60],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DomainDef {
    pub height_m: f64,
    pub width_m: f64,
    pub depth_m: f64,
    pub water_table_m: f64,
}

impl Default for DomainDef {
    fn default() -> Self {
        Self {
            height_m: 0.6,
            width_m: 0.4,
            depth_m: 0.02,
            water_table_m: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FluidsDef {
    pub porosity: f64,
    pub viscosity_liquid_pa_s: f64,
    pub viscosity_gas_pa_s: f64,
    pub reference_permeability_m2: f64,
    pub density_liquid_kg_m3: f64,
    pub gas_constant_j_kg_k: f64,
    pub gas_temperature_k: f64,
    pub gravity_m_s2: f64,
}

impl Default for FluidsDef {
    fn default() -> Self {
        Self {
            porosity: 0.4,
            viscosity_liquid_pa_s: 1e-3,
            viscosity_gas_pa_s: 4.65e-5,
            reference_permeability_m2: 6.64e-11,
            density_liquid_kg_m3: 1000.0,
            gas_constant_j_kg_k: 287.2,
            gas_temperature_k: 300.0,
            gravity_m_s2: 9.81,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CapillaryDef {
    pub entry_pressure_pa: f64,
    pub atmospheric_pressure_pa: f64,
    pub top_saturation: f64,
}

impl Default for CapillaryDef {
    fn default() -> Self {
        Self {
            entry_pressure_pa: 1000.0,
            atmospheric_pressure_pa: 1e5,
            top_saturation: 0.2,
        }
    }
}

/// Water table schedule and lid injection ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryDef {
    pub onset_s: f64,
    pub period_s: f64,
    pub amplitude_m: f64,
    pub port_centers_m: Vec<f64>,
    pub port_half_width_m: f64,
    /// Liquid Neumann flux through a port (negative = inflow)
    pub port_liquid_flux: f64,
}

impl Default for BoundaryDef {
    fn default() -> Self {
        Self {
            onset_s: 6_000_000.0,
            period_s: 60.0,
            amplitude_m: 0.1,
            port_centers_m: vec![0.1, 0.2, 0.3],
            port_half_width_m: 0.03,
            port_liquid_flux: -0.075,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TolerancesDef {
    pub residual_saturation: f64,
    pub face_m: f64,
}

impl Default for TolerancesDef {
    fn default() -> Self {
        Self {
            residual_saturation: 1e-6,
            face_m: 1e-5,
        }
    }
}

/// Step policy; the first step, step cap and end time come from the
/// command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SteppingDef {
    pub min_step_s: f64,
    pub growth_factor: f64,
    pub snapshot_every: usize,
}

impl Default for SteppingDef {
    fn default() -> Self {
        Self {
            min_step_s: 1e-6,
            growth_factor: 1.2,
            snapshot_every: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PermeabilityDef {
    Uniform {
        multiplier: f64,
    },
    /// Horizontal layers. A point takes the multiplier of the lowest layer
    /// whose `top_m` lies at or above it, or `default_multiplier` above all
    /// layers.
    Layered {
        layers: Vec<LayerDef>,
        default_multiplier: f64,
    },
}

impl Default for PermeabilityDef {
    fn default() -> Self {
        PermeabilityDef::Uniform { multiplier: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerDef {
    pub top_m: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputDef {
    pub enabled: bool,
    pub directory: String,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "heleshaw-output".to_string(),
        }
    }
}
