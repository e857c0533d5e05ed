//! Conversion of a scenario into model and controller parameters.

use hs_core::units::{k, kg_per_m3, m2, mps2, pa_s};
use hs_grid::SpatialPoint;
use hs_model::{
    CapillaryParams, DomainGeometry, FluidProperties, InjectionPorts, ModelTolerances,
    PermeabilityGenerator, TwoPhaseParams, UniformPermeability, WaterTableSchedule,
};
use hs_sim::StepControl;

use crate::schema::{PermeabilityDef, ScenarioDef};
use crate::{ProjectError, ProjectResult};

pub fn model_params(scenario: &ScenarioDef) -> TwoPhaseParams {
    let d = &scenario.domain;
    let f = &scenario.fluids;
    let c = &scenario.capillary;
    let b = &scenario.boundary;
    TwoPhaseParams {
        geometry: DomainGeometry {
            height: d.height_m,
            width: d.width_m,
            depth: d.depth_m,
            water_table: d.water_table_m,
        },
        capillary: CapillaryParams {
            entry_pressure: c.entry_pressure_pa,
            atmospheric_pressure: c.atmospheric_pressure_pa,
            top_saturation: c.top_saturation,
        },
        schedule: WaterTableSchedule {
            onset: b.onset_s,
            period: b.period_s,
            amplitude: b.amplitude_m,
        },
        ports: InjectionPorts {
            centers: b.port_centers_m.clone(),
            half_width: b.port_half_width_m,
            liquid_flux: b.port_liquid_flux,
        },
        fluids: FluidProperties {
            porosity: f.porosity,
            viscosity_liquid: pa_s(f.viscosity_liquid_pa_s),
            viscosity_gas: pa_s(f.viscosity_gas_pa_s),
            reference_permeability: m2(f.reference_permeability_m2),
            density_liquid: kg_per_m3(f.density_liquid_kg_m3),
            gas_constant: f.gas_constant_j_kg_k,
            gas_temperature: k(f.gas_temperature_k),
            gravity: mps2(f.gravity_m_s2),
        },
        tolerances: ModelTolerances {
            residual_saturation: scenario.tolerances.residual_saturation,
            face: scenario.tolerances.face_m,
        },
    }
}

/// Controller settings for the run length and step bounds given on the
/// command line.
pub fn step_control(
    scenario: &ScenarioDef,
    t_end: f64,
    initial_step: f64,
    max_step: f64,
) -> StepControl {
    StepControl {
        initial_step,
        max_step,
        min_step: scenario.stepping.min_step_s,
        growth_factor: scenario.stepping.growth_factor,
        t_end,
        snapshot_every: scenario.stepping.snapshot_every,
    }
}

/// Domain extents per axis, vertical axis last.
pub fn domain_lengths<const D: usize>(scenario: &ScenarioDef) -> ProjectResult<[f64; D]> {
    let d = &scenario.domain;
    let lengths = match D {
        2 => vec![d.width_m, d.height_m],
        3 => vec![d.width_m, d.depth_m, d.height_m],
        _ => return Err(unsupported_dimension(D)),
    };
    let mut out = [0.0; D];
    out.copy_from_slice(&lengths);
    Ok(out)
}

/// Level-0 cell counts per axis, vertical axis last.
pub fn base_cells<const D: usize>(scenario: &ScenarioDef) -> ProjectResult<[usize; D]> {
    let cells: &[usize] = match D {
        2 => &scenario.grid.base_cells_2d,
        3 => &scenario.grid.base_cells_3d,
        _ => return Err(unsupported_dimension(D)),
    };
    let mut out = [0; D];
    out.copy_from_slice(cells);
    Ok(out)
}

fn unsupported_dimension(dim: usize) -> ProjectError {
    ProjectError::Conversion {
        what: format!("no grid layout for dimension {dim}"),
    }
}

impl PermeabilityDef {
    /// Generator evaluating this permeability description at points.
    pub fn generator<const D: usize>(&self) -> Box<dyn PermeabilityGenerator<D>> {
        match self {
            PermeabilityDef::Uniform { multiplier } => Box::new(UniformPermeability(*multiplier)),
            PermeabilityDef::Layered {
                layers,
                default_multiplier,
            } => {
                let mut layers: Vec<(f64, f64)> =
                    layers.iter().map(|l| (l.top_m, l.multiplier)).collect();
                layers.sort_by(|a, b| a.0.total_cmp(&b.0));
                let default_multiplier = *default_multiplier;
                Box::new(move |x: &SpatialPoint<D>| {
                    let z = x[D - 1];
                    layers
                        .iter()
                        .find(|(top, _)| z <= *top)
                        .map_or(default_multiplier, |(_, m)| *m)
                })
            }
        }
    }
}
