//! Derived output fields and the snapshot adapter.
//!
//! Cell velocities are Darcy velocities reconstructed from two-point face
//! fluxes: harmonic-mean permeability, upwind relative permeability and the
//! gravity-corrected pressure difference across each facet. Boundary facets
//! take the phase's Neumann flux or a half-cell two-point flux to the
//! Dirichlet value.

use hs_core::Id;
use hs_grid::{GridView, Intersection, SpatialPoint, SpatialVector};
use hs_model::{BoundaryClassifier, BoundaryCondition, Phase, PhaseState, TwoPhaseModel};
use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::snapshot::{
    FieldValues, Snapshot, SnapshotError, SnapshotField, SnapshotResult, SnapshotSink,
    SnapshotWriter,
};
use crate::state::FieldState;

struct Cell<const D: usize> {
    center: SpatialPoint<D>,
    state: PhaseState,
    s_l: f64,
    permeability: f64,
}

fn phase_pressure(state: &PhaseState, phase: Phase) -> f64 {
    match phase {
        Phase::Liquid => state.p_l,
        Phase::Gas => state.p_g,
    }
}

fn density<const D: usize>(model: &TwoPhaseModel<D>, phase: Phase, p: f64) -> f64 {
    match phase {
        Phase::Liquid => model.density_liquid(p),
        Phase::Gas => model.density_gas(p),
    }
}

/// Relative permeability over viscosity.
fn mobility<const D: usize>(model: &TwoPhaseModel<D>, phase: Phase, cell: &Cell<D>) -> f64 {
    match phase {
        Phase::Liquid => {
            model.relative_permeability_liquid(cell.s_l) / model.viscosity_liquid(cell.state.p_l)
        }
        Phase::Gas => {
            model.relative_permeability_gas(1.0 - cell.s_l) / model.viscosity_gas(cell.state.p_g)
        }
    }
}

fn harmonic_mean(a: f64, b: f64) -> f64 {
    2.0 * a * b / (a + b)
}

/// Outward normal Darcy velocity of `phase` through `facet`.
fn normal_velocity<const D: usize>(
    classifier: &BoundaryClassifier<'_, D>,
    cells: &[Cell<D>],
    facet: &Intersection<D>,
    phase: Phase,
    time: f64,
) -> SimResult<f64> {
    let model = classifier.model();
    let cell = cell_at(cells, facet.inside)?;
    let p_in = phase_pressure(&cell.state, phase);
    let g_n = model.gravity().dot(&facet.normal);

    let Some(outside) = facet.outside else {
        return match classifier.classify(phase, &facet.center, time)? {
            BoundaryCondition::Neumann(flux) => Ok(flux),
            BoundaryCondition::Dirichlet(p_b) => {
                let dist = (facet.center - cell.center).norm();
                let drive = (p_b - p_in) / dist - density(model, phase, p_in) * g_n;
                Ok(-cell.permeability * mobility(model, phase, cell) * drive)
            }
            BoundaryCondition::Unset => Err(SimError::Backend {
                message: format!("unclassified {phase} boundary facet"),
            }),
        };
    };

    let other = cell_at(cells, outside)?;
    let p_out = phase_pressure(&other.state, phase);
    let dist = (other.center - cell.center).norm();
    let rho = 0.5 * (density(model, phase, p_in) + density(model, phase, p_out));
    let drive = (p_out - p_in) / dist - rho * g_n;
    // outflow (drive < 0) takes the inside mobility
    let upwind = if drive <= 0.0 { cell } else { other };
    let k = harmonic_mean(cell.permeability, other.permeability);
    Ok(-k * mobility(model, phase, upwind) * drive)
}

fn cell_at<const D: usize>(cells: &[Cell<D>], element: Id) -> SimResult<&Cell<D>> {
    cells.get(element.index()).ok_or(SimError::InvalidArg {
        what: "facet references an element outside the state",
    })
}

/// Per-axis average of the facet velocities of one element.
fn cell_velocity<const D: usize>(
    classifier: &BoundaryClassifier<'_, D>,
    cells: &[Cell<D>],
    facets: &[Intersection<D>],
    phase: Phase,
    time: f64,
) -> SimResult<SpatialVector<D>> {
    let mut sum = SpatialVector::<D>::zeros();
    let mut weight = SpatialVector::<D>::zeros();
    for facet in facets {
        let v_n = normal_velocity(classifier, cells, facet, phase, time)?;
        sum += facet.normal * v_n;
        weight += facet.normal.abs();
    }
    Ok(sum.zip_map(&weight, |s, w| if w > 0.0 { s / w } else { 0.0 }))
}

fn scalar_field<const D: usize>(
    name: &str,
    cells: &[Cell<D>],
    value: impl Fn(&Cell<D>) -> f64,
) -> SnapshotField {
    SnapshotField {
        name: name.to_string(),
        values: FieldValues::Scalar(cells.iter().map(value).collect()),
    }
}

fn vectors<const D: usize>(values: &[SpatialVector<D>]) -> FieldValues {
    FieldValues::Vector(values.iter().map(|v| v.iter().copied().collect()).collect())
}

/// Pressures, saturations and phase velocities of `state` at `time`.
pub fn derive_fields<G, const D: usize>(
    model: &TwoPhaseModel<D>,
    grid: &G,
    state: &FieldState,
    time: f64,
) -> SimResult<Vec<SnapshotField>>
where
    G: GridView<D>,
{
    let n = grid.element_count();
    if state.len() != n {
        return Err(SimError::InvalidArg {
            what: "state size does not match the grid",
        });
    }

    let cells = state
        .cells()
        .par_iter()
        .enumerate()
        .map(|(index, phase_state)| {
            let element = Id::try_from_index(index).ok_or(SimError::InvalidArg {
                what: "element index overflow",
            })?;
            let center = grid.center(element)?;
            Ok(Cell {
                s_l: phase_state.liquid_saturation(model, &center)?,
                permeability: model.absolute_permeability(element)?,
                center,
                state: *phase_state,
            })
        })
        .collect::<SimResult<Vec<_>>>()?;

    let classifier = BoundaryClassifier::new(model);
    let velocities = (0..n)
        .into_par_iter()
        .map(|index| {
            let element = Id::try_from_index(index).ok_or(SimError::InvalidArg {
                what: "element index overflow",
            })?;
            let facets = grid.intersections(element)?;
            let liquid = cell_velocity(&classifier, &cells, &facets, Phase::Liquid, time)?;
            let gas = cell_velocity(&classifier, &cells, &facets, Phase::Gas, time)?;
            Ok((liquid, gas))
        })
        .collect::<SimResult<Vec<_>>>()?;
    let (liquid, gas): (Vec<_>, Vec<_>) = velocities.into_iter().unzip();

    Ok(vec![
        scalar_field("p_l", &cells, |c| c.state.p_l),
        scalar_field("p_g", &cells, |c| c.state.p_g),
        scalar_field("s_l", &cells, |c| c.s_l),
        scalar_field("s_g", &cells, |c| 1.0 - c.s_l),
        SnapshotField {
            name: "liquid_velocity".to_string(),
            values: vectors(&liquid),
        },
        SnapshotField {
            name: "gas_velocity".to_string(),
            values: vectors(&gas),
        },
    ])
}

/// Snapshot sink that derives the output fields of a [`FieldState`] and
/// hands them to a [`SnapshotWriter`].
pub struct FieldSnapshots<'a, G, W, const D: usize> {
    model: &'a TwoPhaseModel<D>,
    grid: &'a G,
    writer: W,
    rank: usize,
}

impl<'a, G, W, const D: usize> FieldSnapshots<'a, G, W, D>
where
    G: GridView<D>,
    W: SnapshotWriter,
{
    pub fn new(model: &'a TwoPhaseModel<D>, grid: &'a G, writer: W, rank: usize) -> Self {
        Self {
            model,
            grid,
            writer,
            rank,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<G, W, const D: usize> SnapshotSink<FieldState> for FieldSnapshots<'_, G, W, D>
where
    G: GridView<D>,
    W: SnapshotWriter,
{
    fn offer(&mut self, step: usize, time_s: f64, state: &FieldState) -> SnapshotResult<()> {
        let fields = derive_fields(self.model, self.grid, state, time_s).map_err(|e| {
            SnapshotError::Field {
                message: e.to_string(),
            }
        })?;
        self.writer.write_snapshot(&Snapshot {
            time_s,
            step,
            rank: self.rank,
            fields,
        })
    }
}
