//! Reference step solver: capillary-gravity equilibrium.
//!
//! Each step sets the liquid pressure hydrostatic from the bottom Dirichlet
//! value and the gas pressure barometric from the lid Dirichlet value, both
//! evaluated at `t + dt`. This does not discretize the flow equations; it
//! gives the driver a physically consistent state to step and snapshot.
//!
//! The pressures depend on the boundary data only, never on the step size,
//! so non-physical pressures are reported as [`SimError::NonPhysical`] and
//! never retried.

use hs_core::Id;
use hs_grid::{GridView, SpatialPoint};
use hs_model::{BoundaryClassifier, BoundaryKind, Phase, PhaseState, TwoPhaseModel};
use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::solver::StepSolver;
use crate::state::FieldState;

pub struct QuasiStaticSolver<'a, G, const D: usize> {
    model: &'a TwoPhaseModel<D>,
    grid: &'a G,
    /// A bottom facet centre where the liquid is Dirichlet
    bottom_probe: SpatialPoint<D>,
    /// A lid facet centre where the gas is Dirichlet
    top_probe: SpatialPoint<D>,
}

impl<'a, G, const D: usize> QuasiStaticSolver<'a, G, D>
where
    G: GridView<D>,
{
    /// Locate the Dirichlet facets the equilibrium is anchored to.
    pub fn new(model: &'a TwoPhaseModel<D>, grid: &'a G) -> SimResult<Self> {
        let classifier = BoundaryClassifier::new(model);
        let facets = grid.boundary_facets()?;

        let bottom_probe = facets
            .iter()
            .find(|f| {
                f.normal[D - 1] < -0.5
                    && classifier.liquid(&f.center, 0.0).kind() == BoundaryKind::Dirichlet
            })
            .map(|f| f.center)
            .ok_or(SimError::InvalidArg {
                what: "no liquid Dirichlet facet on the bottom boundary",
            })?;
        let top_probe = facets
            .iter()
            .find(|f| {
                f.normal[D - 1] > 0.5
                    && classifier.gas(&f.center, 0.0).kind() == BoundaryKind::Dirichlet
            })
            .map(|f| f.center)
            .ok_or(SimError::InvalidArg {
                what: "no gas Dirichlet facet on the lid",
            })?;

        Ok(Self {
            model,
            grid,
            bottom_probe,
            top_probe,
        })
    }

    fn dirichlet(&self, phase: Phase, x: &SpatialPoint<D>, t: f64) -> SimResult<f64> {
        BoundaryClassifier::new(self.model)
            .classify(phase, x, t)?
            .dirichlet_value()
            .ok_or(SimError::Backend {
                message: format!("{phase} probe lost its Dirichlet condition at t={t}"),
            })
    }

    /// Equilibrium pressures for the boundary data at time `t`.
    pub fn equilibrium(&self, t: f64) -> SimResult<FieldState> {
        let p_bottom = self.dirichlet(Phase::Liquid, &self.bottom_probe, t)?;
        let p_top = self.dirichlet(Phase::Gas, &self.top_probe, t)?;

        let params = self.model.params();
        let height = params.geometry.height;
        let liquid_weight = params.fluids.liquid_weight();
        let fluids = &params.fluids;
        // dp_g/dz = -p_g g / (R T)
        let gas_scale =
            fluids.gravity.value / (fluids.gas_constant * fluids.gas_temperature.value);

        let cells = (0..self.grid.element_count())
            .into_par_iter()
            .map(|index| {
                let element = Id::try_from_index(index).ok_or(SimError::InvalidArg {
                    what: "element index overflow",
                })?;
                let z = self.grid.center(element)?[D - 1];
                let p_l = p_bottom - liquid_weight * z;
                let p_g = p_top * (gas_scale * (height - z)).exp();
                if !(p_l.is_finite() && p_g.is_finite()) || p_l <= 0.0 || p_g <= 0.0 {
                    return Err(SimError::NonPhysical {
                        message: format!(
                            "equilibrium pressures p_l={p_l} p_g={p_g} at z={z}"
                        ),
                    });
                }
                Ok(PhaseState::new(p_l, p_g))
            })
            .collect::<SimResult<Vec<_>>>()?;

        Ok(FieldState::new(cells))
    }
}

impl<G, const D: usize> StepSolver for QuasiStaticSolver<'_, G, D>
where
    G: GridView<D>,
{
    type State = FieldState;

    fn solve_step(&mut self, time: f64, step: f64, previous: &FieldState) -> SimResult<FieldState> {
        if previous.len() != self.grid.element_count() {
            return Err(SimError::InvalidArg {
                what: "state size does not match the grid",
            });
        }
        self.equilibrium(time + step)
    }
}
