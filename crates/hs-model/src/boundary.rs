//! Boundary condition classification for both phases.
//!
//! Faces are tested in a fixed priority order so points on edges and
//! corners resolve deterministically: left/right, then top, then bottom,
//! then (3-D only) front/back.

use std::fmt;

use hs_core::Real;
use hs_grid::SpatialPoint;

use crate::constitutive::TwoPhaseModel;
use crate::error::{ModelError, ModelResult};

/// Fluid phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Gas,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Liquid => write!(f, "liquid"),
            Phase::Gas => write!(f, "gas"),
        }
    }
}

/// Condition type without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    Dirichlet,
    Neumann,
    Unset,
}

/// Boundary condition of one phase at one facet point and time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Prescribed phase pressure [Pa]
    Dirichlet(Real),
    /// Prescribed normal flux (negative = into the domain)
    Neumann(Real),
    /// The point is not on any declared face
    Unset,
}

impl BoundaryCondition {
    pub fn kind(&self) -> BoundaryKind {
        match self {
            BoundaryCondition::Dirichlet(_) => BoundaryKind::Dirichlet,
            BoundaryCondition::Neumann(_) => BoundaryKind::Neumann,
            BoundaryCondition::Unset => BoundaryKind::Unset,
        }
    }

    pub fn dirichlet_value(&self) -> Option<Real> {
        match self {
            BoundaryCondition::Dirichlet(v) => Some(*v),
            _ => None,
        }
    }

    pub fn neumann_flux(&self) -> Option<Real> {
        match self {
            BoundaryCondition::Neumann(j) => Some(*j),
            _ => None,
        }
    }
}

/// Classifies boundary points of the box domain described by a model's
/// geometry. Borrowing the model keeps it `Send + Sync`.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryClassifier<'m, const D: usize> {
    model: &'m TwoPhaseModel<D>,
}

impl<'m, const D: usize> BoundaryClassifier<'m, D> {
    pub fn new(model: &'m TwoPhaseModel<D>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m TwoPhaseModel<D> {
        self.model
    }

    fn eps(&self) -> Real {
        self.model.params().tolerances.face
    }

    fn on_left_right(&self, x: &SpatialPoint<D>) -> bool {
        let width = self.model.params().geometry.width;
        x[0] < self.eps() || x[0] > width - self.eps()
    }

    fn on_top(&self, x: &SpatialPoint<D>) -> bool {
        x[D - 1] > self.model.params().geometry.height - self.eps()
    }

    fn on_bottom(&self, x: &SpatialPoint<D>) -> bool {
        x[D - 1] < self.eps()
    }

    fn on_front_back(&self, x: &SpatialPoint<D>) -> bool {
        if D != 3 {
            return false;
        }
        let depth = self.model.params().geometry.depth;
        x[1] < self.eps() || x[1] > depth - self.eps()
    }

    /// Hydrostatic liquid pressure at the bottom for the scheduled water
    /// table at time `t`.
    pub fn bottom_pressure(&self, t: Real) -> Real {
        let p = self.model.params();
        let h = p.schedule.effective_height(p.geometry.water_table, t);
        p.capillary.atmospheric_pressure + h * p.fluids.liquid_weight()
    }

    /// Liquid phase condition at facet point `x`, time `t`.
    pub fn liquid(&self, x: &SpatialPoint<D>, t: Real) -> BoundaryCondition {
        if self.on_left_right(x) {
            return BoundaryCondition::Neumann(0.0);
        }
        if self.on_top(x) {
            let ports = &self.model.params().ports;
            let flux = if ports.contains(x[0]) {
                ports.liquid_flux
            } else {
                0.0
            };
            return BoundaryCondition::Neumann(flux);
        }
        if self.on_bottom(x) {
            return BoundaryCondition::Dirichlet(self.bottom_pressure(t));
        }
        if self.on_front_back(x) {
            return BoundaryCondition::Neumann(0.0);
        }
        BoundaryCondition::Unset
    }

    /// Gas phase condition at facet point `x`, time `t`.
    pub fn gas(&self, x: &SpatialPoint<D>, _t: Real) -> BoundaryCondition {
        if self.on_left_right(x) {
            return BoundaryCondition::Neumann(0.0);
        }
        if self.on_top(x) {
            if self.model.params().ports.contains(x[0]) {
                return BoundaryCondition::Neumann(0.0);
            }
            return BoundaryCondition::Dirichlet(self.model.top_gas_pressure());
        }
        if self.on_bottom(x) {
            return BoundaryCondition::Neumann(0.0);
        }
        if self.on_front_back(x) {
            return BoundaryCondition::Neumann(0.0);
        }
        BoundaryCondition::Unset
    }

    /// Classify for `phase`, turning `Unset` into an error.
    pub fn classify(
        &self,
        phase: Phase,
        x: &SpatialPoint<D>,
        t: Real,
    ) -> ModelResult<BoundaryCondition> {
        let bc = match phase {
            Phase::Liquid => self.liquid(x, t),
            Phase::Gas => self.gas(x, t),
        };
        if bc == BoundaryCondition::Unset {
            return Err(ModelError::UnclassifiedBoundary {
                phase,
                position: x.iter().copied().collect(),
                time: t,
            });
        }
        Ok(bc)
    }
}
