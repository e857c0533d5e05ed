//! Pointwise phase pressures and derived saturations.

use hs_core::{ensure_finite, Real};
use hs_grid::SpatialPoint;

use crate::constitutive::TwoPhaseModel;
use crate::error::ModelResult;

/// Liquid and gas pressure at one sample [Pa]. Saturations are derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseState {
    pub p_l: Real,
    pub p_g: Real,
}

impl PhaseState {
    pub fn new(p_l: Real, p_g: Real) -> Self {
        Self { p_l, p_g }
    }

    /// `p_g - p_l`.
    pub fn capillary_pressure(&self) -> Real {
        self.p_g - self.p_l
    }

    /// Liquid saturation in `[0, 1]`.
    ///
    /// Capillary pressures at or below the entry pressure (including
    /// non-positive ones) mean a fully saturated sample.
    pub fn liquid_saturation<const D: usize>(
        &self,
        model: &TwoPhaseModel<D>,
        x: &SpatialPoint<D>,
    ) -> ModelResult<Real> {
        ensure_finite(self.p_l, "liquid pressure")?;
        ensure_finite(self.p_g, "gas pressure")?;
        let pc = self.capillary_pressure();
        if pc <= model.params().capillary.entry_pressure {
            return Ok(1.0);
        }
        let s_l = model.inverse_capillary_pressure(x, pc)?;
        Ok(s_l.clamp(0.0, 1.0))
    }

    /// `1 - s_l`.
    pub fn gas_saturation<const D: usize>(
        &self,
        model: &TwoPhaseModel<D>,
        x: &SpatialPoint<D>,
    ) -> ModelResult<Real> {
        Ok(1.0 - self.liquid_saturation(model, x)?)
    }
}
