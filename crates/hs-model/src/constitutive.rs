//! Constitutive relations of the two-phase model.

use hs_core::{ElementId, Real};
use hs_grid::{GridView, SpatialPoint, SpatialVector};

use crate::error::{ModelError, ModelResult};
use crate::field::{MaterialField, PermeabilityGenerator, UniformPermeability};
use crate::params::TwoPhaseParams;
use crate::state::PhaseState;

/// Two-phase immiscible flow model in `D` space dimensions.
///
/// Immutable after construction, so every relation can be evaluated from
/// many assembly threads at once.
#[derive(Clone, Debug)]
pub struct TwoPhaseModel<const D: usize> {
    params: TwoPhaseParams,
    field: MaterialField,
    gravity: SpatialVector<D>,
}

impl<const D: usize> TwoPhaseModel<D> {
    /// Build the model and populate one permeability multiplier per element
    /// of `grid` from `generator`.
    pub fn new<G, P>(params: TwoPhaseParams, grid: &G, generator: &P) -> ModelResult<Self>
    where
        G: GridView<D>,
        P: PermeabilityGenerator<D> + ?Sized,
    {
        if D == 0 || D > 3 {
            return Err(ModelError::InvalidParameter {
                what: "dimension must be 1, 2 or 3",
            });
        }
        params.validate()?;

        let field = MaterialField::from_grid(grid, generator)?;
        let mut gravity = SpatialVector::<D>::zeros();
        gravity[D - 1] = -params.fluids.gravity.value;

        Ok(Self {
            params,
            field,
            gravity,
        })
    }

    /// Model with the uniform multiplier 1.
    pub fn uniform<G: GridView<D>>(params: TwoPhaseParams, grid: &G) -> ModelResult<Self> {
        Self::new(params, grid, &UniformPermeability::default())
    }

    pub fn params(&self) -> &TwoPhaseParams {
        &self.params
    }

    pub fn material_field(&self) -> &MaterialField {
        &self.field
    }

    pub fn porosity(&self, _x: &SpatialPoint<D>) -> Real {
        self.params.fluids.porosity
    }

    /// `p_entry / sqrt(s_l)`.
    pub fn capillary_pressure(&self, _x: &SpatialPoint<D>, s_l: Real) -> ModelResult<Real> {
        if !s_l.is_finite() || s_l <= 0.0 {
            return Err(ModelError::InvalidSaturation {
                what: "capillary pressure",
                value: s_l,
            });
        }
        Ok(self.params.capillary.entry_pressure / s_l.sqrt())
    }

    /// `(p_entry / pc)^2`. Not clamped: capillary pressures below the entry
    /// pressure give values above 1.
    pub fn inverse_capillary_pressure(&self, _x: &SpatialPoint<D>, pc: Real) -> ModelResult<Real> {
        if !pc.is_finite() || pc <= 0.0 {
            return Err(ModelError::InvalidCapillaryPressure { value: pc });
        }
        let ratio = self.params.capillary.entry_pressure / pc;
        Ok(ratio * ratio)
    }

    pub fn relative_permeability_liquid(&self, s_l: Real) -> Real {
        self.relative_permeability(s_l)
    }

    pub fn relative_permeability_gas(&self, s_g: Real) -> Real {
        self.relative_permeability(s_g)
    }

    // zero up to the residual saturation, quadratic above
    fn relative_permeability(&self, s: Real) -> Real {
        let eps = self.params.tolerances.residual_saturation;
        if s <= eps {
            0.0
        } else {
            (s - eps) * (s - eps)
        }
    }

    pub fn viscosity_liquid(&self, _p_l: Real) -> Real {
        self.params.fluids.viscosity_liquid.value
    }

    pub fn viscosity_gas(&self, _p_g: Real) -> Real {
        self.params.fluids.viscosity_gas.value
    }

    /// Scalar absolute permeability of `element` [m²].
    pub fn absolute_permeability(&self, element: ElementId) -> ModelResult<Real> {
        let multiplier = self.field.get(element)?;
        Ok(multiplier * self.params.fluids.reference_permeability.value)
    }

    /// `(0, ..., 0, -g)`.
    pub fn gravity(&self) -> &SpatialVector<D> {
        &self.gravity
    }

    pub fn molar_density_liquid(&self, p_l: Real) -> Real {
        self.density_liquid(p_l)
    }

    pub fn molar_density_gas(&self, p_g: Real) -> Real {
        self.density_gas(p_g)
    }

    /// Incompressible liquid.
    pub fn density_liquid(&self, _p_l: Real) -> Real {
        self.params.fluids.density_liquid.value
    }

    /// Ideal gas at fixed temperature.
    pub fn density_gas(&self, p_g: Real) -> Real {
        self.params.fluids.gas_density(p_g)
    }

    pub fn source_liquid(&self, _x: &SpatialPoint<D>, _time: Real) -> Real {
        0.0
    }

    pub fn source_gas(&self, _x: &SpatialPoint<D>, _time: Real) -> Real {
        0.0
    }

    /// Gas pressure held at the lid: atmospheric plus the capillary pressure
    /// of the top saturation.
    pub fn top_gas_pressure(&self) -> Real {
        let c = &self.params.capillary;
        // top_saturation is validated to lie in (0, 1]
        c.atmospheric_pressure + c.entry_pressure / c.top_saturation.sqrt()
    }

    /// Initial pressures: liquid at atmospheric pressure, gas at the lid
    /// pressure everywhere.
    pub fn initial_state(&self, _x: &SpatialPoint<D>) -> PhaseState {
        PhaseState {
            p_l: self.params.capillary.atmospheric_pressure,
            p_g: self.top_gas_pressure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::{nearly_equal, Id, Tolerances};
    use hs_grid::StructuredGrid;
    use nalgebra::{Vector2, Vector3};

    fn model_2d() -> TwoPhaseModel<2> {
        let grid = StructuredGrid::<2>::new([0.4, 0.6], [4, 6]).unwrap();
        TwoPhaseModel::uniform(TwoPhaseParams::default(), &grid).unwrap()
    }

    #[test]
    fn constants_match_reference_configuration() {
        let model = model_2d();
        let x = Vector2::new(0.1, 0.1);
        assert_eq!(model.porosity(&x), 0.4);
        assert_eq!(model.viscosity_liquid(1e5), 1e-3);
        assert_eq!(model.viscosity_gas(1e5), 4.65e-5);
        assert_eq!(model.density_liquid(1e5), 1000.0);
        assert_eq!(model.molar_density_liquid(1e5), 1000.0);
        assert_eq!(model.source_liquid(&x, 10.0), 0.0);
        assert_eq!(model.source_gas(&x, 10.0), 0.0);
    }

    #[test]
    fn gas_density_is_pressure_dependent() {
        let model = model_2d();
        let tol = Tolerances::default();
        assert!(nearly_equal(model.density_gas(86_160.0), 1.0, tol));
        assert!(nearly_equal(model.molar_density_gas(2.0 * 86_160.0), 2.0, tol));
    }

    #[test]
    fn gravity_points_down_the_last_axis() {
        let model = model_2d();
        assert_eq!(*model.gravity(), Vector2::new(0.0, -9.81));

        let grid = StructuredGrid::<3>::new([0.4, 0.02, 0.6], [2, 1, 3]).unwrap();
        let model = TwoPhaseModel::uniform(TwoPhaseParams::default(), &grid).unwrap();
        assert_eq!(*model.gravity(), Vector3::new(0.0, 0.0, -9.81));
    }

    #[test]
    fn capillary_pressure_rejects_non_positive_saturation() {
        let model = model_2d();
        let x = Vector2::new(0.1, 0.1);
        assert!(matches!(
            model.capillary_pressure(&x, 0.0),
            Err(ModelError::InvalidSaturation { .. })
        ));
        assert!(model.capillary_pressure(&x, -0.1).is_err());
        assert!(model.capillary_pressure(&x, f64::NAN).is_err());
        assert_eq!(model.capillary_pressure(&x, 1.0).unwrap(), 1000.0);
    }

    #[test]
    fn inverse_capillary_pressure_is_not_clamped() {
        let model = model_2d();
        let x = Vector2::new(0.1, 0.1);
        assert_eq!(model.inverse_capillary_pressure(&x, 500.0).unwrap(), 4.0);
        assert!(matches!(
            model.inverse_capillary_pressure(&x, 0.0),
            Err(ModelError::InvalidCapillaryPressure { .. })
        ));
    }

    #[test]
    fn relative_permeability_vanishes_at_residual_saturation() {
        let model = model_2d();
        assert_eq!(model.relative_permeability_liquid(1e-6), 0.0);
        assert_eq!(model.relative_permeability_gas(0.0), 0.0);
        assert_eq!(model.relative_permeability_gas(-1.0), 0.0);
        assert!(model.relative_permeability_liquid(2e-6) > 0.0);
        let one = model.relative_permeability_liquid(1.0);
        assert!((one - (1.0 - 1e-6) * (1.0 - 1e-6)).abs() < 1e-15);
    }

    #[test]
    fn absolute_permeability_scales_reference_value() {
        let model = model_2d();
        assert_eq!(model.absolute_permeability(Id::from_index(3)).unwrap(), 6.64e-11);
        assert!(matches!(
            model.absolute_permeability(Id::from_index(24)),
            Err(ModelError::Core(hs_core::CoreError::IndexOob { .. }))
        ));
    }

    #[test]
    fn initial_state_sits_at_top_capillary_state() {
        let model = model_2d();
        let state = model.initial_state(&Vector2::new(0.2, 0.5));
        assert_eq!(state.p_l, 1e5);
        assert!((state.p_g - (1e5 + 1000.0 / 0.2_f64.sqrt())).abs() < 1e-9);
        assert!((model.top_gas_pressure() - state.p_g).abs() < 1e-12);
    }
}
