//! Parameter set of the infiltration experiment.
//!
//! Defaults reproduce the reference configuration: a 0.4 m x 0.6 m cell
//! (0.02 m deep in 3-D) half filled with water, air on top held at a fixed
//! capillary state, three liquid injection ports in the lid and a water table
//! that oscillates once the onset time is reached.

use hs_core::units::{
    constants, k, kg_per_m3, m2, pa_s, Accel, Density, DynVisc, Permeability, Temperature,
};
use hs_core::ensure_positive;

use crate::error::{ModelError, ModelResult};

/// Box dimensions and initial water table.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainGeometry {
    /// Extent along the last (vertical) axis [m]
    pub height: f64,
    /// Extent along axis 0 [m]
    pub width: f64,
    /// Extent along axis 1 in 3-D [m]
    pub depth: f64,
    /// Initial water table height [m]
    pub water_table: f64,
}

impl Default for DomainGeometry {
    fn default() -> Self {
        Self {
            height: 0.6,
            width: 0.4,
            depth: 0.02,
            water_table: 0.3,
        }
    }
}

/// Brooks-Corey style capillary pressure `p_entry / sqrt(s_l)` and the
/// pressure reference it is measured against.
#[derive(Clone, Debug, PartialEq)]
pub struct CapillaryParams {
    /// Entry pressure [Pa]
    pub entry_pressure: f64,
    /// Atmospheric pressure [Pa]
    pub atmospheric_pressure: f64,
    /// Liquid saturation held at the lid [-]
    pub top_saturation: f64,
}

impl Default for CapillaryParams {
    fn default() -> Self {
        Self {
            entry_pressure: 1000.0,
            atmospheric_pressure: 1e5,
            top_saturation: 0.2,
        }
    }
}

/// Square-wave schedule of the water table seen by the bottom boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterTableSchedule {
    /// Time at which oscillation starts [s]
    pub onset: f64,
    /// Full oscillation period [s]
    pub period: f64,
    /// Half the peak-to-peak swing [m]
    pub amplitude: f64,
}

impl Default for WaterTableSchedule {
    fn default() -> Self {
        Self {
            onset: 6_000_000.0,
            period: 60.0,
            amplitude: 0.1,
        }
    }
}

impl WaterTableSchedule {
    /// Effective water table at time `t` for an initial table `water_table`.
    ///
    /// Constant before `onset`; afterwards high for the first half of every
    /// period (inclusive of the midpoint) and low for the second half.
    pub fn effective_height(&self, water_table: f64, t: f64) -> f64 {
        if t < self.onset {
            return water_table;
        }
        let phase = ((t - self.onset) % self.period) / self.period;
        if phase <= 0.5 {
            water_table + self.amplitude
        } else {
            water_table - self.amplitude
        }
    }
}

/// Liquid influx windows in the lid.
#[derive(Clone, Debug, PartialEq)]
pub struct InjectionPorts {
    /// Port centres along axis 0 [m]
    pub centers: Vec<f64>,
    /// Half width of each window [m]
    pub half_width: f64,
    /// Liquid Neumann flux through a port (negative = inflow)
    pub liquid_flux: f64,
}

impl Default for InjectionPorts {
    fn default() -> Self {
        Self {
            centers: vec![0.1, 0.2, 0.3],
            half_width: 0.03,
            liquid_flux: -0.075,
        }
    }
}

impl InjectionPorts {
    /// Whether `x0` lies strictly inside one of the windows.
    pub fn contains(&self, x0: f64) -> bool {
        self.centers
            .iter()
            .any(|&c| x0 > c - self.half_width && x0 < c + self.half_width)
    }
}

/// Fluid and matrix properties.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidProperties {
    pub porosity: f64,
    pub viscosity_liquid: DynVisc,
    pub viscosity_gas: DynVisc,
    /// Permeability of a cell with multiplier 1
    pub reference_permeability: Permeability,
    pub density_liquid: Density,
    /// Specific gas constant of air [J/(kg K)]
    pub gas_constant: f64,
    pub gas_temperature: Temperature,
    pub gravity: Accel,
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self {
            porosity: 0.4,
            viscosity_liquid: pa_s(1e-3),
            viscosity_gas: pa_s(4.65e-5),
            reference_permeability: m2(6.64e-11),
            density_liquid: kg_per_m3(1000.0),
            gas_constant: 287.2,
            gas_temperature: k(300.0),
            gravity: constants::g(),
        }
    }
}

impl FluidProperties {
    /// Ideal-gas density `p / (R T)` [kg/m³].
    pub fn gas_density(&self, p_g: f64) -> f64 {
        p_g / (self.gas_constant * self.gas_temperature.value)
    }

    /// `rho_l * g`, the hydrostatic gradient of the liquid [Pa/m].
    pub fn liquid_weight(&self) -> f64 {
        self.density_liquid.value * self.gravity.value
    }
}

/// The two small tolerances of the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTolerances {
    /// Residual saturation below which a phase is immobile
    pub residual_saturation: f64,
    /// Distance within which a point counts as lying on a face [m]
    pub face: f64,
}

impl Default for ModelTolerances {
    fn default() -> Self {
        Self {
            residual_saturation: 1e-6,
            face: 1e-5,
        }
    }
}

/// Everything the model needs besides the grid.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TwoPhaseParams {
    pub geometry: DomainGeometry,
    pub capillary: CapillaryParams,
    pub schedule: WaterTableSchedule,
    pub ports: InjectionPorts,
    pub fluids: FluidProperties,
    pub tolerances: ModelTolerances,
}

impl TwoPhaseParams {
    /// Reject parameter sets that would make the relations singular or the
    /// boundary classification meaningless.
    pub fn validate(&self) -> ModelResult<()> {
        let g = &self.geometry;
        ensure_positive(g.height, "domain height")?;
        ensure_positive(g.width, "domain width")?;
        ensure_positive(g.depth, "domain depth")?;
        ensure_positive(g.water_table, "water table height")?;
        if g.water_table >= g.height {
            return Err(ModelError::InvalidParameter {
                what: "water table must lie below the top of the domain",
            });
        }

        let c = &self.capillary;
        ensure_positive(c.entry_pressure, "entry pressure")?;
        ensure_positive(c.atmospheric_pressure, "atmospheric pressure")?;
        ensure_positive(c.top_saturation, "top saturation")?;
        if c.top_saturation > 1.0 {
            return Err(ModelError::InvalidParameter {
                what: "top saturation must not exceed 1",
            });
        }

        let s = &self.schedule;
        ensure_positive(s.period, "schedule period")?;
        if !s.onset.is_finite() || !s.amplitude.is_finite() || s.amplitude < 0.0 {
            return Err(ModelError::InvalidParameter {
                what: "schedule onset must be finite and amplitude non-negative",
            });
        }
        if g.water_table - s.amplitude <= 0.0 || g.water_table + s.amplitude >= g.height {
            return Err(ModelError::InvalidParameter {
                what: "oscillating water table must stay inside the domain",
            });
        }

        let p = &self.ports;
        if !p.half_width.is_finite() || p.half_width < 0.0 || !p.liquid_flux.is_finite() {
            return Err(ModelError::InvalidParameter {
                what: "injection ports need a non-negative half width and finite flux",
            });
        }
        if p.centers.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidParameter {
                what: "injection port centres must be finite",
            });
        }

        let f = &self.fluids;
        ensure_positive(f.porosity, "porosity")?;
        if f.porosity >= 1.0 {
            return Err(ModelError::InvalidParameter {
                what: "porosity must be below 1",
            });
        }
        ensure_positive(f.viscosity_liquid.value, "liquid viscosity")?;
        ensure_positive(f.viscosity_gas.value, "gas viscosity")?;
        ensure_positive(f.reference_permeability.value, "reference permeability")?;
        ensure_positive(f.density_liquid.value, "liquid density")?;
        ensure_positive(f.gas_constant, "gas constant")?;
        ensure_positive(f.gas_temperature.value, "gas temperature")?;
        ensure_positive(f.gravity.value, "gravity")?;

        let t = &self.tolerances;
        ensure_positive(t.residual_saturation, "residual saturation")?;
        ensure_positive(t.face, "face tolerance")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TwoPhaseParams::default().validate().unwrap();
    }

    #[test]
    fn schedule_is_constant_before_onset() {
        let s = WaterTableSchedule::default();
        assert_eq!(s.effective_height(0.3, 0.0), 0.3);
        assert_eq!(s.effective_height(0.3, s.onset - 1.0), 0.3);
    }

    #[test]
    fn schedule_square_wave_after_onset() {
        let s = WaterTableSchedule::default();
        assert!((s.effective_height(0.3, s.onset) - 0.4).abs() < 1e-12);
        assert!((s.effective_height(0.3, s.onset + 0.5 * s.period) - 0.4).abs() < 1e-12);
        assert!((s.effective_height(0.3, s.onset + 0.6 * s.period) - 0.2).abs() < 1e-12);
        assert!((s.effective_height(0.3, s.onset + 1.1 * s.period) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn port_windows_are_open_intervals() {
        let ports = InjectionPorts::default();
        assert!(ports.contains(0.1));
        assert!(ports.contains(0.229));
        assert!(!ports.contains(0.15));
        assert!(!ports.contains(0.35));
        assert!(!ports.contains(0.4));
    }

    #[test]
    fn validate_rejects_water_table_above_lid() {
        let mut params = TwoPhaseParams::default();
        params.geometry.water_table = 0.7;
        assert!(matches!(
            params.validate(),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_entry_pressure() {
        let mut params = TwoPhaseParams::default();
        params.capillary.entry_pressure = 0.0;
        assert!(matches!(params.validate(), Err(ModelError::Core(_))));
    }

    #[test]
    fn gas_density_follows_ideal_gas_law() {
        let f = FluidProperties::default();
        assert!((f.gas_density(1e5) - 1e5 / (287.2 * 300.0)).abs() < 1e-12);
        assert!((f.liquid_weight() - 9810.0).abs() < 1e-9);
    }
}
