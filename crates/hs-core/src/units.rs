//! SI quantities for the model parameters.
//!
//! Parameters are stored as `uom` quantities so the unit is part of the type;
//! the hot constitutive relations read `.value` (SI base units).

pub use uom;

use uom::si::f64 as si;

pub type Accel = si::Acceleration;
pub type Density = si::MassDensity;
pub type DynVisc = si::DynamicViscosity;
pub type Temperature = si::ThermodynamicTemperature;

/// Intrinsic permeability [m²].
pub type Permeability = si::Area;

macro_rules! si_constructor {
    ($(#[$doc:meta])* $name:ident -> $ty:ty, $unit:path) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(v: f64) -> $ty {
            <$ty>::new::<$unit>(v)
        }
    };
}

si_constructor!(
    /// Kelvin.
    k -> Temperature, uom::si::thermodynamic_temperature::kelvin
);
si_constructor!(m2 -> Permeability, uom::si::area::square_meter);
si_constructor!(pa_s -> DynVisc, uom::si::dynamic_viscosity::pascal_second);
si_constructor!(kg_per_m3 -> Density, uom::si::mass_density::kilogram_per_cubic_meter);
si_constructor!(mps2 -> Accel, uom::si::acceleration::meter_per_second_squared);

pub mod constants {
    use super::{mps2, Accel};

    /// Standard gravity of the infiltration experiments [m/s²].
    pub const G_MPS2: f64 = 9.81;

    pub fn g() -> Accel {
        mps2(G_MPS2)
    }
}
