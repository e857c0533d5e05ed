//! hs-model: two-phase (liquid/gas) flow physics for the Hele-Shaw
//! infiltration cell.
//!
//! Provides:
//! - `TwoPhaseModel`: closed-form constitutive relations (capillary pressure
//!   and its inverse, relative permeabilities, viscosities, densities,
//!   absolute permeability, gravity, sources)
//! - `BoundaryClassifier`: Dirichlet/Neumann classification with values for
//!   each phase on the boundary of the box domain
//! - `MaterialField` + `PermeabilityGenerator`: per-element permeability
//!   multipliers populated once at construction
//! - `PhaseState`: pointwise phase pressures with derived saturations
//!
//! # Example
//!
//! ```
//! use hs_grid::StructuredGrid;
//! use hs_model::{BoundaryClassifier, BoundaryCondition, TwoPhaseModel, TwoPhaseParams};
//! use nalgebra::Vector2;
//!
//! let params = TwoPhaseParams::default();
//! let grid = StructuredGrid::<2>::new([0.4, 0.6], [4, 6]).unwrap();
//! let model = TwoPhaseModel::uniform(params, &grid).unwrap();
//!
//! let pc = model.capillary_pressure(&Vector2::new(0.2, 0.3), 0.25).unwrap();
//! assert!((pc - 2000.0).abs() < 1e-9);
//!
//! let bc = BoundaryClassifier::new(&model);
//! let bottom = bc.liquid(&Vector2::new(0.2, 0.0), 0.0);
//! assert!(matches!(bottom, BoundaryCondition::Dirichlet(_)));
//! ```

pub mod boundary;
pub mod constitutive;
pub mod error;
pub mod field;
pub mod params;
pub mod state;

// Re-exports for ergonomics
pub use boundary::{BoundaryClassifier, BoundaryCondition, BoundaryKind, Phase};
pub use constitutive::TwoPhaseModel;
pub use error::{ModelError, ModelResult};
pub use field::{MaterialField, PermeabilityGenerator, UniformPermeability};
pub use params::{
    CapillaryParams, DomainGeometry, FluidProperties, InjectionPorts, ModelTolerances,
    TwoPhaseParams, WaterTableSchedule,
};
pub use state::PhaseState;
