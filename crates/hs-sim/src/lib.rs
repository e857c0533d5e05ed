//! Adaptive time stepping for the two-phase Hele-Shaw model.
//!
//! Provides:
//! - `TimeStepController`: halve-on-failure / grow-on-success step control
//!   around an external nonlinear solve
//! - `StepSolver`: the solver collaborator advancing a state by one step
//! - `SnapshotSink` / `SnapshotWriter`: best-effort output of derived fields
//! - `QuasiStaticSolver`: capillary-gravity equilibrium reference solver
//! - `FieldSnapshots`: pressures, saturations and Darcy velocities per cell

pub mod controller;
pub mod equilibrium;
pub mod error;
pub mod fields;
pub mod snapshot;
pub mod solver;
pub mod state;

// Re-exports for public API
pub use controller::{
    ControllerPhase, RunProgress, RunRecord, StepControl, StepOutcome, TimeStepController,
    TimeStepState,
};
pub use equilibrium::QuasiStaticSolver;
pub use error::{SimError, SimResult};
pub use fields::{derive_fields, FieldSnapshots};
pub use snapshot::{
    FieldValues, NoSnapshots, Snapshot, SnapshotError, SnapshotField, SnapshotResult,
    SnapshotSink, SnapshotWriter,
};
pub use solver::StepSolver;
pub use state::FieldState;
