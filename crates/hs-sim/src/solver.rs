//! Solver collaborator driven by the time-step controller.

use crate::error::SimResult;

/// Advances a state by one time step.
///
/// Implementations signal non-convergence with [`SimError::Retryable`]; the
/// controller then halves the step and calls again from the same state. Any
/// other error ends the run.
///
/// [`SimError::Retryable`]: crate::SimError::Retryable
pub trait StepSolver {
    /// State type (must be Clone, for snapshots and retries).
    type State: Clone;

    /// Solve for the state at `time + step` given the committed state at
    /// `time`. Takes `&mut self` so solvers can cache factorizations.
    fn solve_step(
        &mut self,
        time: f64,
        step: f64,
        previous: &Self::State,
    ) -> SimResult<Self::State>;
}
