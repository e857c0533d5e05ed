//! Error types for time stepping.

use hs_grid::GridError;
use hs_model::ModelError;
use thiserror::Error;

/// Errors encountered while advancing the simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The state cannot be physical for any step size.
    #[error("Non-physical state: {message}")]
    NonPhysical { message: String },

    /// Solver did not converge; the controller retries with half the step.
    #[error("Retryable solver failure: {message}")]
    Retryable { message: String },

    /// `cause` is the message of the last retryable failure.
    #[error("Time step {step} s below minimum {min_step} s at t={time} s: {cause}")]
    StepBelowMinimum {
        time: f64,
        step: f64,
        min_step: f64,
        cause: String,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimError::Retryable { .. })
    }
}

impl From<hs_core::CoreError> for SimError {
    fn from(e: hs_core::CoreError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
