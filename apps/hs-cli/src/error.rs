//! Error type of the driver binary.

use hs_core::CoreError;
use hs_grid::GridError;
use hs_model::ModelError;
use hs_project::ProjectError;
use hs_results::ResultsError;
use hs_sim::SimError;

/// Every failure the driver can hit, reported once in `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Scenario error: {0}")]
    Project(#[from] ProjectError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;
