//! hs-results: run manifests and snapshot storage.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use store::{RunStore, RunWriter};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("run store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("run store JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no run {run_id} in the store")]
    RunNotFound { run_id: String },

    #[error("unusable results directory: {message}")]
    InvalidPath { message: String },
}
