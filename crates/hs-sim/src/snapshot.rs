//! Snapshot collaborator: named derived fields at a simulation time.
//!
//! Output is best-effort. The controller logs and counts a failed snapshot
//! and carries on with the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot write failed: {message}")]
    Write { message: String },

    #[error("Derived field evaluation failed: {message}")]
    Field { message: String },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Cell values of one named field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum FieldValues {
    Scalar(Vec<f64>),
    /// One `D`-component vector per cell
    Vector(Vec<Vec<f64>>),
}

impl FieldValues {
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Scalar(v) => v.len(),
            FieldValues::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotField {
    pub name: String,
    pub values: FieldValues,
}

/// Derived fields of one committed state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_s: f64,
    /// Accepted step count; 0 is the initial state
    pub step: usize,
    /// Process rank of the writer, 0 in a serial run
    pub rank: usize,
    pub fields: Vec<SnapshotField>,
}

impl Snapshot {
    pub fn field(&self, name: &str) -> Option<&SnapshotField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Controller side: offered every committed state that is due for output.
pub trait SnapshotSink<S> {
    fn offer(&mut self, step: usize, time_s: f64, state: &S) -> SnapshotResult<()>;
}

/// Sink that discards every state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSnapshots;

impl<S> SnapshotSink<S> for NoSnapshots {
    fn offer(&mut self, _step: usize, _time_s: f64, _state: &S) -> SnapshotResult<()> {
        Ok(())
    }
}

impl<S, F> SnapshotSink<S> for F
where
    F: FnMut(usize, f64, &S) -> SnapshotResult<()>,
{
    fn offer(&mut self, step: usize, time_s: f64, state: &S) -> SnapshotResult<()> {
        self(step, time_s, state)
    }
}

/// Persistence side: stores finished snapshots.
pub trait SnapshotWriter {
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> SnapshotResult<()>;
}

impl SnapshotWriter for Vec<Snapshot> {
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> SnapshotResult<()> {
        self.push(snapshot.clone());
        Ok(())
    }
}
