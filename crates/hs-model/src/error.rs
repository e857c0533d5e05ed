//! Model errors.

use hs_core::CoreError;
use hs_grid::GridError;
use thiserror::Error;

use crate::boundary::Phase;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the constitutive model and the boundary classifier.
///
/// None of these are retried inside the model; they surface malformed input
/// or setup defects to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Saturation outside the domain of a relation (e.g. `s_l <= 0` for pc).
    #[error("Invalid saturation for {what}: {value}")]
    InvalidSaturation { what: &'static str, value: f64 },

    /// Capillary pressure that cannot be inverted.
    #[error("Invalid capillary pressure: {value} Pa")]
    InvalidCapillaryPressure { value: f64 },

    /// Parameter set rejected at construction.
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    /// Boundary point matched none of the declared faces.
    #[error("Boundary point {position:?} unclassified for {phase} phase at t={time} s")]
    UnclassifiedBoundary {
        phase: Phase,
        position: Vec<f64>,
        time: f64,
    },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl From<ModelError> for CoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Core(inner) => inner,
            ModelError::InvalidParameter { what } => CoreError::InvalidArg { what },
            ModelError::InvalidSaturation { what, .. } => CoreError::InvalidArg { what },
            _ => CoreError::Invariant {
                what: "two-phase model",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::InvalidSaturation {
            what: "capillary pressure",
            value: 0.0,
        };
        assert!(err.to_string().contains("capillary pressure"));

        let err = ModelError::UnclassifiedBoundary {
            phase: Phase::Gas,
            position: vec![0.2, 0.3],
            time: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("gas"));
        assert!(msg.contains("0.3"));
    }

    #[test]
    fn core_errors_pass_through() {
        let core = CoreError::IndexOob {
            what: "material field",
            index: 7,
            len: 3,
        };
        let model: ModelError = core.clone().into();
        let back: CoreError = model.into();
        assert_eq!(back, core);
    }
}
