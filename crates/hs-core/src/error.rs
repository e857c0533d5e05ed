use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Failures shared by every heleshaw crate: bad numbers and bad indices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{what}: index {index} out of range for length {len}")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("broken invariant: {what}")]
    Invariant { what: &'static str },
}
