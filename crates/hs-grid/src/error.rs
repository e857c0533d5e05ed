//! Grid-specific error types.

use hs_core::{CoreError, ElementId};

pub type GridResult<T> = Result<T, GridError>;

/// Grid construction and lookup errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// An extent along some axis is not finite and positive.
    InvalidExtent { axis: usize, value: f64 },

    /// Zero cells requested along some axis.
    EmptyAxis { axis: usize },

    /// Refinement level beyond what the index type can address.
    LevelTooHigh { level: u32, max: u32 },

    /// Too many elements for the compact id type.
    TooManyElements,

    /// Element handle does not belong to this grid.
    UnknownElement { element: ElementId, len: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidExtent { axis, value } => {
                write!(f, "Extent along axis {} must be finite and positive, got {}", axis, value)
            }
            GridError::EmptyAxis { axis } => {
                write!(f, "Axis {} has no cells", axis)
            }
            GridError::LevelTooHigh { level, max } => {
                write!(f, "Refinement level {} exceeds maximum {}", level, max)
            }
            GridError::TooManyElements => {
                write!(f, "Element count does not fit in a 32-bit element id")
            }
            GridError::UnknownElement { element, len } => {
                write!(f, "Element {} is not part of a grid with {} elements", element, len)
            }
        }
    }
}

impl std::error::Error for GridError {}

impl From<GridError> for CoreError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::UnknownElement { element, len } => CoreError::IndexOob {
                what: "grid element",
                index: element.index(),
                len,
            },
            _ => CoreError::InvalidArg {
                what: "grid construction",
            },
        }
    }
}
