//! hs-grid: the grid collaborator seen by the two-phase model.
//!
//! Provides:
//! - `GridView`, the capability interface the model and solvers consume
//!   (element iteration, index lookup, element centres, facet iteration)
//! - `StructuredGrid`, an axis-aligned box grid refined by powers of two
//!
//! # Example
//!
//! ```
//! use hs_grid::{GridView, StructuredGrid};
//!
//! let grid = StructuredGrid::<2>::refined([0.4, 0.6], [4, 6], 1).unwrap();
//! assert_eq!(grid.element_count(), 8 * 12);
//! assert_eq!(grid.boundary_facets().unwrap().len(), 2 * (8 + 12));
//! ```

pub mod error;
pub mod structured;
pub mod view;

// Re-exports for ergonomics
pub use error::{GridError, GridResult};
pub use structured::{StructuredGrid, MAX_REFINEMENT_LEVEL};
pub use view::{GridView, Intersection, SpatialPoint, SpatialVector};
