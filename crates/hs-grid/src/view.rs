//! Capability interface for grids.

use hs_core::{ElementId, Id};
use nalgebra::SVector;

use crate::error::GridResult;

/// A position in the domain.
pub type SpatialPoint<const D: usize> = SVector<f64, D>;

/// A direction or vector-valued quantity (normals, velocities, gravity).
pub type SpatialVector<const D: usize> = SVector<f64, D>;

/// A facet shared by `inside` and `outside`, or a boundary facet when
/// `outside` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<const D: usize> {
    pub inside: ElementId,
    pub outside: Option<ElementId>,
    /// Facet centre in global coordinates.
    pub center: SpatialPoint<D>,
    /// Unit outer normal with respect to `inside`.
    pub normal: SpatialVector<D>,
    /// Facet measure (length in 2-D, area in 3-D).
    pub area: f64,
}

impl<const D: usize> Intersection<D> {
    pub fn is_boundary(&self) -> bool {
        self.outside.is_none()
    }
}

/// What the model and solvers need from a grid.
///
/// Implementations must be shareable across worker threads; elements are
/// addressed by the dense indices `0..element_count()`.
pub trait GridView<const D: usize>: Sync {
    fn element_count(&self) -> usize;

    /// Map an element handle to its dense index, rejecting foreign handles.
    fn index_of(&self, element: ElementId) -> GridResult<usize>;

    /// Element centre in global coordinates.
    fn center(&self, element: ElementId) -> GridResult<SpatialPoint<D>>;

    /// All facets of `element`, interior and boundary.
    fn intersections(&self, element: ElementId) -> GridResult<Vec<Intersection<D>>>;

    /// Iterate element handles in index order.
    fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.element_count()).filter_map(Id::try_from_index)
    }

    /// All facets on the domain boundary.
    fn boundary_facets(&self) -> GridResult<Vec<Intersection<D>>> {
        let mut facets = Vec::new();
        for element in self.elements() {
            facets.extend(
                self.intersections(element)?
                    .into_iter()
                    .filter(Intersection::is_boundary),
            );
        }
        Ok(facets)
    }
}
