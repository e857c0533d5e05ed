//! Axis-aligned structured grid on `[0, L_0] x ... x [0, L_{D-1}]`.

use hs_core::{ElementId, Id};

use crate::error::{GridError, GridResult};
use crate::view::{GridView, Intersection, SpatialPoint, SpatialVector};

/// Highest refinement level accepted by [`StructuredGrid::refined`].
pub const MAX_REFINEMENT_LEVEL: u32 = 12;

/// Uniform tensor-product grid. Element indices run fastest along axis 0.
#[derive(Debug, Clone)]
pub struct StructuredGrid<const D: usize> {
    lengths: [f64; D],
    cells: [usize; D],
    spacing: [f64; D],
    count: usize,
}

impl<const D: usize> StructuredGrid<D> {
    pub fn new(lengths: [f64; D], cells: [usize; D]) -> GridResult<Self> {
        let mut spacing = [0.0; D];
        let mut count: usize = 1;
        for axis in 0..D {
            let length = lengths[axis];
            if !length.is_finite() || length <= 0.0 {
                return Err(GridError::InvalidExtent {
                    axis,
                    value: length,
                });
            }
            if cells[axis] == 0 {
                return Err(GridError::EmptyAxis { axis });
            }
            spacing[axis] = length / cells[axis] as f64;
            count = count
                .checked_mul(cells[axis])
                .ok_or(GridError::TooManyElements)?;
        }
        if count >= u32::MAX as usize {
            return Err(GridError::TooManyElements);
        }
        Ok(Self {
            lengths,
            cells,
            spacing,
            count,
        })
    }

    /// `base_cells` refined `level` times by bisection along every axis.
    pub fn refined(lengths: [f64; D], base_cells: [usize; D], level: u32) -> GridResult<Self> {
        if level > MAX_REFINEMENT_LEVEL {
            return Err(GridError::LevelTooHigh {
                level,
                max: MAX_REFINEMENT_LEVEL,
            });
        }
        let factor = 1usize << level;
        let mut cells = [0usize; D];
        for axis in 0..D {
            cells[axis] = base_cells[axis]
                .checked_mul(factor)
                .ok_or(GridError::TooManyElements)?;
        }
        Self::new(lengths, cells)
    }

    pub fn lengths(&self) -> [f64; D] {
        self.lengths
    }

    pub fn cells(&self) -> [usize; D] {
        self.cells
    }

    pub fn spacing(&self) -> [f64; D] {
        self.spacing
    }

    fn coords(&self, mut index: usize) -> [usize; D] {
        let mut coords = [0usize; D];
        for axis in 0..D {
            coords[axis] = index % self.cells[axis];
            index /= self.cells[axis];
        }
        coords
    }

    fn linear(&self, coords: &[usize; D]) -> usize {
        let mut index = 0;
        for axis in (0..D).rev() {
            index = index * self.cells[axis] + coords[axis];
        }
        index
    }

    fn element(&self, index: usize) -> GridResult<ElementId> {
        Id::try_from_index(index).ok_or(GridError::TooManyElements)
    }

    /// Measure of a facet orthogonal to `axis`.
    fn facet_area(&self, axis: usize) -> f64 {
        (0..D)
            .filter(|&other| other != axis)
            .map(|other| self.spacing[other])
            .product()
    }
}

impl<const D: usize> GridView<D> for StructuredGrid<D> {
    fn element_count(&self) -> usize {
        self.count
    }

    fn index_of(&self, element: ElementId) -> GridResult<usize> {
        let index = element.index();
        if index < self.count {
            Ok(index)
        } else {
            Err(GridError::UnknownElement {
                element,
                len: self.count,
            })
        }
    }

    fn center(&self, element: ElementId) -> GridResult<SpatialPoint<D>> {
        let coords = self.coords(self.index_of(element)?);
        Ok(SpatialPoint::<D>::from_fn(|axis, _| {
            (coords[axis] as f64 + 0.5) * self.spacing[axis]
        }))
    }

    fn intersections(&self, element: ElementId) -> GridResult<Vec<Intersection<D>>> {
        let index = self.index_of(element)?;
        let coords = self.coords(index);
        let center = self.center(element)?;
        let mut facets = Vec::with_capacity(2 * D);

        for axis in 0..D {
            let half = 0.5 * self.spacing[axis];
            let area = self.facet_area(axis);
            for sign in [-1.0_f64, 1.0] {
                let outside = if sign < 0.0 {
                    coords[axis].checked_sub(1)
                } else {
                    Some(coords[axis] + 1).filter(|&c| c < self.cells[axis])
                };
                let outside = match outside {
                    Some(c) => {
                        let mut neighbor = coords;
                        neighbor[axis] = c;
                        Some(self.element(self.linear(&neighbor))?)
                    }
                    None => None,
                };

                let mut normal = SpatialVector::<D>::zeros();
                normal[axis] = sign;
                facets.push(Intersection {
                    inside: element,
                    outside,
                    center: center + normal * half,
                    normal,
                    area,
                });
            }
        }
        Ok(facets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_extents() {
        assert_eq!(
            StructuredGrid::<2>::new([0.0, 1.0], [1, 1]).unwrap_err(),
            GridError::InvalidExtent { axis: 0, value: 0.0 }
        );
        assert_eq!(
            StructuredGrid::<2>::new([1.0, 1.0], [1, 0]).unwrap_err(),
            GridError::EmptyAxis { axis: 1 }
        );
    }

    #[test]
    fn rejects_excessive_level() {
        let err = StructuredGrid::<2>::refined([1.0, 1.0], [1, 1], MAX_REFINEMENT_LEVEL + 1)
            .unwrap_err();
        assert!(matches!(err, GridError::LevelTooHigh { .. }));
    }

    #[test]
    fn linear_index_round_trip() {
        let grid = StructuredGrid::<3>::new([1.0, 1.0, 1.0], [3, 4, 5]).unwrap();
        for index in 0..grid.element_count() {
            assert_eq!(grid.linear(&grid.coords(index)), index);
        }
    }

    #[test]
    fn centers_sit_mid_cell() {
        let grid = StructuredGrid::<2>::new([0.4, 0.6], [4, 6]).unwrap();
        let first = grid.center(Id::from_index(0)).unwrap();
        assert!((first[0] - 0.05).abs() < 1e-15);
        assert!((first[1] - 0.05).abs() < 1e-15);

        // index 5 -> (1, 1)
        let c = grid.center(Id::from_index(5)).unwrap();
        assert!((c[0] - 0.15).abs() < 1e-15);
        assert!((c[1] - 0.15).abs() < 1e-15);
    }

    #[test]
    fn unknown_element_is_rejected() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [2, 2]).unwrap();
        assert!(matches!(
            grid.index_of(Id::from_index(4)),
            Err(GridError::UnknownElement { len: 4, .. })
        ));
    }

    #[test]
    fn corner_element_has_two_boundary_facets_in_2d() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [3, 3]).unwrap();
        let facets = grid.intersections(Id::from_index(0)).unwrap();
        assert_eq!(facets.len(), 4);
        assert_eq!(facets.iter().filter(|f| f.is_boundary()).count(), 2);
    }
}
