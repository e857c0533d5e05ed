//! Per-element absolute permeability multipliers.

use hs_core::{ensure_positive, CoreError, ElementId};
use hs_grid::{GridView, SpatialPoint};

use crate::error::ModelResult;

/// Source of one permeability multiplier per query point.
///
/// The reference setup uses a uniform field; correlated random fields plug
/// in through this trait (closures work too).
pub trait PermeabilityGenerator<const D: usize>: Sync {
    fn eval(&self, x: &SpatialPoint<D>) -> f64;

    /// Uniform generators skip the min/max diagnostics.
    fn is_uniform(&self) -> bool {
        false
    }
}

/// Same multiplier everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformPermeability(pub f64);

impl Default for UniformPermeability {
    fn default() -> Self {
        Self(1.0)
    }
}

impl<const D: usize> PermeabilityGenerator<D> for UniformPermeability {
    fn eval(&self, _x: &SpatialPoint<D>) -> f64 {
        self.0
    }

    fn is_uniform(&self) -> bool {
        true
    }
}

impl<F, const D: usize> PermeabilityGenerator<D> for F
where
    F: Fn(&SpatialPoint<D>) -> f64 + Sync,
{
    fn eval(&self, x: &SpatialPoint<D>) -> f64 {
        self(x)
    }
}

/// Immutable permeability multipliers indexed by element.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialField {
    values: Vec<f64>,
}

impl MaterialField {
    /// Evaluate `generator` at every element centre of `grid`.
    ///
    /// Every element must receive a finite, positive value.
    pub fn from_grid<const D: usize, G, P>(grid: &G, generator: &P) -> ModelResult<Self>
    where
        G: GridView<D>,
        P: PermeabilityGenerator<D> + ?Sized,
    {
        let n = grid.element_count();
        let mut values = vec![f64::NAN; n];
        for element in grid.elements() {
            let index = grid.index_of(element)?;
            let center = grid.center(element)?;
            values[index] = ensure_positive(generator.eval(&center), "permeability multiplier")?;
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(CoreError::Invariant {
                what: "grid did not visit every element while populating the material field",
            }
            .into());
        }

        let field = Self { values };
        if !generator.is_uniform() {
            let (min, max) = field.min_max();
            tracing::info!(
                elements = n,
                mink = min,
                maxk = max,
                log10_mink = min.log10(),
                log10_maxk = max.log10(),
                "populated heterogeneous permeability field"
            );
        }
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Multiplier of `element`; elements outside the field are an error.
    pub fn get(&self, element: ElementId) -> Result<f64, CoreError> {
        let index = element.index();
        self.values
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOob {
                what: "material field",
                index,
                len: self.values.len(),
            })
    }

    /// Smallest and largest multiplier (`(inf, -inf)` when empty).
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;
    use hs_grid::StructuredGrid;

    #[test]
    fn uniform_field_is_one_everywhere() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [3, 2]).unwrap();
        let field = MaterialField::from_grid(&grid, &UniformPermeability::default()).unwrap();
        assert_eq!(field.len(), 6);
        assert!(field.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn closure_field_sees_element_centres() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [2, 2]).unwrap();
        let generator = |x: &SpatialPoint<2>| 1.0 + x[0];
        let field = MaterialField::from_grid(&grid, &generator).unwrap();
        assert!((field.get(Id::from_index(0)).unwrap() - 1.25).abs() < 1e-15);
        assert!((field.get(Id::from_index(1)).unwrap() - 1.75).abs() < 1e-15);
        assert_eq!(field.min_max(), (1.25, 1.75));
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [2, 2]).unwrap();
        let err = MaterialField::from_grid(&grid, &UniformPermeability(0.0)).unwrap_err();
        assert!(matches!(
            err,
            crate::ModelError::Core(CoreError::NonPositive { .. })
        ));
    }

    #[test]
    fn lookup_outside_field_fails() {
        let grid = StructuredGrid::<2>::new([1.0, 1.0], [2, 2]).unwrap();
        let field = MaterialField::from_grid(&grid, &UniformPermeability::default()).unwrap();
        assert_eq!(
            field.get(Id::from_index(4)),
            Err(CoreError::IndexOob {
                what: "material field",
                index: 4,
                len: 4
            })
        );
    }
}
