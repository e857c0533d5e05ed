//! Per-element field state.

use hs_core::ElementId;
use hs_grid::GridView;
use hs_model::{PhaseState, TwoPhaseModel};

use crate::error::{SimError, SimResult};

/// One `PhaseState` per grid element, indexed by element index.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    cells: Vec<PhaseState>,
}

impl FieldState {
    pub fn new(cells: Vec<PhaseState>) -> Self {
        Self { cells }
    }

    /// Evaluate the model's initial condition at every element centre.
    pub fn initial<G, const D: usize>(model: &TwoPhaseModel<D>, grid: &G) -> SimResult<Self>
    where
        G: GridView<D>,
    {
        let mut cells = Vec::with_capacity(grid.element_count());
        for element in grid.elements() {
            let x = grid.center(element)?;
            cells.push(model.initial_state(&x));
        }
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[PhaseState] {
        &self.cells
    }

    pub fn get(&self, element: ElementId) -> SimResult<&PhaseState> {
        self.cells
            .get(element.index())
            .ok_or(SimError::InvalidArg {
                what: "element outside field state",
            })
    }
}
