//! Boundary values over time and over a whole grid boundary.

use hs_grid::{GridView, StructuredGrid};
use hs_model::{BoundaryClassifier, BoundaryKind, Phase, TwoPhaseModel, TwoPhaseParams};
use nalgebra::{Vector2, Vector3};

const P_ATM: f64 = 1e5;
const HEIGHTW: f64 = 0.3;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs()
}

#[test]
fn bottom_dirichlet_follows_square_wave() {
    let params = TwoPhaseParams::default();
    let onset = params.schedule.onset;
    let period = params.schedule.period;
    let grid = StructuredGrid::<2>::new([0.4, 0.6], [4, 6]).unwrap();
    let model = TwoPhaseModel::uniform(params, &grid).unwrap();
    let bc = BoundaryClassifier::new(&model);
    let x = Vector2::new(0.2, 0.0);

    let value = |t: f64| bc.liquid(&x, t).dirichlet_value().unwrap();

    assert!(close(value(0.0), P_ATM + HEIGHTW * 9810.0));
    assert!(close(value(onset - 1e-3), P_ATM + HEIGHTW * 9810.0));
    assert!(close(
        value(onset + 0.25 * period),
        P_ATM + (HEIGHTW + 0.1) * 9810.0
    ));
    assert!(close(
        value(onset + 0.75 * period),
        P_ATM + (HEIGHTW - 0.1) * 9810.0
    ));
    assert!(close(
        value(onset + 10.25 * period),
        P_ATM + (HEIGHTW + 0.1) * 9810.0
    ));
}

#[test]
fn every_boundary_facet_is_classified_in_2d() {
    let grid = StructuredGrid::<2>::refined([0.4, 0.6], [40, 60], 0).unwrap();
    let model = TwoPhaseModel::uniform(TwoPhaseParams::default(), &grid).unwrap();
    let bc = BoundaryClassifier::new(&model);

    let mut dirichlet_gas = 0;
    let mut port_facets = 0;
    for facet in grid.boundary_facets().unwrap() {
        for phase in [Phase::Liquid, Phase::Gas] {
            let cond = bc.classify(phase, &facet.center, 0.0).unwrap();
            if phase == Phase::Gas && cond.kind() == BoundaryKind::Dirichlet {
                dirichlet_gas += 1;
            }
            if phase == Phase::Liquid && cond.neumann_flux() == Some(-0.075) {
                port_facets += 1;
            }
        }
    }
    // lid has 40 facets of width 0.01; three open windows of width 0.06
    // cover 6 facet centres each
    assert_eq!(port_facets, 18);
    assert_eq!(dirichlet_gas, 40 - 18);
}

#[test]
fn every_boundary_facet_is_classified_in_3d() {
    let grid = StructuredGrid::<3>::new([0.4, 0.02, 0.6], [8, 2, 12]).unwrap();
    let model = TwoPhaseModel::uniform(TwoPhaseParams::default(), &grid).unwrap();
    let bc = BoundaryClassifier::new(&model);

    for facet in grid.boundary_facets().unwrap() {
        assert_ne!(bc.liquid(&facet.center, 1.0).kind(), BoundaryKind::Unset);
        assert_ne!(bc.gas(&facet.center, 1.0).kind(), BoundaryKind::Unset);
    }

    let front = Vector3::new(0.2, 0.0, 0.3);
    assert_eq!(bc.liquid(&front, 0.0).kind(), BoundaryKind::Neumann);
}
