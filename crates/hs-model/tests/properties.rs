//! Property tests for the constitutive relations and the classifier.

use hs_grid::StructuredGrid;
use hs_model::{BoundaryClassifier, BoundaryKind, TwoPhaseModel, TwoPhaseParams};
use nalgebra::Vector2;
use proptest::prelude::*;

fn model() -> TwoPhaseModel<2> {
    let grid = StructuredGrid::<2>::new([0.4, 0.6], [4, 6]).unwrap();
    TwoPhaseModel::uniform(TwoPhaseParams::default(), &grid).unwrap()
}

proptest! {
    #[test]
    fn capillary_pressure_round_trip(s_l in 1e-9_f64..=1.0) {
        let model = model();
        let x = Vector2::new(0.2, 0.3);
        let pc = model.capillary_pressure(&x, s_l).unwrap();
        let back = model.inverse_capillary_pressure(&x, pc).unwrap();
        prop_assert!((back - s_l).abs() <= 1e-12 * s_l.max(1e-300) + 1e-15);
    }

    #[test]
    fn relative_permeability_zero_below_residual(s in -1.0_f64..=1e-6) {
        let model = model();
        prop_assert_eq!(model.relative_permeability_liquid(s), 0.0);
        prop_assert_eq!(model.relative_permeability_gas(s), 0.0);
    }

    #[test]
    fn relative_permeability_positive_and_continuous_above_residual(delta in 1e-12_f64..1e-3) {
        let model = model();
        let s = 1e-6 + delta;
        let kl = model.relative_permeability_liquid(s);
        let kg = model.relative_permeability_gas(s);
        prop_assert!(kl > 0.0);
        prop_assert!(kg > 0.0);
        // quadratic vanishing: value bounded by delta^2
        prop_assert!(kl <= delta * delta * (1.0 + 1e-6));
    }

    #[test]
    fn points_strictly_on_one_face_are_classified(
        along in 0.001_f64..0.399,
        up in 0.001_f64..0.599,
        face in 0usize..4,
        t in 0.0_f64..1e7,
    ) {
        let model = model();
        let bc = BoundaryClassifier::new(&model);
        let x = match face {
            0 => Vector2::new(0.0, up),
            1 => Vector2::new(0.4, up),
            2 => Vector2::new(along, 0.0),
            _ => Vector2::new(along, 0.6),
        };
        let liquid = bc.liquid(&x, t).kind();
        let gas = bc.gas(&x, t).kind();
        prop_assert_ne!(liquid, BoundaryKind::Unset);
        prop_assert_ne!(gas, BoundaryKind::Unset);
    }

    #[test]
    fn interior_points_are_unset(x0 in 0.001_f64..0.399, x1 in 0.001_f64..0.599) {
        let model = model();
        let bc = BoundaryClassifier::new(&model);
        let x = Vector2::new(x0, x1);
        prop_assert_eq!(bc.liquid(&x, 0.0).kind(), BoundaryKind::Unset);
        prop_assert_eq!(bc.gas(&x, 0.0).kind(), BoundaryKind::Unset);
    }
}
