//! Cut-back retry behaviour of the time-step controller.

use hs_sim::{
    ControllerPhase, NoSnapshots, SimError, SimResult, StepControl, StepOutcome, StepSolver,
    SnapshotError, TimeStepController,
};
use proptest::prelude::*;

struct FailThenSucceed {
    failures_left: usize,
    attempts: Vec<f64>,
}

impl FailThenSucceed {
    fn new(failures: usize) -> Self {
        Self {
            failures_left: failures,
            attempts: Vec::new(),
        }
    }
}

impl StepSolver for FailThenSucceed {
    type State = f64;

    fn solve_step(&mut self, _t: f64, dt: f64, prev: &f64) -> SimResult<f64> {
        self.attempts.push(dt);
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(SimError::Retryable {
                message: "intentional retryable failure".to_string(),
            });
        }
        Ok(prev + dt)
    }
}

fn control(initial_step: f64, min_step: f64) -> StepControl {
    StepControl {
        initial_step,
        max_step: 10.0,
        min_step,
        growth_factor: 1.2,
        t_end: 100.0,
        snapshot_every: 0,
    }
}

/// Advance until the first accepted step and return its size.
fn first_accepted(ctl: &mut TimeStepController, solver: &mut FailThenSucceed) -> SimResult<f64> {
    let mut state = 0.0;
    loop {
        if let StepOutcome::Accepted { step_taken, .. } = ctl.advance(solver, &mut state)? {
            return Ok(step_taken);
        }
    }
}

#[test]
fn three_failures_take_an_eighth_of_the_step() {
    let mut ctl = TimeStepController::new(control(1.0, 1e-6)).unwrap();
    let mut solver = FailThenSucceed::new(3);

    let taken = first_accepted(&mut ctl, &mut solver).unwrap();

    assert_eq!(taken, 0.125);
    assert_eq!(solver.attempts, vec![1.0, 0.5, 0.25, 0.125]);
    assert_eq!(ctl.cutback_retries(), 3);
    assert_eq!(ctl.state().current_time, 0.125);
    assert!((ctl.state().step_size - 0.15).abs() < 1e-15);
}

#[test]
fn halving_below_the_floor_is_fatal() {
    let mut ctl = TimeStepController::new(control(1.0, 0.3)).unwrap();
    let mut solver = FailThenSucceed::new(2);

    let err = first_accepted(&mut ctl, &mut solver).unwrap_err();

    match err {
        SimError::StepBelowMinimum {
            time,
            step,
            min_step,
            cause,
        } => {
            assert_eq!(time, 0.0);
            assert_eq!(step, 0.25);
            assert_eq!(min_step, 0.3);
            assert_eq!(cause, "intentional retryable failure");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ctl.phase(), ControllerPhase::Fatal);
    // the last valid step size is kept
    assert_eq!(ctl.state().step_size, 0.5);
}

#[test]
fn run_propagates_fatal_error() {
    let mut ctl = TimeStepController::new(control(1.0, 0.3)).unwrap();
    let mut solver = FailThenSucceed::new(5);
    let result = ctl.run(&mut solver, 0.0, &mut NoSnapshots);
    assert!(matches!(result, Err(SimError::StepBelowMinimum { .. })));
}

#[test]
fn snapshot_failures_do_not_abort_the_run() {
    let mut ctl = TimeStepController::new(StepControl {
        t_end: 3.0,
        snapshot_every: 1,
        ..control(1.0, 1e-6)
    })
    .unwrap();
    let mut solver = FailThenSucceed::new(1);
    let mut offered = Vec::new();
    let mut sink = |step: usize, _t: f64, _s: &f64| {
        offered.push(step);
        if step % 2 == 1 {
            return Err(SnapshotError::Write {
                message: "disk full".to_string(),
            });
        }
        Ok(())
    };

    let record = ctl.run(&mut solver, 0.0, &mut sink).unwrap();

    // 0.5, 0.6, 0.72, 0.864, 1.0368 -> t = 3.7208
    assert_eq!(record.accepted_steps, 5);
    assert_eq!(record.cutback_retries, 1);
    assert_eq!(offered, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(record.snapshot_failures, 3);
    assert_eq!(record.snapshots_written, 3);
    assert!((record.final_state - record.time).abs() < 1e-12);
}

proptest! {
    #[test]
    fn k_failures_halve_k_times(k in 0usize..20) {
        let mut ctl = TimeStepController::new(control(1.0, 1e-6)).unwrap();
        let mut solver = FailThenSucceed::new(k);
        let taken = first_accepted(&mut ctl, &mut solver).unwrap();
        prop_assert_eq!(taken, 1.0 / (1u64 << k) as f64);
        prop_assert_eq!(ctl.cutback_retries(), k);
    }

    #[test]
    fn failures_past_the_floor_are_fatal(k in 20usize..40) {
        let mut ctl = TimeStepController::new(control(1.0, 1e-6)).unwrap();
        let mut solver = FailThenSucceed::new(k);
        let result = first_accepted(&mut ctl, &mut solver);
        prop_assert!(
            matches!(result, Err(SimError::StepBelowMinimum { .. })),
            "expected fatal floor violation"
        );
        prop_assert_eq!(ctl.phase(), ControllerPhase::Fatal);
    }
}
