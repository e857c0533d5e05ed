//! Geometric step growth and progress reporting.

use hs_sim::{NoSnapshots, RunProgress, SimResult, StepControl, StepSolver, TimeStepController};

struct AlwaysConverges;

impl StepSolver for AlwaysConverges {
    type State = Vec<f64>;

    fn solve_step(&mut self, t: f64, dt: f64, prev: &Vec<f64>) -> SimResult<Vec<f64>> {
        let mut next = prev.clone();
        next.push(t + dt);
        Ok(next)
    }
}

#[test]
fn five_accepted_steps_grow_geometrically() {
    let mut ctl = TimeStepController::new(StepControl {
        initial_step: 1.0,
        max_step: 10.0,
        min_step: 1e-6,
        growth_factor: 1.2,
        t_end: 7.0,
        snapshot_every: 0,
    })
    .unwrap();

    let record = ctl
        .run(&mut AlwaysConverges, Vec::new(), &mut NoSnapshots)
        .unwrap();

    assert_eq!(record.accepted_steps, 5);
    assert!((ctl.state().step_size - 2.48832).abs() < 1e-12);
    let total: f64 = record.step_sizes.iter().sum();
    assert!((record.time - total).abs() < 1e-12);
    assert!((record.time - 7.4416).abs() < 1e-12);
    assert_eq!(record.final_state.len(), 5);
    assert_eq!(record.final_state.last().copied(), Some(record.time));
}

#[test]
fn progress_reported_after_every_accepted_step() {
    let mut ctl = TimeStepController::new(StepControl {
        initial_step: 0.5,
        max_step: 0.5,
        t_end: 2.0,
        snapshot_every: 0,
        ..StepControl::default()
    })
    .unwrap();

    let mut events: Vec<RunProgress> = Vec::new();
    let mut on_progress = |p: RunProgress| events.push(p);
    let record = ctl
        .run_with_progress(
            &mut AlwaysConverges,
            Vec::new(),
            &mut NoSnapshots,
            Some(&mut on_progress),
        )
        .unwrap();

    assert_eq!(record.accepted_steps, 4);
    assert_eq!(events.len(), 4);
    assert_eq!(events[1].step, 2);
    assert_eq!(events[1].fraction_complete, 0.5);
    assert_eq!(events[3].fraction_complete, 1.0);
}
