//! Adaptive time-step controller.
//!
//! One attempt per [`TimeStepController::advance`]: a converged solve commits
//! the new state and grows the step geometrically up to the cap, a retryable
//! failure halves the step and keeps the time. Halving below the minimum
//! step is fatal.

use tracing::{debug, error, info, warn};

use crate::error::{SimError, SimResult};
use crate::snapshot::SnapshotSink;
use crate::solver::StepSolver;

/// Step-size policy and run length.
#[derive(Clone, Debug, PartialEq)]
pub struct StepControl {
    /// First step attempted (seconds)
    pub initial_step: f64,
    /// Upper bound on the step (seconds)
    pub max_step: f64,
    /// Halving below this is fatal (seconds)
    pub min_step: f64,
    /// Step multiplier after an accepted step
    pub growth_factor: f64,
    /// The run ends once the clock reaches this time (seconds)
    pub t_end: f64,
    /// Offer every N-th accepted step to the snapshot sink (0 disables)
    pub snapshot_every: usize,
}

impl Default for StepControl {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            max_step: 10.0,
            min_step: 1e-6,
            growth_factor: 1.2,
            t_end: 1.0,
            snapshot_every: 1,
        }
    }
}

impl StepControl {
    pub fn validate(&self) -> SimResult<()> {
        let all_finite = [
            self.initial_step,
            self.max_step,
            self.min_step,
            self.growth_factor,
            self.t_end,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(SimError::InvalidArg {
                what: "step control values must be finite",
            });
        }
        if self.min_step <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "min_step must be positive",
            });
        }
        if self.initial_step < self.min_step {
            return Err(SimError::InvalidArg {
                what: "initial_step must not be below min_step",
            });
        }
        if self.initial_step > self.max_step {
            return Err(SimError::InvalidArg {
                what: "initial_step must not exceed max_step",
            });
        }
        if self.growth_factor < 1.0 {
            return Err(SimError::InvalidArg {
                what: "growth_factor must be at least 1",
            });
        }
        if self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        Ok(())
    }
}

/// Mutable clock of the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStepState {
    pub current_time: f64,
    pub step_size: f64,
    pub step_cap: f64,
    pub min_step: f64,
    pub growth_factor: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerPhase {
    Running,
    Halving,
    Accepted,
    Terminated,
    Fatal,
}

/// Result of one controller attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// The solve converged and the state was committed.
    Accepted {
        time: f64,
        step_taken: f64,
        next_step: f64,
    },
    /// The solve failed retryably; the step was halved.
    Retried {
        time: f64,
        failed_step: f64,
        next_step: f64,
    },
    /// The clock already reached `t_end`.
    Terminated { time: f64 },
}

/// Progress report after each accepted step.
#[derive(Clone, Debug, Default)]
pub struct RunProgress {
    pub step: usize,
    pub sim_time_s: f64,
    pub t_end_s: f64,
    pub fraction_complete: f64,
    pub cutback_retries: usize,
}

/// Summary of a finished run.
#[derive(Clone, Debug)]
pub struct RunRecord<S> {
    pub final_state: S,
    /// Final clock value (seconds), may overshoot `t_end`
    pub time: f64,
    pub accepted_steps: usize,
    /// Sizes of the accepted steps in order (seconds)
    pub step_sizes: Vec<f64>,
    pub cutback_retries: usize,
    pub snapshots_written: usize,
    pub snapshot_failures: usize,
}

#[derive(Debug)]
pub struct TimeStepController {
    control: StepControl,
    state: TimeStepState,
    phase: ControllerPhase,
    accepted: usize,
    retries: usize,
}

impl TimeStepController {
    pub fn new(control: StepControl) -> SimResult<Self> {
        control.validate()?;
        let state = TimeStepState {
            current_time: 0.0,
            step_size: control.initial_step,
            step_cap: control.max_step,
            min_step: control.min_step,
            growth_factor: control.growth_factor,
        };
        Ok(Self {
            control,
            state,
            phase: ControllerPhase::Running,
            accepted: 0,
            retries: 0,
        })
    }

    pub fn control(&self) -> &StepControl {
        &self.control
    }

    pub fn state(&self) -> &TimeStepState {
        &self.state
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn accepted_steps(&self) -> usize {
        self.accepted
    }

    pub fn cutback_retries(&self) -> usize {
        self.retries
    }

    /// Make one solve attempt from the committed `current` state.
    pub fn advance<V: StepSolver>(
        &mut self,
        solver: &mut V,
        current: &mut V::State,
    ) -> SimResult<StepOutcome> {
        match self.phase {
            ControllerPhase::Fatal => {
                return Err(SimError::InvalidArg {
                    what: "controller stopped after a fatal error",
                })
            }
            ControllerPhase::Terminated => {
                return Ok(StepOutcome::Terminated {
                    time: self.state.current_time,
                })
            }
            _ => {}
        }
        if self.state.current_time >= self.control.t_end {
            self.phase = ControllerPhase::Terminated;
            return Ok(StepOutcome::Terminated {
                time: self.state.current_time,
            });
        }

        self.phase = ControllerPhase::Running;
        let time = self.state.current_time;
        let step = self.state.step_size;

        match solver.solve_step(time, step, current) {
            Ok(next) => {
                self.phase = ControllerPhase::Accepted;
                *current = next;
                self.state.current_time = time + step;
                self.state.step_size =
                    (step * self.state.growth_factor).min(self.state.step_cap);
                self.accepted += 1;
                debug!(
                    step = self.accepted,
                    time_s = self.state.current_time,
                    dt_s = step,
                    next_dt_s = self.state.step_size,
                    "step accepted"
                );
                self.phase = if self.state.current_time >= self.control.t_end {
                    ControllerPhase::Terminated
                } else {
                    ControllerPhase::Running
                };
                Ok(StepOutcome::Accepted {
                    time: self.state.current_time,
                    step_taken: step,
                    next_step: self.state.step_size,
                })
            }
            Err(SimError::Retryable { message }) => {
                self.phase = ControllerPhase::Halving;
                self.retries += 1;
                let halved = step * 0.5;
                if halved < self.state.min_step {
                    self.phase = ControllerPhase::Fatal;
                    error!(
                        time_s = time,
                        dt_s = halved,
                        min_dt_s = self.state.min_step,
                        "time step fell below minimum: {}",
                        message
                    );
                    return Err(SimError::StepBelowMinimum {
                        time,
                        step: halved,
                        min_step: self.state.min_step,
                        cause: message,
                    });
                }
                warn!(
                    time_s = time,
                    failed_dt_s = step,
                    next_dt_s = halved,
                    "solve failed, halving step: {}",
                    message
                );
                self.state.step_size = halved;
                self.phase = ControllerPhase::Running;
                Ok(StepOutcome::Retried {
                    time,
                    failed_step: step,
                    next_step: halved,
                })
            }
            Err(e) => {
                self.phase = ControllerPhase::Fatal;
                error!(time_s = time, dt_s = step, "solve failed fatally: {}", e);
                Err(e)
            }
        }
    }

    /// Drive the whole run from `initial` until the clock reaches `t_end`.
    pub fn run<V, K>(
        &mut self,
        solver: &mut V,
        initial: V::State,
        sink: &mut K,
    ) -> SimResult<RunRecord<V::State>>
    where
        V: StepSolver,
        K: SnapshotSink<V::State> + ?Sized,
    {
        self.run_with_progress(solver, initial, sink, None)
    }

    /// Like [`run`](Self::run), reporting progress after every accepted step.
    pub fn run_with_progress<V, K>(
        &mut self,
        solver: &mut V,
        initial: V::State,
        sink: &mut K,
        mut progress: Option<&mut dyn FnMut(RunProgress)>,
    ) -> SimResult<RunRecord<V::State>>
    where
        V: StepSolver,
        K: SnapshotSink<V::State> + ?Sized,
    {
        let mut state = initial;
        let mut step_sizes = Vec::new();
        let mut written = 0;
        let mut failures = 0;
        let every = self.control.snapshot_every;

        if every > 0 {
            let time = self.state.current_time;
            offer_snapshot(sink, 0, time, &state, &mut written, &mut failures);
        }

        loop {
            match self.advance(solver, &mut state)? {
                StepOutcome::Accepted {
                    time, step_taken, ..
                } => {
                    step_sizes.push(step_taken);
                    if every > 0 && self.accepted % every == 0 {
                        let step = self.accepted;
                        offer_snapshot(sink, step, time, &state, &mut written, &mut failures);
                    }
                    if let Some(cb) = progress.as_deref_mut() {
                        let fraction = if self.control.t_end > 0.0 {
                            (time / self.control.t_end).min(1.0)
                        } else {
                            1.0
                        };
                        cb(RunProgress {
                            step: self.accepted,
                            sim_time_s: time,
                            t_end_s: self.control.t_end,
                            fraction_complete: fraction,
                            cutback_retries: self.retries,
                        });
                    }
                }
                StepOutcome::Retried { .. } => {}
                StepOutcome::Terminated { .. } => break,
            }
        }

        info!(
            steps = self.accepted,
            retries = self.retries,
            time_s = self.state.current_time,
            snapshots = written,
            snapshot_failures = failures,
            "run finished"
        );

        Ok(RunRecord {
            final_state: state,
            time: self.state.current_time,
            accepted_steps: self.accepted,
            step_sizes,
            cutback_retries: self.retries,
            snapshots_written: written,
            snapshot_failures: failures,
        })
    }
}

fn offer_snapshot<S, K>(
    sink: &mut K,
    step: usize,
    time: f64,
    state: &S,
    written: &mut usize,
    failures: &mut usize,
) where
    K: SnapshotSink<S> + ?Sized,
{
    match sink.offer(step, time, state) {
        Ok(()) => *written += 1,
        Err(e) => {
            *failures += 1;
            warn!(step, time_s = time, "snapshot failed: {}", e);
        }
    }
}
