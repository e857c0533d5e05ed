//! The reference driver: grid, model, controller and output for one run.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use hs_core::timing::Timer;
use hs_grid::{GridView, StructuredGrid};
use hs_model::TwoPhaseModel;
use hs_project::{base_cells, domain_lengths, model_params, step_control, ScenarioDef};
use hs_results::{compute_run_id, RunManifest, RunSettings, RunStore, RunSummary};
use hs_sim::{
    FieldSnapshots, FieldState, NoSnapshots, QuasiStaticSolver, RunProgress, RunRecord,
    TimeStepController,
};
use tracing::info;

use crate::cli::Cli;
use crate::error::AppResult;

/// Rank of this process; the driver runs serially.
const RANK: usize = 0;

pub fn run<const D: usize>(cli: &Cli, scenario: &ScenarioDef) -> AppResult<()> {
    let wall = Instant::now();
    let setup = Timer::start("setup");

    let grid = StructuredGrid::<D>::refined(
        domain_lengths::<D>(scenario)?,
        base_cells::<D>(scenario)?,
        cli.level,
    )?;
    let generator = scenario.permeability.generator::<D>();
    let model = TwoPhaseModel::new(model_params(scenario), &grid, &*generator)?;

    let mut control = step_control(scenario, cli.t_end, cli.initial_step, cli.max_step);
    if let Some(every) = cli.snapshot_every {
        control.snapshot_every = every;
    }
    let mut controller = TimeStepController::new(control)?;
    let mut solver = QuasiStaticSolver::new(&model, &grid)?;
    let initial = FieldState::initial(&model, &grid)?;

    info!(
        dimension = D,
        level = cli.level,
        elements = grid.element_count(),
        cells = ?grid.cells(),
        "grid ready"
    );
    setup.stop_and_log();

    let output_enabled = !cli.no_output && scenario.output.enabled;
    let timestep = Timer::start("time loop");
    let mut reporter = ProgressReporter::new();
    let mut on_progress = |p: RunProgress| reporter.report(&p);

    let record = if output_enabled {
        let dir = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&scenario.output.directory));
        let store = RunStore::new(dir)?;
        let settings = RunSettings {
            dimension: D,
            level: cli.level,
            t_end_s: cli.t_end,
            initial_step_s: cli.initial_step,
            max_step_s: cli.max_step,
        };
        let version = env!("CARGO_PKG_VERSION");
        let run_id = compute_run_id(scenario, &settings, version);
        let mut manifest = RunManifest::new(
            run_id,
            &scenario.name,
            settings,
            grid.element_count(),
            version,
            RANK,
        );
        let writer = store.begin_run(&manifest)?;
        let mut sink = FieldSnapshots::new(&model, &grid, writer, RANK);

        let record =
            controller.run_with_progress(&mut solver, initial, &mut sink, Some(&mut on_progress))?;
        clear_progress_line();

        manifest.summary = Some(summary(&record, wall.elapsed().as_secs_f64()));
        store.save_manifest(&manifest)?;
        println!(
            "✓ Results: {}",
            store.root_dir().join(&manifest.run_id).display()
        );
        record
    } else {
        let record = controller.run_with_progress(
            &mut solver,
            initial,
            &mut NoSnapshots,
            Some(&mut on_progress),
        )?;
        clear_progress_line();
        record
    };
    timestep.stop_and_log();

    println!("✓ Simulation completed at t = {:.6} s", record.time);
    println!("  Accepted steps: {}", record.accepted_steps);
    println!("  Cutback retries: {}", record.cutback_retries);
    if output_enabled {
        println!(
            "  Snapshots: {} written, {} failed",
            record.snapshots_written, record.snapshot_failures
        );
    }
    Ok(())
}

fn summary<S>(record: &RunRecord<S>, wall_time_s: f64) -> RunSummary {
    RunSummary {
        final_time_s: record.time,
        accepted_steps: record.accepted_steps,
        cutback_retries: record.cutback_retries,
        snapshots_written: record.snapshots_written,
        snapshot_failures: record.snapshot_failures,
        wall_time_s,
    }
}

/// Throttled single-line progress bar on stdout.
struct ProgressReporter {
    started: Instant,
    last_emit: Instant,
    last_fraction: f64,
}

impl ProgressReporter {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_emit: now,
            last_fraction: -1.0,
        }
    }

    fn report(&mut self, p: &RunProgress) {
        let emit_now = (p.fraction_complete - self.last_fraction).abs() >= 0.005
            || self.last_emit.elapsed().as_millis() >= 100;
        if !emit_now {
            return;
        }
        let width = 28usize;
        let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
        print!(
            "\r[{}{}] {:>6.2}%  t={:.3}/{:.3}s  step={}  cutbacks={}  elapsed={:.1}s",
            "#".repeat(filled),
            "-".repeat(width.saturating_sub(filled)),
            p.fraction_complete * 100.0,
            p.sim_time_s,
            p.t_end_s,
            p.step,
            p.cutback_retries,
            self.started.elapsed().as_secs_f64()
        );
        let _ = io::stdout().flush();
        self.last_fraction = p.fraction_complete;
        self.last_emit = Instant::now();
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}
