//! hs-cli: reference driver for the two-phase Hele-Shaw infiltration cell.
//!
//! `hs-cli <level> <end time> <first time step> <max time step>`

mod cli;
mod error;
mod run;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, USAGE};
use crate::error::{AppError, AppResult};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => {
                    eprintln!("{USAGE}");
                    ExitCode::FAILURE
                }
            };
        }
    };

    init_tracing();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: &Cli) -> AppResult<()> {
    let mut scenario = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading scenario");
            hs_project::load_yaml(path)?
        }
        None => hs_project::reference_scenario(),
    };
    if let Some(dim) = cli.dim {
        scenario.grid.dimension = usize::from(dim);
    }
    tracing::info!(
        scenario = %scenario.name,
        dimension = scenario.grid.dimension,
        level = cli.level,
        t_end_s = cli.t_end,
        initial_step_s = cli.initial_step,
        max_step_s = cli.max_step,
        "starting run"
    );

    match scenario.grid.dimension {
        2 => run::run::<2>(cli, &scenario),
        3 => run::run::<3>(cli, &scenario),
        other => Err(AppError::InvalidInput(format!(
            "unsupported dimension {other}"
        ))),
    }
}
