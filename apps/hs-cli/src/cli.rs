//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

pub const USAGE: &str = "usage: hs-cli <level> <end time> <first time step> <max time step>";

#[derive(Parser, Debug)]
#[command(name = "hs-cli", version)]
#[command(about = "Two-phase Hele-Shaw infiltration driver", long_about = None)]
pub struct Cli {
    /// Grid refinement level (cells per axis double per level)
    #[arg(value_name = "level")]
    pub level: u32,

    /// Simulated end time in seconds
    #[arg(value_name = "end time", allow_negative_numbers = true)]
    pub t_end: f64,

    /// First time step in seconds
    #[arg(value_name = "first time step", allow_negative_numbers = true)]
    pub initial_step: f64,

    /// Upper bound on the time step in seconds
    #[arg(value_name = "max time step", allow_negative_numbers = true)]
    pub max_step: f64,

    /// Scenario file (YAML); the built-in reference scenario otherwise
    #[arg(long, value_name = "scenario.yaml")]
    pub config: Option<PathBuf>,

    /// Results directory (overrides the scenario)
    #[arg(long, value_name = "dir")]
    pub output: Option<PathBuf>,

    /// Do not write snapshots or a run manifest
    #[arg(long)]
    pub no_output: bool,

    /// Snapshot every N accepted steps (overrides the scenario; 0 disables)
    #[arg(long, value_name = "n")]
    pub snapshot_every: Option<usize>,

    /// Space dimension (overrides the scenario)
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub dim: Option<u8>,
}
