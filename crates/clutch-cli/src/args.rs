//! Command-line argument definitions.
//!
//! Clap-facing wrappers stay here and convert into the framework-free
//! parameter types from `clutch_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Controller
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use clutch_core::StatusUpdate;

/// Clutch: turn a deadline, your free time and a brain dump into a
/// time-blocked plan, then keep it honest as the evening goes sideways.
#[derive(Parser)]
#[command(version, about, name = "clutch")]
pub struct Args {
    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/clutch/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print plans as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, an interactive session starts.
#[derive(Subcommand)]
pub enum Commands {
    /// Walk through intake, then replan and chat interactively
    #[command(alias = "s")]
    Session,
    /// Generate a plan from a constraints file
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Replan an existing plan from a status update
    #[command(alias = "r")]
    Replan(ReplanArgs),
    /// Render a saved plan without calling the generator
    Show(ShowArgs),
}

/// Generate a plan
#[derive(ClapArgs)]
pub struct PlanArgs {
    /// JSON file holding the constraints
    #[arg(short, long)]
    pub constraints: PathBuf,
}

/// Replan from a status update
///
/// The plan file is the JSON printed by `clutch plan --json`.
#[derive(ClapArgs)]
pub struct ReplanArgs {
    /// JSON file holding the constraints
    #[arg(short, long)]
    pub constraints: PathBuf,

    /// JSON file holding the current plan
    #[arg(short, long)]
    pub plan: PathBuf,

    /// What got done since the plan was made
    #[arg(long, default_value = "")]
    pub completed: String,

    /// How much time is left, in your own words
    #[arg(long, default_value = "")]
    pub remaining: String,

    /// Current energy, 1-10
    #[arg(long, default_value_t = 5)]
    pub energy: u8,
}

impl From<&ReplanArgs> for StatusUpdate {
    fn from(val: &ReplanArgs) -> Self {
        StatusUpdate {
            completed_tasks: val.completed.clone(),
            remaining_time: val.remaining.clone(),
            current_energy: val.energy,
        }
    }
}

/// Render a plan file
#[derive(ClapArgs)]
pub struct ShowArgs {
    /// JSON file holding the plan
    #[arg(short, long)]
    pub plan: PathBuf,

    /// Constraints to check the plan against
    #[arg(short, long)]
    pub constraints: Option<PathBuf>,
}
