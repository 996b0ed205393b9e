//! Command handlers for the one-shot subcommands.
//!
//! Each handler loads its JSON inputs, drives the [`ReplanController`] and
//! prints the result through the [`TerminalRenderer`]. The interactive
//! session lives in [`crate::session`] and shares the same printing helpers.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clutch_core::{
    display::{AppliedResult, Warnings},
    review, Applied, Constraints, Plan, ReplanController, ReplanDelta, StatusUpdate,
};
use jiff::{civil::DateTime, Zoned};
use log::info;
use serde::de::DeserializeOwned;

use crate::{
    args::{PlanArgs, ReplanArgs, ShowArgs},
    renderer::TerminalRenderer,
};

/// Wall-clock time used for validation and advisory review.
pub fn now() -> DateTime {
    Zoned::now().datetime()
}

/// Read and parse a JSON file, naming it in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {what} file '{}'", path.display()))
}

/// Front-end state shared by every command.
pub struct Cli {
    pub(crate) renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer, json: bool) -> Self {
        Self { renderer, json }
    }

    /// Generate a fresh plan from a constraints file.
    pub async fn plan(&self, controller: &ReplanController, args: PlanArgs) -> Result<()> {
        let constraints: Constraints = read_json(&args.constraints, "constraints")?;
        constraints.validate(now())?;

        info!("generating plan from {}", args.constraints.display());
        let applied = controller.start(constraints.clone()).await?;
        self.print_applied(&applied, Some(&constraints))
    }

    /// Replan a saved plan from a status update.
    pub async fn replan(&self, controller: &ReplanController, args: ReplanArgs) -> Result<()> {
        // Reject a bad status update before touching the files
        let delta = ReplanDelta::try_from(StatusUpdate::from(&args))?;
        let constraints: Constraints = read_json(&args.constraints, "constraints")?;
        let plan: Plan = read_json(&args.plan, "plan")?;

        controller.resume(constraints.clone(), plan)?;
        info!("replanning {}", args.plan.display());
        let applied = controller.submit_status_update(delta).await?;
        self.print_applied(&applied, Some(&constraints))
    }

    /// Render a saved plan, optionally checked against its constraints.
    pub fn show(&self, args: ShowArgs) -> Result<()> {
        let plan: Plan = read_json(&args.plan, "plan")?;
        let constraints = args
            .constraints
            .as_deref()
            .map(|path| read_json::<Constraints>(path, "constraints"))
            .transpose()?;
        self.print_plan(&plan, constraints.as_ref())
    }

    /// Print a plan as markdown (with warnings) or as JSON.
    pub fn print_plan(&self, plan: &Plan, constraints: Option<&Constraints>) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(plan)?);
            return Ok(());
        }

        self.renderer.render(&plan.to_string())?;
        if let Some(constraints) = constraints {
            let warnings = review(plan, constraints, now());
            if !warnings.is_empty() {
                self.renderer.render(&format!("\n{}", Warnings(&warnings)))?;
            }
        }
        Ok(())
    }

    /// Print the outcome of a controller operation.
    pub fn print_applied(&self, applied: &Applied, constraints: Option<&Constraints>) -> Result<()> {
        match applied {
            Applied::PlanReplaced(plan) => self.print_plan(plan, constraints),
            // A reply never goes through --json; it is conversational text
            Applied::Replied { .. } => self.renderer.render(&AppliedResult(applied).to_string()),
            Applied::Discarded => Ok(()),
        }
    }
}
