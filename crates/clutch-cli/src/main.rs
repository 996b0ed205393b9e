//! Clutch CLI Application
//!
//! Terminal front end for the Clutch deadline planner: an interactive
//! session by default, plus one-shot `plan`, `replan` and `show` commands
//! for scripting.

mod args;
mod cli;
mod renderer;
mod session;

use std::io;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use clutch_core::{ReplanController, SessionBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        no_color,
        json,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(renderer, json);
    let controller = || -> Result<ReplanController> {
        SessionBuilder::new()
            .with_config_path(config.clone())
            .build()
            .context("Failed to initialize planning session")
    };

    info!("Clutch started");

    match command {
        // Rendering a file needs neither config nor a generator
        Some(Show(args)) => cli.show(args),
        Some(Plan(args)) => cli.plan(&controller()?, args).await,
        Some(Replan(args)) => cli.replan(&controller()?, args).await,
        Some(Session) | None => {
            let controller = controller()?;
            cli.run_session(&controller, io::stdin().lock()).await
        }
    }
}
