//! Core library for Clutch, a deadline-driven planning assistant.
//!
//! Clutch turns a deadline, a set of available time windows and an
//! unstructured brain dump into a concrete, time-boxed plan, then keeps that
//! plan current as the user reports progress or asks for changes. Plan
//! synthesis itself is delegated to an external generator; this crate owns
//! everything around it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │   Intake    │──▶│ Constraints │──▶│  Replan     │──▶│  Plan       │
//! │   Wizard    │   │             │   │  Controller │◀─▶│  Generator  │
//! └─────────────┘   └─────────────┘   └──────┬──────┘   └─────────────┘
//!                                            │ Plan + Conversation Log
//!                                            ▼
//!                                     ┌─────────────┐
//!                                     │  Presenter  │
//!                                     │  (display)  │
//!                                     └─────────────┘
//! ```
//!
//! - [`intake`]: five-step wizard producing a validated [`Constraints`]
//! - [`generator`]: the [`PlanGenerator`] trait and its HTTP client
//! - [`controller`]: the session state machine, [`ReplanController`]
//! - [`display`]: day grouping, durations and markdown output
//! - [`models`]: constraint, plan and conversation data types
//! - [`config`]: TOML configuration with XDG lookup
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use clutch_core::{
//!     generator::testing::ScriptedGenerator,
//!     intake::IntakeWizard,
//!     models::{BlockType, Plan, ScheduleBlock, WorkingWindow},
//!     SessionBuilder,
//! };
//! use jiff::civil::{date, time};
//!
//! # async fn example() -> clutch_core::Result<()> {
//! let mut wizard = IntakeWizard::default();
//! wizard.set_deadline_date(date(2026, 10, 20));
//! wizard.advance()?;
//! wizard.add_window(WorkingWindow::new(date(2026, 10, 19), time(18, 0, 0, 0), time(22, 0, 0, 0)));
//! wizard.advance()?;
//! wizard.advance()?;
//! wizard.set_brain_dump("finish essay, email professor");
//! wizard.advance()?;
//! wizard.set_outcome(0, "submit essay draft")?;
//! wizard.set_done_enough("intro written");
//! let constraints = wizard.submit(date(2026, 10, 19).at(17, 0, 0, 0))?;
//!
//! // A scripted generator stands in for the remote service here
//! let generator = Arc::new(ScriptedGenerator::new());
//! let day = date(2026, 10, 19);
//! generator.push_plan(Plan {
//!     summary: "Essay first.".to_string(),
//!     top_priorities: vec![],
//!     schedule_blocks: vec![ScheduleBlock::new(
//!         day.at(18, 0, 0, 0),
//!         day.at(18, 50, 0, 0),
//!         "Draft intro",
//!         BlockType::Work,
//!     )],
//!     next_60_minutes: vec![],
//!     two_minute_start: "Open the essay file.".to_string(),
//!     if_behind_plan: vec![],
//!     notes: vec![],
//! });
//!
//! let controller = SessionBuilder::new().with_generator(generator).build()?;
//! controller.start(constraints).await?;
//!
//! if let Some(plan) = controller.plan() {
//!     println!("{plan}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod generator;
pub mod intake;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use config::ClutchConfig;
pub use controller::{Applied, ReplanController, SessionBuilder, SessionState};
pub use display::{present, review, OperationStatus, PlanView, PlanWarning};
pub use error::{ClutchError, GeneratorFailure, Result};
pub use generator::{GenerateRequest, GenerateResponse, HttpPlanGenerator, PlanGenerator};
pub use intake::{IntakeDefaults, IntakeStep, IntakeWizard};
pub use models::{Constraints, ConversationLog, ConversationMessage, Plan, ReplanDelta};
pub use params::{StatusUpdate, TimeRange};
