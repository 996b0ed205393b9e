//! Data models for the planning problem, the plan, and the conversation.
//!
//! This module contains the value types that flow through the Clutch engine.
//! Display implementations for these models live in [`crate::display`] so the
//! data structures stay free of presentation logic.
//!
//! # Model Overview
//!
//! - [`Constraints`]: deadline, working windows, fixed commitments,
//!   preferences, brain dump, and outcomes. Built once by the intake wizard.
//! - [`Plan`]: summary, ranked priorities, time-boxed schedule blocks, a
//!   first-hour checklist, a two-minute starter, and contingency notes.
//!   Produced by the generator and replaced wholesale, never patched.
//! - [`ReplanDelta`]: one-shot status report that triggers a replan.
//! - [`ConversationLog`]: append-only chat history.
//!
//! All models serialise to the camelCase JSON shape the plan generator speaks.
//!
//! # Examples
//!
//! ```rust
//! use clutch_core::models::{BlockType, Plan, ScheduleBlock};
//! use jiff::civil::date;
//!
//! let plan = Plan {
//!     summary: "Draft tonight, polish tomorrow.".to_string(),
//!     top_priorities: vec![],
//!     schedule_blocks: vec![ScheduleBlock::new(
//!         date(2026, 10, 19).at(18, 0, 0, 0),
//!         date(2026, 10, 19).at(19, 0, 0, 0),
//!         "Draft intro",
//!         BlockType::Work,
//!     )],
//!     next_60_minutes: vec![],
//!     two_minute_start: "Open the essay document.".to_string(),
//!     if_behind_plan: vec![],
//!     notes: vec![],
//! };
//!
//! let json = serde_json::to_value(&plan).unwrap();
//! assert_eq!(json["scheduleBlocks"][0]["type"], "work");
//! ```

pub mod constraints;
pub mod conversation;
pub mod delta;
pub mod plan;
pub mod values;


pub use constraints::{Constraints, Deadline, FixedCommitment, WorkingWindow, END_OF_DAY, MAX_OUTCOMES};
pub use conversation::{ConversationLog, ConversationMessage, ConversationTurn, Role};
pub use delta::ReplanDelta;
pub use plan::{BlockType, Plan, Priority, ScheduleBlock, StarterStep};
pub use values::{EnergyLevel, FocusMethod, SleepHours};
