//! Plan presentation: grouping, durations and markdown rendering.
//!
//! Everything here is a pure function of its inputs. Nothing in this module
//! mutates a plan or talks to the generator, so the same plan always renders
//! the same way.
//!
//! # Architecture: View Types and Display Wrappers
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  present() and  │    │    Markdown     │
//! │ (Plan, Block)   │───▶│ Display wrappers│───▶│     Output      │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! [`present`] partitions a plan's schedule blocks by the calendar date of
//! each block's start. Days appear in the order their first block appears,
//! and blocks keep their original relative order inside a day, so
//! concatenating the groups is a stable partition of the input. Durations
//! are computed as `end - start` in minutes and shown as-is, including zero
//! and negative values.
//!
//! ## Module Organization
//!
//! - [`schedule`]: [`present`], [`PlanView`], [`DayGroup`], [`BlockView`]
//! - [`review`]: advisory checks of a plan against its constraints
//! - [`collections`]: list wrappers such as [`IfBehind`]
//! - [`results`]: rendering of controller outcomes
//! - [`status`]: status lines ([`OperationStatus`])
//! - [`datetime`]: clock, day and duration formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use clutch_core::{
//!     display::present,
//!     models::{BlockType, Plan, ScheduleBlock},
//! };
//! use jiff::civil::date;
//!
//! let monday = date(2026, 10, 19);
//! let tuesday = date(2026, 10, 20);
//! let plan = Plan {
//!     summary: "Essay tonight, slides tomorrow.".to_string(),
//!     top_priorities: vec![],
//!     schedule_blocks: vec![
//!         ScheduleBlock::new(monday.at(18, 0, 0, 0), monday.at(18, 50, 0, 0), "Essay intro", BlockType::Work),
//!         ScheduleBlock::new(tuesday.at(9, 0, 0, 0), tuesday.at(9, 30, 0, 0), "Slides", BlockType::Work),
//!         ScheduleBlock::new(monday.at(18, 50, 0, 0), monday.at(19, 0, 0, 0), "Stretch", BlockType::Break),
//!     ],
//!     next_60_minutes: vec![],
//!     two_minute_start: "Open the essay file.".to_string(),
//!     if_behind_plan: vec![],
//!     notes: vec![],
//! };
//!
//! let view = present(&plan);
//! assert_eq!(view.days.len(), 2);
//! assert_eq!(view.days[0].date, monday);
//! assert_eq!(view.days[0].blocks[1].block.label, "Stretch");
//! assert_eq!(view.days[0].blocks[0].duration_minutes, 50);
//!
//! let output = view.to_string();
//! assert!(output.contains("No contingency rules."));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod review;
pub mod schedule;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{FirstHour, IfBehind, Priorities};
pub use datetime::{ClockTime, DayHeading, Minutes};
pub use results::AppliedResult;
pub use review::{review, PlanWarning, Warnings};
pub use schedule::{block_duration_minutes, present, BlockView, DayGroup, PlanView};
pub use status::OperationStatus;
