//! Constraint model: the planning problem collected by the intake wizard.

use jiff::civil::{self, Date, DateTime, Time};
use serde::{Deserialize, Serialize};

use super::{EnergyLevel, FocusMethod, SleepHours};
use crate::{
    error::{ClutchError, Result},
    intake::IntakeStep,
};

/// Time used when the user picks a deadline date but no time.
pub const END_OF_DAY: Time = civil::time(23, 59, 0, 0);

/// Maximum number of must-happen outcomes.
pub const MAX_OUTCOMES: usize = 3;

/// Hard deadline for the planning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub date: Date,
    #[serde(default = "end_of_day")]
    pub time: Time,
}

fn end_of_day() -> Time {
    END_OF_DAY
}

impl Deadline {
    /// Deadline at the end of the given day.
    pub fn on(date: Date) -> Self {
        Self {
            date,
            time: END_OF_DAY,
        }
    }

    pub fn at(&self) -> DateTime {
        self.date.to_datetime(self.time)
    }
}

/// A block of time the user has declared available for work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWindow {
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
}

impl WorkingWindow {
    pub fn new(date: Date, start_time: Time, end_time: Time) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    pub fn start(&self) -> DateTime {
        self.date.to_datetime(self.start_time)
    }

    pub fn end(&self) -> DateTime {
        self.date.to_datetime(self.end_time)
    }

    /// Length of the window in minutes. Not clamped.
    pub fn minutes(&self) -> i64 {
        self.start().duration_until(self.end()).as_secs() / 60
    }
}

/// Immovable time the plan must treat as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCommitment {
    pub label: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
}

impl FixedCommitment {
    pub fn new(label: impl Into<String>, date: Date, start_time: Time, end_time: Time) -> Self {
        Self {
            label: label.into(),
            date,
            start_time,
            end_time,
        }
    }

    pub fn start(&self) -> DateTime {
        self.date.to_datetime(self.start_time)
    }

    pub fn end(&self) -> DateTime {
        self.date.to_datetime(self.end_time)
    }

    /// Whether `[start, end)` intersects this commitment.
    pub fn overlaps(&self, start: DateTime, end: DateTime) -> bool {
        start < self.end() && self.start() < end
    }
}

/// The complete planning problem for one session.
///
/// Created once by [`crate::intake::IntakeWizard::submit`] and never mutated
/// afterwards; a changed problem goes through re-intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    pub deadline: Deadline,
    pub working_windows: Vec<WorkingWindow>,
    #[serde(default)]
    pub fixed_commitments: Vec<FixedCommitment>,
    #[serde(default)]
    pub min_sleep_hours: SleepHours,
    #[serde(default)]
    pub focus_method: FocusMethod,
    #[serde(default)]
    pub energy_level: EnergyLevel,
    pub brain_dump: String,
    pub top_outcomes: Vec<String>,
    pub done_enough: String,
}

impl Constraints {
    /// Check every intake requirement plus "deadline strictly after `now`".
    ///
    /// # Errors
    ///
    /// * `ClutchError::InvalidInput` - deadline not in the future, or more than
    ///   three outcomes
    /// * `ClutchError::IncompleteStep` - a required section is empty
    pub fn validate(&self, now: DateTime) -> Result<()> {
        if self.deadline.at() <= now {
            return Err(ClutchError::invalid_input("deadline")
                .with_reason(format!("{} is not in the future", self.deadline.at())));
        }
        if self.working_windows.is_empty() {
            return Err(ClutchError::incomplete(IntakeStep::Availability)
                .with_reason("at least one working window is required"));
        }
        if self.brain_dump.trim().is_empty() {
            return Err(ClutchError::incomplete(IntakeStep::BrainDump)
                .with_reason("brain dump is empty"));
        }
        if self.top_outcomes.len() > MAX_OUTCOMES {
            return Err(ClutchError::invalid_input("topOutcomes")
                .with_reason(format!("at most {MAX_OUTCOMES} outcomes are allowed")));
        }
        if self.top_outcomes.iter().any(|o| o.trim().is_empty()) {
            return Err(ClutchError::invalid_input("topOutcomes")
                .with_reason("outcomes must not be blank"));
        }
        if self.top_outcomes.is_empty() {
            return Err(ClutchError::incomplete(IntakeStep::Priorities)
                .with_reason("at least one outcome is required"));
        }
        if self.done_enough.trim().is_empty() {
            return Err(ClutchError::incomplete(IntakeStep::Priorities)
                .with_reason("'done enough' is empty"));
        }
        Ok(())
    }

    /// Sum of all declared working-window minutes.
    pub fn total_window_minutes(&self) -> i64 {
        self.working_windows.iter().map(WorkingWindow::minutes).sum()
    }
}
