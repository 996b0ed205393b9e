//! Intake wizard: collects a valid [`Constraints`] before any plan is generated.
//!
//! The wizard is a linear, revisitable state machine over five steps:
//!
//! ```text
//! Deadline → Availability → Preferences → Brain dump → Priorities → submit
//! ```
//!
//! Moving forward from a step requires that step's completeness predicate to
//! hold. Moving back is always allowed and keeps everything entered so far.
//! A step indicator may jump to any step already visited, as long as every
//! step before the target is still complete.
//!
//! Submitting on the final step returns the finished constraint model. The
//! wizard never talks to the plan generator; the caller hands the constraints
//! to [`crate::controller::ReplanController::start`].
//!
//! # Examples
//!
//! ```rust
//! use clutch_core::intake::{IntakeStep, IntakeWizard};
//! use clutch_core::models::WorkingWindow;
//! use jiff::civil::{date, time};
//!
//! let mut wizard = IntakeWizard::default();
//! assert!(wizard.advance().is_err()); // no deadline yet
//!
//! wizard.set_deadline_date(date(2026, 10, 20));
//! wizard.advance()?;
//! wizard.add_window(WorkingWindow::new(date(2026, 10, 19), time(18, 0, 0, 0), time(22, 0, 0, 0)));
//! wizard.advance()?;
//! wizard.advance()?; // preferences all have defaults
//! wizard.set_brain_dump("finish essay, email professor");
//! wizard.advance()?;
//! wizard.set_outcome(0, "submit essay draft")?;
//! wizard.set_done_enough("intro written");
//! assert_eq!(wizard.step(), IntakeStep::Priorities);
//!
//! let constraints = wizard.submit(date(2026, 10, 19).at(17, 0, 0, 0))?;
//! assert_eq!(constraints.top_outcomes, vec!["submit essay draft".to_string()]);
//! # Ok::<(), clutch_core::ClutchError>(())
//! ```

use jiff::civil::{Date, DateTime, Time};
use log::debug;

pub mod step;


pub use step::IntakeStep;

use crate::{
    error::{ClutchError, Result},
    models::{
        Constraints, Deadline, EnergyLevel, FixedCommitment, FocusMethod, SleepHours,
        WorkingWindow, END_OF_DAY, MAX_OUTCOMES,
    },
};

/// Preference defaults seeded into a fresh wizard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntakeDefaults {
    pub min_sleep_hours: SleepHours,
    pub focus_method: FocusMethod,
    pub energy_level: EnergyLevel,
}

/// In-memory intake state. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: IntakeStep,
    furthest: IntakeStep,
    deadline_date: Option<Date>,
    deadline_time: Option<Time>,
    working_windows: Vec<WorkingWindow>,
    fixed_commitments: Vec<FixedCommitment>,
    min_sleep_hours: SleepHours,
    focus_method: FocusMethod,
    energy_level: EnergyLevel,
    brain_dump: String,
    outcomes: [String; MAX_OUTCOMES],
    done_enough: String,
}

impl IntakeWizard {
    /// Creates an empty wizard on the first step.
    pub fn new(defaults: IntakeDefaults) -> Self {
        Self {
            step: IntakeStep::FIRST,
            furthest: IntakeStep::FIRST,
            deadline_date: None,
            deadline_time: None,
            working_windows: Vec::new(),
            fixed_commitments: Vec::new(),
            min_sleep_hours: defaults.min_sleep_hours,
            focus_method: defaults.focus_method,
            energy_level: defaults.energy_level,
            brain_dump: String::new(),
            outcomes: Default::default(),
            done_enough: String::new(),
        }
    }

    /// Re-intake: a wizard pre-filled from an existing constraint model with
    /// every step already visited.
    pub fn from_constraints(constraints: &Constraints) -> Self {
        let mut outcomes: [String; MAX_OUTCOMES] = Default::default();
        for (slot, outcome) in outcomes.iter_mut().zip(&constraints.top_outcomes) {
            slot.clone_from(outcome);
        }

        Self {
            step: IntakeStep::FIRST,
            furthest: IntakeStep::LAST,
            deadline_date: Some(constraints.deadline.date),
            deadline_time: Some(constraints.deadline.time),
            working_windows: constraints.working_windows.clone(),
            fixed_commitments: constraints.fixed_commitments.clone(),
            min_sleep_hours: constraints.min_sleep_hours,
            focus_method: constraints.focus_method,
            energy_level: constraints.energy_level,
            brain_dump: constraints.brain_dump.clone(),
            outcomes,
            done_enough: constraints.done_enough.clone(),
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn furthest_visited(&self) -> IntakeStep {
        self.furthest
    }

    /// Checks the completeness predicate of `step`.
    ///
    /// # Errors
    ///
    /// Returns `ClutchError::IncompleteStep` naming what is missing.
    pub fn check(&self, step: IntakeStep) -> Result<()> {
        let missing = match step {
            IntakeStep::Deadline if self.deadline_date.is_none() => Some("choose a deadline date"),
            IntakeStep::Availability if self.working_windows.is_empty() => {
                Some("add at least one working window")
            }
            IntakeStep::BrainDump if self.brain_dump.trim().is_empty() => {
                Some("write down what is on your plate")
            }
            IntakeStep::Priorities if self.outcomes.iter().all(|o| o.trim().is_empty()) => {
                Some("name at least one outcome that must happen")
            }
            IntakeStep::Priorities if self.done_enough.trim().is_empty() => {
                Some("describe what 'done enough' looks like")
            }
            _ => None,
        };

        match missing {
            Some(reason) => Err(ClutchError::incomplete(step).with_reason(reason)),
            None => Ok(()),
        }
    }

    pub fn is_complete(&self, step: IntakeStep) -> bool {
        self.check(step).is_ok()
    }

    /// Whether [`advance`](Self::advance) would succeed.
    pub fn can_advance(&self) -> bool {
        !self.step.is_last() && self.is_complete(self.step)
    }

    /// Moves to the next step if the current one is complete.
    ///
    /// # Errors
    ///
    /// * `ClutchError::IncompleteStep` - the current step is not complete
    /// * `ClutchError::InvalidInput` - already on the final step
    pub fn advance(&mut self) -> Result<IntakeStep> {
        self.check(self.step)?;
        let next = self.step.next().ok_or_else(|| {
            ClutchError::invalid_input("step").with_reason("already on the final step; submit instead")
        })?;

        debug!("intake: {} -> {}", self.step, next);
        self.step = next;
        self.furthest = self.furthest.max(next);
        Ok(next)
    }

    /// Moves to the previous step. Data is kept; on the first step this is a
    /// no-op.
    pub fn back(&mut self) -> IntakeStep {
        if let Some(previous) = self.step.previous() {
            debug!("intake: {} <- {}", previous, self.step);
            self.step = previous;
        }
        self.step
    }

    /// Jumps straight to a step, as a step indicator would.
    ///
    /// # Errors
    ///
    /// * `ClutchError::InvalidInput` - the target has never been visited
    /// * `ClutchError::IncompleteStep` - a step before the target no longer
    ///   satisfies its predicate
    pub fn jump_to(&mut self, target: IntakeStep) -> Result<()> {
        if target > self.furthest {
            return Err(ClutchError::invalid_input("step")
                .with_reason(format!("'{target}' has not been reached yet")));
        }
        if target > self.step {
            for step in IntakeStep::ALL.into_iter().take(target.index()) {
                self.check(step)?;
            }
        }

        debug!("intake: jump {} -> {}", self.step, target);
        self.step = target;
        Ok(())
    }

    /// Finishes intake and returns the constraint model.
    ///
    /// `now` is the caller's current local wall-clock time; the deadline must
    /// be strictly after it.
    ///
    /// # Errors
    ///
    /// * `ClutchError::InvalidInput` - not on the final step, or the deadline
    ///   has passed
    /// * `ClutchError::IncompleteStep` - any step is incomplete
    pub fn submit(&self, now: DateTime) -> Result<Constraints> {
        if !self.step.is_last() {
            return Err(ClutchError::invalid_input("step").with_reason(format!(
                "submit from '{}', currently on '{}'",
                IntakeStep::LAST,
                self.step
            )));
        }
        for step in IntakeStep::ALL {
            self.check(step)?;
        }

        let date = self.deadline_date.ok_or_else(|| {
            ClutchError::incomplete(IntakeStep::Deadline).with_reason("choose a deadline date")
        })?;
        let constraints = Constraints {
            deadline: Deadline {
                date,
                time: self.deadline_time.unwrap_or(END_OF_DAY),
            },
            working_windows: self.working_windows.clone(),
            fixed_commitments: self.fixed_commitments.clone(),
            min_sleep_hours: self.min_sleep_hours,
            focus_method: self.focus_method,
            energy_level: self.energy_level,
            brain_dump: self.brain_dump.trim().to_string(),
            top_outcomes: self
                .outcomes
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            done_enough: self.done_enough.trim().to_string(),
        };
        constraints.validate(now)?;

        debug!(
            "intake: submitted with {} window(s), {} commitment(s), {} outcome(s)",
            constraints.working_windows.len(),
            constraints.fixed_commitments.len(),
            constraints.top_outcomes.len()
        );
        Ok(constraints)
    }

    // Step 0: deadline

    pub fn set_deadline_date(&mut self, date: Date) {
        self.deadline_date = Some(date);
    }

    /// Sets the deadline time; `None` means end of day.
    pub fn set_deadline_time(&mut self, time: Option<Time>) {
        self.deadline_time = time;
    }

    pub fn clear_deadline(&mut self) {
        self.deadline_date = None;
        self.deadline_time = None;
    }

    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline_date.map(|date| Deadline {
            date,
            time: self.deadline_time.unwrap_or(END_OF_DAY),
        })
    }

    // Step 1: availability

    /// Adds a working window and returns its index. Overlaps are not checked.
    pub fn add_window(&mut self, window: WorkingWindow) -> usize {
        self.working_windows.push(window);
        self.working_windows.len() - 1
    }

    pub fn remove_window(&mut self, index: usize) -> Option<WorkingWindow> {
        (index < self.working_windows.len()).then(|| self.working_windows.remove(index))
    }

    pub fn working_windows(&self) -> &[WorkingWindow] {
        &self.working_windows
    }

    /// Adds a fixed commitment.
    ///
    /// # Errors
    ///
    /// Returns `ClutchError::InvalidInput` if the label is blank.
    pub fn add_commitment(&mut self, commitment: FixedCommitment) -> Result<usize> {
        if commitment.label.trim().is_empty() {
            return Err(ClutchError::invalid_input("fixedCommitments")
                .with_reason("commitment label must not be blank"));
        }
        self.fixed_commitments.push(commitment);
        Ok(self.fixed_commitments.len() - 1)
    }

    pub fn remove_commitment(&mut self, index: usize) -> Option<FixedCommitment> {
        (index < self.fixed_commitments.len()).then(|| self.fixed_commitments.remove(index))
    }

    pub fn fixed_commitments(&self) -> &[FixedCommitment] {
        &self.fixed_commitments
    }

    // Step 2: preferences

    pub fn set_min_sleep_hours(&mut self, hours: f32) -> Result<()> {
        self.min_sleep_hours = SleepHours::new(hours)?;
        Ok(())
    }

    pub fn min_sleep_hours(&self) -> SleepHours {
        self.min_sleep_hours
    }

    pub fn set_focus_method(&mut self, method: FocusMethod) {
        self.focus_method = method;
    }

    pub fn focus_method(&self) -> FocusMethod {
        self.focus_method
    }

    pub fn set_energy_level(&mut self, level: u8) -> Result<()> {
        self.energy_level = EnergyLevel::new(level)?;
        Ok(())
    }

    pub fn energy_level(&self) -> EnergyLevel {
        self.energy_level
    }

    // Step 3: brain dump

    pub fn set_brain_dump(&mut self, text: impl Into<String>) {
        self.brain_dump = text.into();
    }

    pub fn brain_dump(&self) -> &str {
        &self.brain_dump
    }

    // Step 4: priorities

    /// Sets outcome slot `index` (0, 1 or 2).
    ///
    /// # Errors
    ///
    /// Returns `ClutchError::InvalidInput` for an index past the last slot.
    pub fn set_outcome(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let slot = self.outcomes.get_mut(index).ok_or_else(|| {
            ClutchError::invalid_input("topOutcomes")
                .with_reason(format!("only {MAX_OUTCOMES} outcomes are allowed"))
        })?;
        *slot = text.into();
        Ok(())
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn set_done_enough(&mut self, text: impl Into<String>) {
        self.done_enough = text.into();
    }

    pub fn done_enough(&self) -> &str {
        &self.done_enough
    }
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new(IntakeDefaults::default())
    }
}
