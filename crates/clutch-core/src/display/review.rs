//! Advisory checks of a plan against its constraints.
//!
//! The generator is not trusted to produce a coherent timeline, but a plan
//! is never rejected locally either. [`review`] lists what looks wrong so the
//! user can ask for a fix; the plan is displayed regardless.

use std::fmt;

use jiff::civil::DateTime;

use super::schedule::block_duration_minutes;
use crate::models::{BlockType, Constraints, Plan};

/// Something suspicious about one schedule block.
///
/// `index` is the block's position in the plan's original sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    /// The block ends at or before its start
    NonPositiveDuration { index: usize, label: String },
    /// The block starts before the block preceding it
    OutOfOrder { index: usize, label: String },
    /// The block is already over
    BeforeNow { index: usize, label: String },
    /// The block ends after the deadline
    AfterDeadline { index: usize, label: String },
    /// A non-break block intersects a fixed commitment
    OverlapsCommitment {
        index: usize,
        label: String,
        commitment: String,
    },
}

impl PlanWarning {
    /// Position of the offending block.
    pub fn index(&self) -> usize {
        match self {
            PlanWarning::NonPositiveDuration { index, .. }
            | PlanWarning::OutOfOrder { index, .. }
            | PlanWarning::BeforeNow { index, .. }
            | PlanWarning::AfterDeadline { index, .. }
            | PlanWarning::OverlapsCommitment { index, .. } => *index,
        }
    }
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::NonPositiveDuration { label, .. } => {
                write!(f, "'{label}' ends before it starts")
            }
            PlanWarning::OutOfOrder { label, .. } => {
                write!(f, "'{label}' starts before the previous block")
            }
            PlanWarning::BeforeNow { label, .. } => write!(f, "'{label}' is already over"),
            PlanWarning::AfterDeadline { label, .. } => {
                write!(f, "'{label}' runs past the deadline")
            }
            PlanWarning::OverlapsCommitment {
                label, commitment, ..
            } => write!(f, "'{label}' overlaps '{commitment}'"),
        }
    }
}

/// Check every block of `plan` against `constraints` as of `now`.
///
/// Returns warnings in block order; an empty list means nothing looked off.
pub fn review(plan: &Plan, constraints: &Constraints, now: DateTime) -> Vec<PlanWarning> {
    let deadline = constraints.deadline.at();
    let mut warnings = Vec::new();
    let mut previous_start: Option<DateTime> = None;

    for (index, block) in plan.schedule_blocks.iter().enumerate() {
        let label = || block.label.clone();

        if block_duration_minutes(block) <= 0 {
            warnings.push(PlanWarning::NonPositiveDuration {
                index,
                label: label(),
            });
        }
        if previous_start.is_some_and(|start| block.start_time < start) {
            warnings.push(PlanWarning::OutOfOrder {
                index,
                label: label(),
            });
        }
        if block.end_time <= now {
            warnings.push(PlanWarning::BeforeNow {
                index,
                label: label(),
            });
        }
        if block.end_time > deadline {
            warnings.push(PlanWarning::AfterDeadline {
                index,
                label: label(),
            });
        }
        if block.kind != BlockType::Break {
            for commitment in &constraints.fixed_commitments {
                if commitment.overlaps(block.start_time, block.end_time) {
                    warnings.push(PlanWarning::OverlapsCommitment {
                        index,
                        label: label(),
                        commitment: commitment.label.clone(),
                    });
                }
            }
        }

        previous_start = Some(block.start_time);
    }

    warnings
}

/// Newtype wrapper for displaying a list of warnings.
///
/// Renders nothing at all when the list is empty.
#[derive(Debug, Clone, Copy)]
pub struct Warnings<'a>(pub &'a [PlanWarning]);

impl fmt::Display for Warnings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f, "## Warnings")?;
        writeln!(f)?;
        for warning in self.0 {
            writeln!(f, "- {warning}")?;
        }
        Ok(())
    }
}
