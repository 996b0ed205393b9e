//! Intake wizard step enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five linear steps of intake, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntakeStep {
    Deadline,
    Availability,
    Preferences,
    BrainDump,
    Priorities,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 5] = [
        IntakeStep::Deadline,
        IntakeStep::Availability,
        IntakeStep::Preferences,
        IntakeStep::BrainDump,
        IntakeStep::Priorities,
    ];

    pub const FIRST: IntakeStep = IntakeStep::Deadline;
    pub const LAST: IntakeStep = IntakeStep::Priorities;

    /// Zero-based position of the step.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn title(self) -> &'static str {
        match self {
            IntakeStep::Deadline => "Deadline",
            IntakeStep::Availability => "Availability",
            IntakeStep::Preferences => "Preferences",
            IntakeStep::BrainDump => "Brain dump",
            IntakeStep::Priorities => "Priorities",
        }
    }
}

impl fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
