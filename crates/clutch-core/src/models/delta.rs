//! Replan delta: a one-shot status report from the user.

use serde::{Deserialize, Serialize};

use super::EnergyLevel;

/// What changed since the current plan was generated.
///
/// Forwarded alongside the original constraints and the current plan; never
/// merged into the constraint model or stored after the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplanDelta {
    /// Free text describing finished work
    pub completed_tasks: String,

    /// Free text describing how much time is left (e.g. "2 hours")
    pub remaining_time: String,

    /// Energy right now
    pub current_energy: EnergyLevel,
}

impl ReplanDelta {
    pub fn new(
        completed_tasks: impl Into<String>,
        remaining_time: impl Into<String>,
        current_energy: EnergyLevel,
    ) -> Self {
        Self {
            completed_tasks: completed_tasks.into(),
            remaining_time: remaining_time.into(),
            current_energy,
        }
    }
}
