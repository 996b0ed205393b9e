//! Parameter structures for Clutch operations.
//!
//! Plain, framework-free inputs shared by every front end. Each interface
//! layer wraps these with its own derives (clap arguments, prompts) and
//! converts into them, so the core never depends on a UI framework.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args /    │    │  Core Params    │    │  Domain Models  │
//! │   Prompts       │───▶│ (raw strings,   │───▶│ (validated      │
//! │                 │    │  plain ints)    │    │  strong types)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Conversion into the domain type is where validation happens, through
//! `TryFrom` or `FromStr`.

use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ClutchError, Result},
    models::{EnergyLevel, FixedCommitment, ReplanDelta, WorkingWindow},
};

/// Parameters for a structured status-update replan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// What got done since the last plan
    pub completed_tasks: String,
    /// How much time is left, in the user's words
    pub remaining_time: String,
    /// Current energy, 1-10
    pub current_energy: u8,
}

impl TryFrom<StatusUpdate> for ReplanDelta {
    type Error = ClutchError;

    fn try_from(params: StatusUpdate) -> Result<Self> {
        let current_energy = EnergyLevel::new(params.current_energy)?;
        Ok(ReplanDelta::new(
            params.completed_tasks.trim(),
            params.remaining_time.trim(),
            current_energy,
        ))
    }
}

/// A date plus a time range, written `YYYY-MM-DD HH:MM-HH:MM`.
///
/// Used to enter working windows and fixed commitments as one line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub date: Date,
    pub start: Time,
    pub end: Time,
}

impl TimeRange {
    pub fn into_window(self) -> WorkingWindow {
        WorkingWindow::new(self.date, self.start, self.end)
    }

    pub fn into_commitment(self, label: impl Into<String>) -> FixedCommitment {
        FixedCommitment::new(label, self.date, self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = ClutchError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| ClutchError::invalid_input("timeRange").with_reason(reason);

        let (date, range) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| invalid(format!("expected 'YYYY-MM-DD HH:MM-HH:MM', got '{s}'")))?;
        let (start, end) = range
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid(format!("expected a time range like 18:00-22:00, got '{range}'")))?;

        let date: Date = date
            .parse()
            .map_err(|e| invalid(format!("invalid date '{date}': {e}")))?;
        let start: Time = start
            .trim()
            .parse()
            .map_err(|e| invalid(format!("invalid start time '{start}': {e}")))?;
        let end: Time = end
            .trim()
            .parse()
            .map_err(|e| invalid(format!("invalid end time '{end}': {e}")))?;

        Ok(Self { date, start, end })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_status_update_into_delta() {
        let params = StatusUpdate {
            completed_tasks: " intro and outline ".to_string(),
            remaining_time: "2 hours".to_string(),
            current_energy: 3,
        };
        let delta = ReplanDelta::try_from(params).unwrap();
        assert_eq!(delta.completed_tasks, "intro and outline");
        assert_eq!(delta.current_energy.get(), 3);
    }

    #[test]
    fn test_status_update_rejects_energy_out_of_range() {
        let params = StatusUpdate {
            current_energy: 0,
            ..StatusUpdate::default()
        };
        match ReplanDelta::try_from(params).unwrap_err() {
            ClutchError::InvalidInput { field, .. } => assert_eq!(field, "energyLevel"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_time_range_parse() {
        let range: TimeRange = "2026-10-19 18:00-22:30".parse().unwrap();
        assert_eq!(range.date, date(2026, 10, 19));
        assert_eq!(range.start, time(18, 0, 0, 0));
        assert_eq!(range.end, time(22, 30, 0, 0));

        let window = range.into_window();
        assert_eq!(window.minutes(), 270);

        let dinner = "2026-10-19 19:00 - 20:00"
            .parse::<TimeRange>()
            .unwrap()
            .into_commitment("Dinner");
        assert_eq!(dinner.label, "Dinner");
        assert_eq!(dinner.end_time, time(20, 0, 0, 0));
    }

    #[test]
    fn test_time_range_parse_errors() {
        assert!("2026-10-19".parse::<TimeRange>().is_err());
        assert!("2026-10-19 18:00".parse::<TimeRange>().is_err());
        assert!("tomorrow 18:00-19:00".parse::<TimeRange>().is_err());
        assert!("2026-10-19 6pm-7pm".parse::<TimeRange>().is_err());
    }
}
