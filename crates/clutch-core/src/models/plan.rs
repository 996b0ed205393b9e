//! Plan model: the structured schedule returned by the plan generator.

use std::{fmt, str::FromStr};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Kind of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Work,
    Break,
    Admin,
    Buffer,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Work => "work",
            BlockType::Break => "break",
            BlockType::Admin => "admin",
            BlockType::Buffer => "buffer",
        }
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(BlockType::Work),
            "break" => Ok(BlockType::Break),
            "admin" => Ok(BlockType::Admin),
            "buffer" => Ok(BlockType::Buffer),
            _ => Err(format!("Invalid block type: {s}")),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ranked task in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub task: String,
    pub reason: String,
    pub estimated_minutes: u32,
}

/// One typed, time-boxed entry in the plan's timeline.
///
/// `start_time < end_time` is expected but not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    #[serde(with = "flexible_datetime")]
    pub start_time: DateTime,
    #[serde(with = "flexible_datetime")]
    pub end_time: DateTime,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
}

impl ScheduleBlock {
    pub fn new(start_time: DateTime, end_time: DateTime, label: impl Into<String>, kind: BlockType) -> Self {
        Self {
            start_time,
            end_time,
            label: label.into(),
            kind,
        }
    }
}

/// A literal step in the first-hour checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterStep {
    pub step: String,
    pub minutes: u32,
}

/// The current plan. Replaced wholesale on every successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub summary: String,

    #[serde(default)]
    pub top_priorities: Vec<Priority>,

    pub schedule_blocks: Vec<ScheduleBlock>,

    #[serde(rename = "next60Minutes", default)]
    pub next_60_minutes: Vec<StarterStep>,

    #[serde(default)]
    pub two_minute_start: String,

    #[serde(default)]
    pub if_behind_plan: Vec<String>,

    #[serde(default)]
    pub notes: Vec<String>,
}

impl Plan {
    /// Total minutes across all ranked priorities.
    pub fn estimated_minutes(&self) -> u32 {
        self.top_priorities.iter().map(|p| p.estimated_minutes).sum()
    }
}

/// Accepts zone-less ISO datetimes as well as ones carrying `Z` or an offset.
///
/// The written wall-clock date and time are kept for every form and the
/// zone is dropped, so grouping by date never depends on the host time zone.
mod flexible_datetime {
    use jiff::civil::DateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Civil parsing ignores a numeric offset but rejects the `Z` designator
        let written = raw.trim().trim_end_matches(|c| c == 'Z' || c == 'z');
        written
            .parse::<DateTime>()
            .map_err(|e| de::Error::custom(format!("invalid datetime '{raw}': {e}")))
    }
}
