//! Bounded value types used by the constraint model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ClutchError, Result};

/// Self-reported energy on a 1-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EnergyLevel(u8);

impl EnergyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validate and wrap an energy reading.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClutchError::invalid_input("energyLevel").with_reason(format!(
                "must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for EnergyLevel {
    type Error = ClutchError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EnergyLevel> for u8 {
    fn from(level: EnergyLevel) -> Self {
        level.0
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Minimum nightly sleep, in half-hour steps between 3 and 10 hours.
///
/// Passed through to the generator as a soft constraint; nothing in this
/// crate enforces it against the schedule.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct SleepHours(f32);

impl SleepHours {
    pub const MIN: f32 = 3.0;
    pub const MAX: f32 = 10.0;

    pub fn new(hours: f32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&hours) {
            return Err(ClutchError::invalid_input("minSleepHours").with_reason(format!(
                "must be between {} and {} hours, got {hours}",
                Self::MIN,
                Self::MAX
            )));
        }
        if (hours * 2.0).fract() != 0.0 {
            return Err(ClutchError::invalid_input("minSleepHours")
                .with_reason(format!("must be a multiple of 0.5, got {hours}")));
        }
        Ok(Self(hours))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SleepHours {
    fn default() -> Self {
        Self(7.0)
    }
}

impl TryFrom<f32> for SleepHours {
    type Error = ClutchError;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SleepHours> for f32 {
    fn from(hours: SleepHours) -> Self {
        hours.0
    }
}

impl fmt::Display for SleepHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.0)
    }
}

/// Work/break cadence the user prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FocusMethod {
    /// 25 minutes of work, 5 minutes of break
    #[serde(rename = "25/5")]
    Pomodoro25,

    /// 50 minutes of work, 10 minutes of break
    #[default]
    #[serde(rename = "50/10")]
    Standard50,

    /// 90 minutes of work, 15 minutes of break
    #[serde(rename = "90/15")]
    Deep90,
}

impl FocusMethod {
    pub const ALL: [FocusMethod; 3] = [
        FocusMethod::Pomodoro25,
        FocusMethod::Standard50,
        FocusMethod::Deep90,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusMethod::Pomodoro25 => "25/5",
            FocusMethod::Standard50 => "50/10",
            FocusMethod::Deep90 => "90/15",
        }
    }

    pub fn work_minutes(&self) -> u32 {
        match self {
            FocusMethod::Pomodoro25 => 25,
            FocusMethod::Standard50 => 50,
            FocusMethod::Deep90 => 90,
        }
    }

    pub fn break_minutes(&self) -> u32 {
        match self {
            FocusMethod::Pomodoro25 => 5,
            FocusMethod::Standard50 => 10,
            FocusMethod::Deep90 => 15,
        }
    }
}

impl FromStr for FocusMethod {
    type Err = ClutchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim())
            .ok_or_else(|| {
                ClutchError::invalid_input("focusMethod")
                    .with_reason(format!("expected one of 25/5, 50/10, 90/15, got '{s}'"))
            })
    }
}

impl fmt::Display for FocusMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
