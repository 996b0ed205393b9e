//! Date, time and duration display utilities.
//!
//! All values are civil (zone-less) and shown exactly as stored.

use std::fmt;

use jiff::civil::{Date, DateTime, Time};

/// Formats a time of day as `HH:MM`.
#[derive(Debug, Clone, Copy)]
pub struct ClockTime(pub Time);

impl From<DateTime> for ClockTime {
    fn from(datetime: DateTime) -> Self {
        Self(datetime.time())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%H:%M"))
    }
}

/// Formats a calendar date as `Weekday YYYY-MM-DD`.
#[derive(Debug, Clone, Copy)]
pub struct DayHeading(pub Date);

impl fmt::Display for DayHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%A %Y-%m-%d"))
    }
}

/// A signed minute count, shown unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(pub i64);

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
