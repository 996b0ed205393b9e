//! Collection wrapper types for displaying plan sections.
//!
//! Each wrapper borrows a slice from the plan and handles the empty case
//! itself, so callers never special-case missing sections.

use std::{fmt, ops::Index};

use super::datetime::Minutes;
use crate::models::{Priority, StarterStep};

/// Newtype wrapper for the "if behind plan" contingency rules.
///
/// An empty list renders a single placeholder line rather than nothing, so
/// the absence of contingencies is visible.
///
/// # Examples
///
/// ```rust
/// use clutch_core::display::IfBehind;
///
/// let rules = vec!["Skip the polish pass".to_string()];
/// assert_eq!(IfBehind(&rules).to_string(), "- Skip the polish pass\n");
/// assert_eq!(IfBehind(&[]).to_string(), "No contingency rules.\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IfBehind<'a>(pub &'a [String]);

impl<'a> IfBehind<'a> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, String> {
        self.0.iter()
    }
}

impl Index<usize> for IfBehind<'_> {
    type Output = String;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for IfBehind<'a> {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for IfBehind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No contingency rules.");
        }
        for rule in self.0 {
            writeln!(f, "- {rule}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for the ranked priorities, as a numbered list.
#[derive(Debug, Clone, Copy)]
pub struct Priorities<'a>(pub &'a [Priority]);

impl fmt::Display for Priorities<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No priorities listed.");
        }
        for (rank, priority) in self.0.iter().enumerate() {
            writeln!(f, "{}. {priority}", rank + 1)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for the first-hour checklist.
#[derive(Debug, Clone, Copy)]
pub struct FirstHour<'a>(pub &'a [StarterStep]);

impl FirstHour<'_> {
    /// Minutes across all steps.
    pub fn total_minutes(&self) -> u32 {
        self.0.iter().map(|s| s.minutes).sum()
    }
}

impl fmt::Display for FirstHour<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No starter steps.");
        }
        for step in self.0 {
            writeln!(f, "- [ ] {} ({})", step.step, Minutes(i64::from(step.minutes)))?;
        }
        Ok(())
    }
}
