//! Result wrapper types for displaying controller outcomes.

use std::fmt;

use crate::controller::Applied;

/// Wrapper type for displaying what a replan request did.
///
/// - A replaced plan prints a confirmation followed by the full plan
/// - A chat reply prints the assistant's message, noting a changed schedule
/// - A discarded response prints nothing
///
/// # Examples
///
/// ```rust
/// use clutch_core::{controller::Applied, display::AppliedResult};
///
/// let reply = Applied::Replied {
///     message: "Moved the essay after dinner.".to_string(),
///     plan_changed: true,
/// };
/// let output = AppliedResult(&reply).to_string();
/// assert!(output.contains("Moved the essay after dinner."));
/// assert!(output.contains("Schedule updated"));
///
/// assert_eq!(AppliedResult(&Applied::Discarded).to_string(), "");
/// ```
pub struct AppliedResult<'a>(pub &'a Applied);

impl fmt::Display for AppliedResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Applied::PlanReplaced(plan) => {
                writeln!(f, "Plan updated.")?;
                writeln!(f)?;
                write!(f, "{plan}")
            }
            Applied::Replied {
                message,
                plan_changed,
            } => {
                writeln!(f, "{message}")?;
                if *plan_changed {
                    writeln!(f)?;
                    writeln!(f, "_Schedule updated. Use /plan to see it._")?;
                }
                Ok(())
            }
            Applied::Discarded => Ok(()),
        }
    }
}
