//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the models stay plain data.
//! Output is markdown, rendered by the CLI's terminal renderer.

use std::fmt;

use super::{
    datetime::{ClockTime, DayHeading, Minutes},
    schedule::present,
};
use crate::models::{
    Constraints, ConversationLog, ConversationMessage, Deadline, FixedCommitment, Plan, Priority,
    Role, WorkingWindow,
};

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", present(self))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}** ({}): {}",
            self.task,
            Minutes(i64::from(self.estimated_minutes)),
            self.reason
        )
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", DayHeading(self.date), ClockTime(self.time))
    }
}

impl fmt::Display for WorkingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            DayHeading(self.date),
            ClockTime(self.start_time),
            ClockTime(self.end_time)
        )
    }
}

impl fmt::Display for FixedCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}-{}",
            self.label,
            DayHeading(self.date),
            ClockTime(self.start_time),
            ClockTime(self.end_time)
        )
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Constraints")?;
        writeln!(f)?;
        writeln!(f, "- **Deadline**: {}", self.deadline)?;
        writeln!(f, "- **Focus method**: {}", self.focus_method)?;
        writeln!(f, "- **Energy**: {}", self.energy_level)?;
        writeln!(f, "- **Minimum sleep**: {}", self.min_sleep_hours)?;

        writeln!(f, "\n## Working windows")?;
        writeln!(f)?;
        for window in &self.working_windows {
            writeln!(f, "- {window} ({})", Minutes(window.minutes()))?;
        }

        writeln!(f, "\n## Fixed commitments")?;
        writeln!(f)?;
        if self.fixed_commitments.is_empty() {
            writeln!(f, "None.")?;
        } else {
            for commitment in &self.fixed_commitments {
                writeln!(f, "- {commitment}")?;
            }
        }

        writeln!(f, "\n## Brain dump")?;
        writeln!(f)?;
        writeln!(f, "{}", self.brain_dump.trim())?;

        writeln!(f, "\n## Must happen")?;
        writeln!(f)?;
        for (i, outcome) in self.top_outcomes.iter().enumerate() {
            writeln!(f, "{}. {outcome}", i + 1)?;
        }

        writeln!(f, "\n## Done enough")?;
        writeln!(f)?;
        writeln!(f, "{}", self.done_enough.trim())
    }
}

impl fmt::Display for ConversationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.role {
            Role::User => "You",
            Role::Assistant => "Clutch",
        };
        write!(f, "**{speaker}**: {}", self.content)?;
        if self.updated_plan.is_some() {
            write!(f, " _(plan updated)_")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ConversationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No messages yet.");
        }
        for message in self {
            write!(f, "{message}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;
    use crate::models::{EnergyLevel, FocusMethod, SleepHours};

    fn constraints() -> Constraints {
        Constraints {
            deadline: Deadline {
                date: date(2026, 10, 20),
                time: time(9, 0, 0, 0),
            },
            working_windows: vec![WorkingWindow::new(
                date(2026, 10, 19),
                time(18, 0, 0, 0),
                time(22, 0, 0, 0),
            )],
            fixed_commitments: vec![],
            min_sleep_hours: SleepHours::new(7.5).unwrap(),
            focus_method: FocusMethod::Deep90,
            energy_level: EnergyLevel::new(4).unwrap(),
            brain_dump: "essay, slides\n".to_string(),
            top_outcomes: vec!["submit essay".to_string(), "send slides".to_string()],
            done_enough: "essay submitted".to_string(),
        }
    }

    #[test]
    fn test_constraints_display() {
        let output = constraints().to_string();
        assert!(output.starts_with("# Constraints\n"));
        assert!(output.contains("- **Deadline**: Tuesday 2026-10-20 09:00"));
        assert!(output.contains("- **Focus method**: 90/15"));
        assert!(output.contains("- **Energy**: 4/10"));
        assert!(output.contains("- Monday 2026-10-19 18:00-22:00 (240 min)"));
        assert!(output.contains("## Fixed commitments\n\nNone."));
        assert!(output.contains("1. submit essay\n2. send slides"));
    }

    #[test]
    fn test_commitment_display() {
        let dinner = FixedCommitment::new(
            "Dinner",
            date(2026, 10, 19),
            time(19, 0, 0, 0),
            time(20, 0, 0, 0),
        );
        assert_eq!(dinner.to_string(), "Dinner: Monday 2026-10-19 19:00-20:00");
    }

    #[test]
    fn test_conversation_log_display() {
        let mut log = ConversationLog::new();
        assert_eq!(log.to_string(), "No messages yet.\n");

        log.push_user("push the essay to after dinner");
        let plan = Plan {
            summary: "Moved.".to_string(),
            top_priorities: vec![],
            schedule_blocks: vec![],
            next_60_minutes: vec![],
            two_minute_start: String::new(),
            if_behind_plan: vec![],
            notes: vec![],
        };
        log.push_assistant("Done, essay starts at 20:00.", Some(plan));

        let output = log.to_string();
        assert!(output.contains("**You**: push the essay to after dinner\n"));
        assert!(output.contains("**Clutch**: Done, essay starts at 20:00. _(plan updated)_"));
    }
}
