//! Grouping a plan's timeline by day.

use std::fmt;

use jiff::civil::Date;

use super::{
    collections::{FirstHour, IfBehind, Priorities},
    datetime::{ClockTime, DayHeading, Minutes},
};
use crate::models::{Plan, ScheduleBlock};

/// Minutes from a block's start to its end.
///
/// Signed and unclamped: a block that ends before it starts yields a negative
/// value instead of being hidden.
pub fn block_duration_minutes(block: &ScheduleBlock) -> i64 {
    block.start_time.duration_until(block.end_time).as_secs() / 60
}

/// A schedule block with its computed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView<'a> {
    pub block: &'a ScheduleBlock,
    pub duration_minutes: i64,
}

impl<'a> BlockView<'a> {
    pub fn new(block: &'a ScheduleBlock) -> Self {
        Self {
            block,
            duration_minutes: block_duration_minutes(block),
        }
    }
}

impl fmt::Display for BlockView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}-{} **{}** ({}, {})",
            ClockTime::from(self.block.start_time),
            ClockTime::from(self.block.end_time),
            self.block.label,
            self.block.kind,
            Minutes(self.duration_minutes)
        )
    }
}

/// All blocks that start on one calendar date, in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub date: Date,
    pub blocks: Vec<BlockView<'a>>,
}

impl DayGroup<'_> {
    /// Sum of the block durations for the day, as computed.
    pub fn total_minutes(&self) -> i64 {
        self.blocks.iter().map(|b| b.duration_minutes).sum()
    }
}

impl fmt::Display for DayGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", DayHeading(self.date))?;
        writeln!(f)?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        writeln!(f)
    }
}

/// A plan ready for display: its timeline grouped by day.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView<'a> {
    pub plan: &'a Plan,
    pub days: Vec<DayGroup<'a>>,
}

impl<'a> PlanView<'a> {
    /// Blocks in presentation order: day groups concatenated.
    pub fn flatten(&self) -> Vec<&'a ScheduleBlock> {
        self.days
            .iter()
            .flat_map(|day| day.blocks.iter().map(|view| view.block))
            .collect()
    }

    pub fn block_count(&self) -> usize {
        self.days.iter().map(|day| day.blocks.len()).sum()
    }
}

/// Group `plan`'s schedule blocks by the date of their start time.
///
/// Days are ordered by first appearance in the original sequence, not sorted.
/// Within a day the original relative order is kept.
pub fn present(plan: &Plan) -> PlanView<'_> {
    let mut days: Vec<DayGroup<'_>> = Vec::new();
    for block in &plan.schedule_blocks {
        let date = block.start_time.date();
        let view = BlockView::new(block);
        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.blocks.push(view),
            None => days.push(DayGroup {
                date,
                blocks: vec![view],
            }),
        }
    }
    PlanView { plan, days }
}

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;

        writeln!(f, "# Plan")?;
        writeln!(f)?;
        writeln!(f, "{}", plan.summary)?;

        if !plan.top_priorities.is_empty() {
            writeln!(f, "\n## Top priorities")?;
            writeln!(f)?;
            write!(f, "{}", Priorities(&plan.top_priorities))?;
        }

        writeln!(f, "\n## Schedule")?;
        writeln!(f)?;
        if self.days.is_empty() {
            writeln!(f, "No schedule blocks.")?;
            writeln!(f)?;
        } else {
            for day in &self.days {
                write!(f, "{day}")?;
            }
        }

        if !plan.next_60_minutes.is_empty() {
            writeln!(f, "## Next 60 minutes")?;
            writeln!(f)?;
            write!(f, "{}", FirstHour(&plan.next_60_minutes))?;
            writeln!(f)?;
        }

        if !plan.two_minute_start.trim().is_empty() {
            writeln!(f, "## Two-minute start")?;
            writeln!(f)?;
            writeln!(f, "{}", plan.two_minute_start)?;
            writeln!(f)?;
        }

        writeln!(f, "## If behind")?;
        writeln!(f)?;
        write!(f, "{}", IfBehind(&plan.if_behind_plan))?;

        if !plan.notes.is_empty() {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            for note in &plan.notes {
                writeln!(f, "- {note}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, Date};

    use super::*;
    use crate::models::{BlockType, Priority, StarterStep};

    fn block(day: Date, start: (i8, i8), end: (i8, i8), label: &str) -> ScheduleBlock {
        ScheduleBlock::new(
            day.at(start.0, start.1, 0, 0),
            day.at(end.0, end.1, 0, 0),
            label,
            BlockType::Work,
        )
    }

    fn plan_with(blocks: Vec<ScheduleBlock>) -> Plan {
        Plan {
            summary: "Tonight's plan.".to_string(),
            top_priorities: vec![],
            schedule_blocks: blocks,
            next_60_minutes: vec![],
            two_minute_start: String::new(),
            if_behind_plan: vec![],
            notes: vec![],
        }
    }

    #[test]
    fn test_single_day_durations() {
        let day = date(2026, 10, 19);
        let plan = plan_with(vec![
            block(day, (18, 0), (18, 50), "Draft intro"),
            block(day, (18, 50), (19, 0), "Break"),
        ]);

        let view = present(&plan);
        assert_eq!(view.days.len(), 1);
        assert_eq!(view.days[0].date, day);
        let durations: Vec<i64> = view.days[0].blocks.iter().map(|b| b.duration_minutes).collect();
        assert_eq!(durations, vec![50, 10]);
        assert_eq!(view.days[0].total_minutes(), 60);
    }

    #[test]
    fn test_groups_follow_first_appearance_not_chronology() {
        let monday = date(2026, 10, 19);
        let tuesday = date(2026, 10, 20);
        // Tuesday appears first even though Monday is earlier
        let plan = plan_with(vec![
            block(tuesday, (9, 0), (10, 0), "a"),
            block(monday, (20, 0), (21, 0), "b"),
            block(tuesday, (8, 0), (8, 30), "c"),
            block(monday, (19, 0), (19, 30), "d"),
        ]);

        let view = present(&plan);
        let dates: Vec<Date> = view.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![tuesday, monday]);

        // Relative order inside a day is kept, not re-sorted by time
        let labels: Vec<&str> = view.flatten().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_flatten_is_stable_partition_of_input() {
        let days = [date(2026, 10, 19), date(2026, 10, 20), date(2026, 10, 21)];
        let blocks: Vec<ScheduleBlock> = (0..9)
            .map(|i| block(days[(i * 7) % 3], (8 + i as i8, 0), (8 + i as i8, 30), &format!("b{i}")))
            .collect();
        let plan = plan_with(blocks);
        let view = present(&plan);

        let mut expected: Vec<&ScheduleBlock> = Vec::new();
        for day in view.days.iter().map(|d| d.date) {
            expected.extend(plan.schedule_blocks.iter().filter(|b| b.start_time.date() == day));
        }
        assert_eq!(view.flatten(), expected);
        assert_eq!(view.block_count(), plan.schedule_blocks.len());
    }

    #[test]
    fn test_negative_and_zero_durations_are_shown() {
        let day = date(2026, 10, 19);
        let plan = plan_with(vec![
            block(day, (19, 0), (18, 45), "Backwards"),
            block(day, (20, 0), (20, 0), "Instant"),
        ]);

        let view = present(&plan);
        assert_eq!(view.days[0].blocks[0].duration_minutes, -15);
        assert_eq!(view.days[0].blocks[1].duration_minutes, 0);

        let output = view.to_string();
        assert!(output.contains("-15 min"));
        assert!(output.contains("0 min"));
    }

    #[test]
    fn test_block_crossing_midnight_groups_by_start_date() {
        let monday = date(2026, 10, 19);
        let late = ScheduleBlock::new(
            monday.at(23, 30, 0, 0),
            date(2026, 10, 20).at(0, 15, 0, 0),
            "Late push",
            BlockType::Work,
        );
        let plan = plan_with(vec![late]);
        let view = present(&plan);
        assert_eq!(view.days[0].date, monday);
        assert_eq!(view.days[0].blocks[0].duration_minutes, 45);
    }

    #[test]
    fn test_empty_schedule() {
        let plan = plan_with(vec![]);
        let view = present(&plan);
        assert!(view.days.is_empty());
        assert!(view.flatten().is_empty());
        assert!(view.to_string().contains("No schedule blocks."));
    }

    #[test]
    fn test_plan_view_markdown() {
        let day = date(2026, 10, 19);
        let mut plan = plan_with(vec![block(day, (18, 0), (18, 50), "Draft intro")]);
        plan.top_priorities = vec![Priority {
            task: "Essay intro".to_string(),
            reason: "Due first".to_string(),
            estimated_minutes: 50,
        }];
        plan.next_60_minutes = vec![StarterStep {
            step: "Outline three points".to_string(),
            minutes: 10,
        }];
        plan.two_minute_start = "Open the essay file.".to_string();
        plan.if_behind_plan = vec!["Drop the conclusion polish".to_string()];
        plan.notes = vec!["Phone in another room".to_string()];

        let output = present(&plan).to_string();
        assert!(output.starts_with("# Plan\n\nTonight's plan.\n"));
        assert!(output.contains("## Top priorities"));
        assert!(output.contains("1. **Essay intro** (50 min): Due first"));
        assert!(output.contains("### Monday 2026-10-19"));
        assert!(output.contains("- 18:00-18:50 **Draft intro** (work, 50 min)"));
        assert!(output.contains("- [ ] Outline three points (10 min)"));
        assert!(output.contains("## Two-minute start\n\nOpen the essay file."));
        assert!(output.contains("- Drop the conclusion polish"));
        assert!(output.contains("## Notes"));
        assert!(!output.contains("No contingency rules."));
    }

    #[test]
    fn test_plan_display_matches_view() {
        let day = date(2026, 10, 19);
        let plan = plan_with(vec![block(day, (18, 0), (18, 50), "Draft intro")]);
        assert_eq!(plan.to_string(), present(&plan).to_string());
    }
}
