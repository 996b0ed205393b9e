//! Interactive session: the intake wizard, then a replan and chat loop.
//!
//! ```text
//! ┌──────────────┐  submit   ┌──────────────┐  plan   ┌─────────────────┐
//! │ Intake steps │──────────▶│ start()      │────────▶│ Command loop    │
//! │ back / goto  │           │ retry on err │         │ /status, chat,  │
//! └──────────────┘           └──────────────┘         │ /plan, /reset   │
//!        ▲                                            └────────┬────────┘
//!        └─────────────────────── /reset ──────────────────────┘
//! ```
//!
//! Every intake prompt also accepts `back` and `goto <n>`. End of input
//! quits cleanly at any point.

use std::io::BufRead;

use anyhow::{Context, Result};
use clutch_core::{
    display::AppliedResult,
    models::MAX_OUTCOMES,
    Applied, ClutchError, Constraints, IntakeStep, IntakeWizard,
    OperationStatus, ReplanController, ReplanDelta, StatusUpdate, TimeRange,
};
use jiff::civil::{Date, Time};
use log::debug;

use crate::{
    cli::{now, Cli},
    renderer::TerminalRenderer,
};

const HELP: &str = "\
## Commands

- `/status` - report progress and get a new plan
- `/plan` - show the current plan
- `/constraints` - show what the plan is built on
- `/log` - show the conversation so far
- `/reset` - discard everything and start intake again
- `/quit` - leave
- anything else is sent as a chat message
";

/// Navigation requested from inside an intake prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Back,
    Goto(IntakeStep),
    Eof,
}

enum WindowEntry {
    Add(TimeRange),
    Undo,
    Done,
}

enum Reply<T> {
    Value(T),
    Nav(Nav),
}

/// Unwraps a prompt reply, returning from the step on navigation.
macro_rules! value {
    ($reply:expr) => {
        match $reply {
            Reply::Value(value) => value,
            Reply::Nav(nav) => return Ok(Some(nav)),
        }
    };
}

/// Parse `back` and `goto <n>` (1-based) out of an answer.
fn parse_nav(line: &str) -> Option<Result<Nav, String>> {
    if line.eq_ignore_ascii_case("back") {
        return Some(Ok(Nav::Back));
    }
    let rest = line.strip_prefix("goto ")?;
    let step = rest
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(IntakeStep::from_index)
        .ok_or_else(|| format!("no step '{}', pick 1-{}", rest.trim(), IntakeStep::ALL.len()));
    Some(step.map(Nav::Goto))
}

fn optional<T>(text: &str, parse: impl FnOnce(&str) -> Result<T, String>) -> Result<Option<T>, String> {
    if text.is_empty() {
        Ok(None)
    } else {
        parse(text).map(Some)
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    text.parse().map_err(|e| format!("invalid date '{text}': {e}"))
}

fn parse_time(text: &str) -> Result<Time, String> {
    text.parse().map_err(|e| format!("invalid time '{text}': {e}"))
}

/// Line-oriented prompts over any buffered reader.
struct Prompter<'a, R> {
    renderer: &'a TerminalRenderer,
    input: R,
}

impl<R: BufRead> Prompter<'_, R> {
    /// Read one trimmed line; `None` at end of input.
    fn line(&mut self, label: &str) -> Result<Option<String>> {
        self.renderer.prompt(label)?;
        let mut buffer = String::new();
        let read = self
            .input
            .read_line(&mut buffer)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    fn fail(&self, message: impl Into<String>) -> Result<()> {
        self.renderer.status(&OperationStatus::failure(message))
    }

    /// Ask until `parse` accepts the answer or the user navigates away.
    fn ask<T>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Result<Reply<T>> {
        loop {
            let Some(line) = self.line(label)? else {
                return Ok(Reply::Nav(Nav::Eof));
            };
            match parse_nav(&line) {
                Some(Ok(nav)) => return Ok(Reply::Nav(nav)),
                Some(Err(message)) => self.fail(message)?,
                None => match parse(&line) {
                    Ok(value) => return Ok(Reply::Value(value)),
                    Err(message) => self.fail(message)?,
                },
            }
        }
    }

    fn ask_text(&mut self, label: &str) -> Result<Reply<String>> {
        self.ask(label, |text| Ok(text.to_string()))
    }
}

/// A bracketed hint showing the value a blank answer keeps.
fn keep(current: &str) -> String {
    if current.is_empty() {
        String::new()
    } else {
        format!(" [{current}]")
    }
}

/// Each step collects its fields and returns `None` when the user is done,
/// or the navigation they asked for instead.
type StepOutcome = Result<Option<Nav>>;

fn deadline_step<R: BufRead>(p: &mut Prompter<'_, R>, wizard: &mut IntakeWizard) -> StepOutcome {
    let current = wizard.deadline();
    let hint = current.map(|d| d.date.to_string()).unwrap_or_default();
    let date = value!(p.ask(
        &format!("Deadline date (YYYY-MM-DD){}:", keep(&hint)),
        |text| optional(text, parse_date),
    )?);
    if let Some(date) = date {
        wizard.set_deadline_date(date);
    }

    let time = value!(p.ask("Deadline time (HH:MM, blank for end of day):", |text| {
        optional(text, parse_time)
    })?);
    wizard.set_deadline_time(time);
    Ok(None)
}

fn availability_step<R: BufRead>(
    p: &mut Prompter<'_, R>,
    wizard: &mut IntakeWizard,
) -> StepOutcome {
    for window in wizard.working_windows() {
        p.renderer.render(&format!("- window: {window}\n"))?;
    }
    loop {
        let entry = value!(p.ask(
            "Working window (YYYY-MM-DD HH:MM-HH:MM, `undo`, blank when done):",
            |text| match text {
                "" => Ok(WindowEntry::Done),
                "undo" => Ok(WindowEntry::Undo),
                _ => text
                    .parse::<TimeRange>()
                    .map(WindowEntry::Add)
                    .map_err(|e| e.to_string()),
            },
        )?);
        match entry {
            WindowEntry::Add(range) => {
                wizard.add_window(range.into_window());
            }
            WindowEntry::Undo => {
                let last = wizard.working_windows().len().checked_sub(1);
                if let Some(window) = last.and_then(|index| wizard.remove_window(index)) {
                    p.renderer.render(&format!("Removed {window}\n"))?;
                }
            }
            WindowEntry::Done => break,
        }
    }

    for commitment in wizard.fixed_commitments() {
        p.renderer.render(&format!("- commitment: {commitment}\n"))?;
    }
    loop {
        let entry = value!(p.ask(
            "Fixed commitment (label @ YYYY-MM-DD HH:MM-HH:MM, blank when done):",
            |text| {
                optional(text, |text| {
                    let (label, range) = text
                        .split_once('@')
                        .ok_or_else(|| "expected 'label @ YYYY-MM-DD HH:MM-HH:MM'".to_string())?;
                    let range: TimeRange = range.parse().map_err(|e: ClutchError| e.to_string())?;
                    Ok(range.into_commitment(label.trim()))
                })
            },
        )?);
        let Some(commitment) = entry else { break };
        if let Err(e) = wizard.add_commitment(commitment) {
            p.fail(e.to_string())?;
        }
    }
    Ok(None)
}

fn preferences_step<R: BufRead>(
    p: &mut Prompter<'_, R>,
    wizard: &mut IntakeWizard,
) -> StepOutcome {
    let label = format!("Minimum sleep hours{}:", keep(&wizard.min_sleep_hours().get().to_string()));
    value!(p.ask(&label, |text| {
        match optional(text, |t| t.parse::<f32>().map_err(|e| format!("'{t}': {e}")))? {
            Some(hours) => wizard.set_min_sleep_hours(hours).map_err(|e| e.to_string()),
            None => Ok(()),
        }
    })?);

    let label = format!("Focus method (25/5, 50/10, 90/15){}:", keep(wizard.focus_method().as_str()));
    value!(p.ask(&label, |text| {
        if let Some(method) = optional(text, |t| t.parse().map_err(|e: ClutchError| e.to_string()))? {
            wizard.set_focus_method(method);
        }
        Ok(())
    })?);

    let label = format!("Energy right now (1-10){}:", keep(&wizard.energy_level().get().to_string()));
    value!(p.ask(&label, |text| {
        match optional(text, |t| t.parse::<u8>().map_err(|e| format!("'{t}': {e}")))? {
            Some(level) => wizard.set_energy_level(level).map_err(|e| e.to_string()),
            None => Ok(()),
        }
    })?);
    Ok(None)
}

fn brain_dump_step<R: BufRead>(
    p: &mut Prompter<'_, R>,
    wizard: &mut IntakeWizard,
) -> StepOutcome {
    let hint = if wizard.brain_dump().is_empty() { "" } else { " [keep]" };
    let text = value!(p.ask_text(&format!("Brain dump, everything on your mind{hint}:"))?);
    if !text.is_empty() {
        wizard.set_brain_dump(text);
    }
    Ok(None)
}

fn priorities_step<R: BufRead>(
    p: &mut Prompter<'_, R>,
    wizard: &mut IntakeWizard,
) -> StepOutcome {
    p.renderer
        .render("Up to three outcomes that must happen. `-` clears a slot.\n")?;
    for slot in 0..MAX_OUTCOMES {
        let current = wizard.outcomes().get(slot).cloned().unwrap_or_default();
        let text = value!(p.ask_text(&format!("Outcome {}{}:", slot + 1, keep(&current)))?);
        let update = if text == "-" {
            Some(String::new())
        } else if text.is_empty() {
            None
        } else {
            Some(text)
        };
        if let Some(update) = update {
            wizard.set_outcome(slot, update)?;
        }
    }

    let current = wizard.done_enough().to_string();
    let text = value!(p.ask_text(&format!("Done enough looks like{}:", keep(&current)))?);
    if !text.is_empty() {
        wizard.set_done_enough(text);
    }
    Ok(None)
}

impl Cli {
    /// Run an interactive session until `/quit` or end of input.
    pub async fn run_session(&self, controller: &ReplanController, input: impl BufRead) -> Result<()> {
        let mut prompter = Prompter {
            renderer: &self.renderer,
            input,
        };
        self.renderer.render(
            "# Clutch\n\nAnswer a few questions and you'll get a plan. \
             Type `back` or `goto <step>` at any prompt.\n",
        )?;

        let defaults = controller.config().intake_defaults()?;
        loop {
            let mut wizard = IntakeWizard::new(defaults);
            let Some(constraints) = self.intake(&mut prompter, &mut wizard)? else {
                return Ok(());
            };
            if !self.generate(&mut prompter, controller, constraints).await? {
                return Ok(());
            }
            self.renderer.render(HELP)?;
            if !self.command_loop(&mut prompter, controller).await? {
                return Ok(());
            }
            self.renderer.status(&OperationStatus::success(
                "Session reset. Starting intake again.",
            ))?;
        }
    }

    /// Walk the wizard to a submitted [`Constraints`]; `None` on end of input.
    fn intake<R: BufRead>(
        &self,
        p: &mut Prompter<'_, R>,
        wizard: &mut IntakeWizard,
    ) -> Result<Option<Constraints>> {
        loop {
            let step = wizard.step();
            self.renderer.render(&format!(
                "\n## Step {} of {}: {}\n",
                step.index() + 1,
                IntakeStep::ALL.len(),
                step.title()
            ))?;

            let outcome = match step {
                IntakeStep::Deadline => deadline_step(p, wizard)?,
                IntakeStep::Availability => availability_step(p, wizard)?,
                IntakeStep::Preferences => preferences_step(p, wizard)?,
                IntakeStep::BrainDump => brain_dump_step(p, wizard)?,
                IntakeStep::Priorities => priorities_step(p, wizard)?,
            };

            match outcome {
                None if step.is_last() => match wizard.submit(now()) {
                    Ok(constraints) => return Ok(Some(constraints)),
                    Err(err) => {
                        self.renderer.status(&OperationStatus::from(&err))?;
                        // Send the user to whichever step needs fixing
                        let target = match &err {
                            ClutchError::IncompleteStep { step, .. } => Some(*step),
                            ClutchError::InvalidInput { field, .. } if field == "deadline" => {
                                Some(IntakeStep::Deadline)
                            }
                            _ => None,
                        };
                        if let Some(target) = target {
                            wizard.jump_to(target)?;
                        }
                    }
                },
                None => {
                    if let Err(err) = wizard.advance() {
                        self.renderer.status(&OperationStatus::from(&err))?;
                    }
                }
                Some(Nav::Back) => {
                    wizard.back();
                }
                Some(Nav::Goto(target)) => {
                    if let Err(err) = wizard.jump_to(target) {
                        self.renderer.status(&OperationStatus::from(&err))?;
                    }
                }
                Some(Nav::Eof) => return Ok(None),
            }
        }
    }

    /// Request the first plan, offering a retry on generator failure.
    ///
    /// Returns `false` if the user quit instead.
    async fn generate<R: BufRead>(
        &self,
        p: &mut Prompter<'_, R>,
        controller: &ReplanController,
        constraints: Constraints,
    ) -> Result<bool> {
        loop {
            self.renderer
                .status(&OperationStatus::waiting("Generating your plan..."))?;
            match controller.start(constraints.clone()).await {
                Ok(applied) => {
                    self.print_applied(&applied, Some(&constraints))?;
                    return Ok(true);
                }
                Err(err) if err.is_retryable() => {
                    self.renderer.status(&OperationStatus::from(&err))?;
                    match p.line("Press Enter to retry, or type /quit:")? {
                        Some(line) if line != "/quit" => continue,
                        _ => return Ok(false),
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Handle commands and chat. Returns `true` after `/reset`, `false` on quit.
    async fn command_loop<R: BufRead>(
        &self,
        p: &mut Prompter<'_, R>,
        controller: &ReplanController,
    ) -> Result<bool> {
        loop {
            let Some(line) = p.line(">")? else {
                return Ok(false);
            };
            debug!("session input: {line}");

            let result = match line.as_str() {
                "" => continue,
                "/quit" | "/exit" => return Ok(false),
                "/help" => self.renderer.render(HELP),
                "/reset" => {
                    controller.reset();
                    return Ok(true);
                }
                "/plan" => match controller.plan() {
                    Some(plan) => self.print_plan(&plan, controller.constraints().as_ref()),
                    None => self.renderer.status(&OperationStatus::failure("No plan yet.")),
                },
                "/constraints" => match controller.constraints() {
                    Some(constraints) => self.renderer.render(&constraints.to_string()),
                    None => self.renderer.status(&OperationStatus::failure("No constraints yet.")),
                },
                "/log" => self
                    .renderer
                    .render(&controller.conversation_log().to_string()),
                "/status" => match self.status_update(p)? {
                    Some(delta) => self.apply(controller.submit_status_update(delta).await, controller),
                    None => return Ok(false),
                },
                text => self.apply(controller.submit_chat_message(text).await, controller),
            };
            result?;
        }
    }

    /// Ask for a status update; `None` on end of input.
    fn status_update<R: BufRead>(&self, p: &mut Prompter<'_, R>) -> Result<Option<ReplanDelta>> {
        let Some(completed_tasks) = p.line("Completed since the last plan:")? else {
            return Ok(None);
        };
        let Some(remaining_time) = p.line("Time remaining:")? else {
            return Ok(None);
        };
        loop {
            let Some(energy) = p.line("Energy right now (1-10):")? else {
                return Ok(None);
            };
            let update = energy.parse::<u8>().map(|current_energy| StatusUpdate {
                completed_tasks: completed_tasks.clone(),
                remaining_time: remaining_time.clone(),
                current_energy,
            });
            match update.map_err(|e| e.to_string()).and_then(|update| {
                ReplanDelta::try_from(update).map_err(|e| e.to_string())
            }) {
                Ok(delta) => return Ok(Some(delta)),
                Err(message) => p.fail(message)?,
            }
        }
    }

    /// Print a controller result; domain errors become status lines.
    fn apply(
        &self,
        result: clutch_core::Result<Applied>,
        controller: &ReplanController,
    ) -> Result<()> {
        match result {
            Ok(applied @ Applied::PlanReplaced(_)) => {
                self.renderer.render("Plan updated.\n\n")?;
                self.print_applied(&applied, controller.constraints().as_ref())
            }
            Ok(applied) => self.renderer.render(&AppliedResult(&applied).to_string()),
            Err(err) => self.renderer.status(&OperationStatus::from(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nav() {
        assert_eq!(parse_nav("back"), Some(Ok(Nav::Back)));
        assert_eq!(parse_nav("BACK"), Some(Ok(Nav::Back)));
        assert_eq!(
            parse_nav("goto 3"),
            Some(Ok(Nav::Goto(IntakeStep::Preferences)))
        );
        assert!(matches!(parse_nav("goto 0"), Some(Err(_))));
        assert!(matches!(parse_nav("goto 6"), Some(Err(_))));
        assert_eq!(parse_nav("2026-10-20"), None);
        assert_eq!(parse_nav("go back to sleep"), None);
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional("", parse_date), Ok(None));
        assert!(optional("someday", parse_date).is_err());
        assert_eq!(
            optional("09:30", parse_time),
            Ok(Some(jiff::civil::time(9, 30, 0, 0)))
        );
    }

    #[test]
    fn test_ask_reprompts_until_valid() {
        let renderer = TerminalRenderer::new(false);
        let mut prompter = Prompter {
            renderer: &renderer,
            input: "nope\n2026-10-20\n".as_bytes(),
        };
        match prompter.ask("date:", parse_date).unwrap() {
            Reply::Value(date) => assert_eq!(date, jiff::civil::date(2026, 10, 20)),
            Reply::Nav(nav) => panic!("unexpected navigation {nav:?}"),
        }
    }

    #[test]
    fn test_ask_reports_end_of_input() {
        let renderer = TerminalRenderer::new(false);
        let mut prompter = Prompter {
            renderer: &renderer,
            input: "".as_bytes(),
        };
        assert!(matches!(
            prompter.ask_text("anything:").unwrap(),
            Reply::Nav(Nav::Eof)
        ));
    }

    #[test]
    fn test_intake_walks_to_constraints() {
        let cli = Cli::new(TerminalRenderer::new(false), false);
        let script = "\
2099-01-15

2099-01-14 18:00-22:00

Dinner @ 2099-01-14 19:00-19:30


50/10
6
finish essay, email professor
submit essay draft


intro written
";
        let mut prompter = Prompter {
            renderer: &cli.renderer,
            input: script.as_bytes(),
        };
        let mut wizard = IntakeWizard::default();
        let constraints = cli.intake(&mut prompter, &mut wizard).unwrap().unwrap();

        assert_eq!(constraints.deadline.date, jiff::civil::date(2099, 1, 15));
        assert_eq!(constraints.working_windows.len(), 1);
        assert_eq!(constraints.fixed_commitments[0].label, "Dinner");
        assert_eq!(constraints.energy_level.get(), 6);
        assert_eq!(constraints.top_outcomes, vec!["submit essay draft".to_string()]);
        assert_eq!(constraints.done_enough, "intro written");
    }

    #[test]
    fn test_intake_back_returns_to_previous_step() {
        let cli = Cli::new(TerminalRenderer::new(false), false);
        // Deadline, then `back` from availability, then the deadline again
        let script = "2099-01-15\n\nback\n2099-01-16\n\n";
        let mut prompter = Prompter {
            renderer: &cli.renderer,
            input: script.as_bytes(),
        };
        let mut wizard = IntakeWizard::default();

        // Input runs out on the availability step
        assert!(cli.intake(&mut prompter, &mut wizard).unwrap().is_none());
        assert_eq!(wizard.step(), IntakeStep::Availability);
        assert_eq!(wizard.deadline().unwrap().date, jiff::civil::date(2099, 1, 16));
    }
}
