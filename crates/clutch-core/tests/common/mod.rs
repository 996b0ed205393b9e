use clutch_core::{
    config::{ClutchConfig, GeneratorConfig},
    intake::IntakeWizard,
    models::{Constraints, WorkingWindow},
    ReplanController, SessionBuilder,
};
use jiff::civil::{date, time, DateTime};
use serde_json::{json, Value};
use wiremock::MockServer;

/// The moment every test pretends it is.
pub fn now() -> DateTime {
    date(2026, 10, 19).at(17, 0, 0, 0)
}

/// Deadline tomorrow 23:59, one window tonight 18:00-22:00.
pub fn scenario_constraints() -> Constraints {
    let mut wizard = IntakeWizard::default();
    wizard.set_deadline_date(date(2026, 10, 20));
    wizard.advance().expect("deadline step");
    wizard.add_window(WorkingWindow::new(
        date(2026, 10, 19),
        time(18, 0, 0, 0),
        time(22, 0, 0, 0),
    ));
    wizard.advance().expect("availability step");
    wizard.advance().expect("preferences step");
    wizard.set_brain_dump("finish essay, email professor");
    wizard.advance().expect("brain dump step");
    wizard
        .set_outcome(0, "submit essay draft")
        .expect("outcome slot");
    wizard.set_done_enough("intro written");
    wizard.submit(now()).expect("Failed to submit intake")
}

/// A generator-shaped plan with one block per `(start, end, label, type)`.
pub fn plan_json(summary: &str, blocks: &[(&str, &str, &str, &str)]) -> Value {
    let blocks: Vec<Value> = blocks
        .iter()
        .map(|(start, end, label, kind)| {
            json!({"startTime": start, "endTime": end, "label": label, "type": kind})
        })
        .collect();
    json!({
        "summary": summary,
        "topPriorities": [
            {"task": "Essay intro", "reason": "Due first", "estimatedMinutes": 50}
        ],
        "scheduleBlocks": blocks,
        "next60Minutes": [{"step": "Outline three points", "minutes": 10}],
        "twoMinuteStart": "Open the essay file and write one sentence.",
        "ifBehindPlan": ["Skip polishing; submit the intro"],
        "notes": []
    })
}

/// Controller talking to `server` over HTTP.
pub fn create_test_controller(server: &MockServer) -> ReplanController {
    let config = ClutchConfig {
        generator: GeneratorConfig {
            endpoint: format!("{}/clutch", server.uri()),
            timeout_secs: 5,
            api_key_env: None,
            streaming: false,
        },
        ..ClutchConfig::default()
    };
    SessionBuilder::new()
        .with_config(config)
        .build()
        .expect("Failed to create controller")
}
