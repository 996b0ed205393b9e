mod common;

use clutch_core::{
    display::{present, review, PlanWarning},
    models::Role,
    Applied, ClutchError, ReplanDelta, SessionState, StatusUpdate,
};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{create_test_controller, now, plan_json, scenario_constraints};

async fn mount(server: &MockServer, mode: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/clutch"))
        .and(body_partial_json(json!({ "mode": mode })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn evening_plan() -> serde_json::Value {
    plan_json(
        "Essay tonight, email in the morning.",
        &[
            ("2026-10-19T18:00:00", "2026-10-19T18:50:00", "Draft intro", "work"),
            ("2026-10-19T18:50:00", "2026-10-19T19:00:00", "Stretch", "break"),
            ("2026-10-19T19:00:00", "2026-10-19T19:50:00", "Body paragraphs", "work"),
            ("2026-10-20T09:00:00", "2026-10-20T09:15:00", "Email professor", "admin"),
        ],
    )
}

#[tokio::test]
async fn test_initial_plan_falls_within_deadline() {
    let server = MockServer::start().await;
    mount(&server, "initial", json!({ "plan": evening_plan() })).await;

    let controller = create_test_controller(&server);
    let constraints = scenario_constraints();
    let applied = controller.start(constraints.clone()).await.unwrap();

    let plan = applied.plan().unwrap();
    let warnings = review(plan, &constraints, now());
    assert!(
        !warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::BeforeNow { .. } | PlanWarning::AfterDeadline { .. })),
        "unexpected warnings: {warnings:?}"
    );

    let view = present(plan);
    assert_eq!(view.days.len(), 2);
    assert_eq!(view.days[0].blocks.len(), 3);
    assert_eq!(view.days[1].blocks[0].duration_minutes, 15);
}

#[tokio::test]
async fn test_status_update_replaces_plan_wholesale() {
    let server = MockServer::start().await;
    mount(
        &server,
        "initial",
        json!({ "plan": plan_json("Start.", &[("2026-10-20T09:00:00", "2026-10-20T10:00:00", "Draft intro", "work")]) }),
    )
    .await;
    mount(
        &server,
        "replan",
        json!({ "plan": plan_json("Revised.", &[("2026-10-20T10:00:00", "2026-10-20T11:30:00", "Body", "work")]) }),
    )
    .await;

    let controller = create_test_controller(&server);
    controller.start(scenario_constraints()).await.unwrap();

    let delta = ReplanDelta::try_from(StatusUpdate {
        completed_tasks: "intro done".to_string(),
        remaining_time: "2 hours".to_string(),
        current_energy: 7,
    })
    .unwrap();
    controller.submit_status_update(delta).await.unwrap();

    let plan = controller.plan().unwrap();
    assert_eq!(plan.summary, "Revised.");
    assert_eq!(plan.schedule_blocks.len(), 1);
    assert_eq!(plan.schedule_blocks[0].label, "Body");

    // The generator saw the delta alongside the previous plan
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["delta"]["completedTasks"], "intro done");
    assert_eq!(body["delta"]["currentEnergy"], 7);
    assert_eq!(body["plan"]["summary"], "Start.");
    assert_eq!(body["constraints"]["brainDump"], "finish essay, email professor");
}

#[tokio::test]
async fn test_chat_without_plan_keeps_current_plan() {
    let server = MockServer::start().await;
    mount(&server, "initial", json!({ "plan": evening_plan() })).await;
    mount(&server, "chat", json!({ "message": "Done." })).await;

    let controller = create_test_controller(&server);
    controller.start(scenario_constraints()).await.unwrap();
    let before = controller.plan();

    let applied = controller
        .submit_chat_message("move my study block later")
        .await
        .unwrap();

    assert_eq!(
        applied,
        Applied::Replied {
            message: "Done.".to_string(),
            plan_changed: false
        }
    );
    assert_eq!(controller.plan(), before);
    let log = controller.conversation();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].role, Role::Assistant);
    assert_eq!(log[1].content, "Done.");
}

#[tokio::test]
async fn test_generator_error_keeps_state_and_allows_retry() {
    let server = MockServer::start().await;
    mount(&server, "initial", json!({ "plan": evening_plan() })).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "mode": "replan" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let controller = create_test_controller(&server);
    controller.start(scenario_constraints()).await.unwrap();
    let before = controller.plan();

    let delta = ReplanDelta::try_from(StatusUpdate {
        completed_tasks: "nothing yet".to_string(),
        remaining_time: "3 hours".to_string(),
        current_energy: 2,
    })
    .unwrap();
    let err = controller.submit_status_update(delta).await.unwrap_err();

    assert!(matches!(err, ClutchError::Generator(_)));
    assert!(err.to_string().contains("500"));
    assert_eq!(controller.plan(), before);
    assert_eq!(controller.state(), SessionState::HasPlan);
}

#[tokio::test]
async fn test_malformed_success_is_failure() {
    let server = MockServer::start().await;
    mount(&server, "initial", json!({ "summary": "no envelope" })).await;

    let controller = create_test_controller(&server);
    let err = controller.start(scenario_constraints()).await.unwrap_err();
    assert!(matches!(err, ClutchError::Generator(_)));
    assert!(controller.plan().is_none());
    assert_eq!(controller.state(), SessionState::NoPlan);
}

#[tokio::test]
async fn test_reset_after_full_session() {
    let server = MockServer::start().await;
    mount(&server, "initial", json!({ "plan": evening_plan() })).await;
    mount(
        &server,
        "chat",
        json!({ "message": "Moved it.", "updatedPlan": evening_plan() }),
    )
    .await;

    let controller = create_test_controller(&server);
    controller.start(scenario_constraints()).await.unwrap();
    controller
        .submit_chat_message("push the essay back 30 minutes")
        .await
        .unwrap();
    assert_eq!(controller.conversation().len(), 2);

    controller.reset();

    assert!(controller.plan().is_none());
    assert!(controller.constraints().is_none());
    assert!(controller.conversation().is_empty());
    assert_eq!(controller.state(), SessionState::NoPlan);
}
