//! Plan generator client: the boundary to the service that writes plans.
//!
//! The generator is a black box reached through one operation,
//! [`PlanGenerator::generate`]. Everything that turns free text and time
//! windows into a schedule happens behind this trait, so a deterministic
//! solver could replace the remote service without touching the intake
//! wizard, the presenter, or the replan controller.
//!
//! # Contract
//!
//! - One request in, one outcome out. No retries, no caching, no idempotency
//!   key; two identical requests may produce different plans.
//! - `Initial` and `Replan` requests must answer with a plan. A success
//!   without one is a [`GeneratorFailure`], never an empty plan.
//! - `Chat` requests answer with a message and, optionally, a new plan.
//! - Every failure is opaque and handled identically by callers.
//!
//! # Implementations
//!
//! - [`HttpPlanGenerator`]: JSON over HTTP, optionally as a chunked text
//!   stream terminated by [`END_OF_STREAM`].
//! - [`testing::ScriptedGenerator`]: canned outcomes for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod http;
pub mod stream;
pub mod testing;
pub mod wire;

pub use http::HttpPlanGenerator;
pub use stream::{StreamAssembler, END_OF_STREAM};

pub use crate::error::GeneratorFailure;
use crate::models::{Constraints, ConversationTurn, Plan, ReplanDelta};

/// Which kind of generation is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Initial,
    Replan,
    Chat,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Initial => "initial",
            Mode::Replan => "replan",
            Mode::Chat => "chat",
        }
    }
}

/// A single request to the plan generator.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateRequest {
    /// First synthesis from the constraint model alone
    Initial { constraints: Constraints },

    /// Structured status-update replan
    Replan {
        constraints: Constraints,
        current_plan: Plan,
        delta: ReplanDelta,
    },

    /// Open-ended conversational replan; `conversation` includes the message
    /// just sent
    Chat {
        constraints: Constraints,
        current_plan: Plan,
        conversation: Vec<ConversationTurn>,
    },
}

impl GenerateRequest {
    pub fn mode(&self) -> Mode {
        match self {
            GenerateRequest::Initial { .. } => Mode::Initial,
            GenerateRequest::Replan { .. } => Mode::Replan,
            GenerateRequest::Chat { .. } => Mode::Chat,
        }
    }

    pub fn constraints(&self) -> &Constraints {
        match self {
            GenerateRequest::Initial { constraints }
            | GenerateRequest::Replan { constraints, .. }
            | GenerateRequest::Chat { constraints, .. } => constraints,
        }
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        match self {
            GenerateRequest::Initial { .. } => None,
            GenerateRequest::Replan { current_plan, .. }
            | GenerateRequest::Chat { current_plan, .. } => Some(current_plan),
        }
    }
}

/// A successful generator answer.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateResponse {
    /// Answer to `Initial` or `Replan`
    Plan(Plan),

    /// Answer to `Chat`; `plan` is present only if the schedule changed
    Chat { message: String, plan: Option<Plan> },
}

impl GenerateResponse {
    /// The plan of an initial/replan answer.
    ///
    /// # Errors
    ///
    /// A chat-shaped answer is treated as malformed.
    pub fn into_plan(self) -> Result<Plan, GeneratorFailure> {
        match self {
            GenerateResponse::Plan(plan) => Ok(plan),
            GenerateResponse::Chat { .. } => Err(GeneratorFailure::malformed(
                "expected a plan, got a chat reply",
            )),
        }
    }

    /// The message and optional plan of a chat answer.
    ///
    /// # Errors
    ///
    /// A plan-only answer is treated as malformed.
    pub fn into_chat(self) -> Result<(String, Option<Plan>), GeneratorFailure> {
        match self {
            GenerateResponse::Chat { message, plan } => Ok((message, plan)),
            GenerateResponse::Plan(_) => Err(GeneratorFailure::malformed(
                "expected a chat reply, got a bare plan",
            )),
        }
    }
}

/// The external plan generator.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Send one request and wait for its outcome.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GeneratorFailure>;
}
