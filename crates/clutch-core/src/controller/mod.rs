//! Session state and the replan controller.
//!
//! The [`ReplanController`] owns the mutable state of one planning session:
//! the constraint model, the current plan, and the conversation log. Every
//! change to that state goes through a generator request, and at most one
//! request is in flight at a time.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │    Dispatch     │    │ PlanGenerator   │
//! │ (start, status, │───▶│ (sequence +     │───▶│ (HTTP, scripted │
//! │  chat, reset)   │    │  busy guard)    │    │  or custom)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Preconditions         Apply-or-discard        External service
//! ```
//!
//! ## Session states
//!
//! ```text
//!            start            success
//! NoPlan ───────────▶ Generating ───────▶ HasPlan ◀──────┐
//!   ▲                     │ failure          │ status /   │ success
//!   │                     ▼                  │ chat       │ or failure
//!   └──────────────── NoPlan                 ▼            │
//!                                        Replanning ──────┘
//!
//! reset: any state ──▶ NoPlan
//! ```
//!
//! ## Sequencing
//!
//! Each request is tagged with a fresh sequence number when it is issued. A
//! response is applied only if its number is still the latest one issued;
//! otherwise it is dropped and reported as [`Applied::Discarded`]. Resetting
//! the session issues a new number, so anything in flight at reset time is
//! discarded when it lands.
//!
//! The session lock is a plain mutex that is released before awaiting the
//! generator. Calls made while a request is outstanding fail fast with
//! `ClutchError::Busy` instead of queueing.
//!
//! # Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use clutch_core::{
//!     controller::{Applied, SessionBuilder, SessionState},
//!     generator::testing::ScriptedGenerator,
//!     models::{Constraints, Plan},
//! };
//!
//! # async fn example(constraints: Constraints, plan: Plan) -> clutch_core::Result<()> {
//! let generator = Arc::new(ScriptedGenerator::new());
//! generator.push_plan(plan);
//!
//! let controller = SessionBuilder::new()
//!     .with_generator(generator)
//!     .build()?;
//!
//! let applied = controller.start(constraints).await?;
//! assert!(matches!(applied, Applied::PlanReplaced(_)));
//! assert_eq!(controller.state(), SessionState::HasPlan);
//! # Ok(())
//! # }
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::Zoned;
use log::{debug, info, warn};
use serde::Serialize;

pub mod builder;
mod handlers;


pub use builder::SessionBuilder;

use crate::{
    config::ClutchConfig,
    display::review,
    error::{ClutchError, GeneratorFailure, Result},
    generator::{GenerateRequest, GenerateResponse, PlanGenerator},
    models::{Constraints, ConversationLog, ConversationMessage, Plan},
};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No plan yet; intake may be in progress
    NoPlan,
    /// Initial generation in flight
    Generating,
    /// A plan is current and nothing is in flight
    HasPlan,
    /// A status-update or chat request is in flight
    Replanning,
}

impl SessionState {
    /// Whether a generator request is outstanding.
    pub fn is_busy(self) -> bool {
        matches!(self, SessionState::Generating | SessionState::Replanning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NoPlan => "no plan",
            SessionState::Generating => "generating",
            SessionState::HasPlan => "has plan",
            SessionState::Replanning => "replanning",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a completed request did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A new plan became current
    PlanReplaced(Plan),
    /// The assistant answered a chat message
    Replied { message: String, plan_changed: bool },
    /// The response arrived after a newer request or a reset and was dropped
    Discarded,
}

impl Applied {
    /// The new plan, if one was installed.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Applied::PlanReplaced(plan) => Some(plan),
            Applied::Replied { .. } | Applied::Discarded => None,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Applied::Discarded)
    }
}

/// Mutable session data, guarded by the controller's mutex.
#[derive(Debug)]
struct Session {
    state: SessionState,
    constraints: Option<Constraints>,
    plan: Option<Plan>,
    log: ConversationLog,
    /// Latest sequence number issued
    sequence: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            state: SessionState::NoPlan,
            constraints: None,
            plan: None,
            log: ConversationLog::new(),
            sequence: 0,
        }
    }

    /// Claim the session for a new request and return its sequence number.
    fn issue(&mut self, state: SessionState) -> u64 {
        self.sequence += 1;
        self.state = state;
        debug!("request #{} issued ({})", self.sequence, state);
        self.sequence
    }

    /// The resting state once nothing is in flight.
    fn settle(&mut self) {
        self.state = if self.plan.is_some() {
            SessionState::HasPlan
        } else {
            SessionState::NoPlan
        };
    }

    /// Install a new current plan, logging any advisory warnings.
    fn install(&mut self, plan: Plan) {
        if let Some(constraints) = &self.constraints {
            let now = Zoned::now().datetime();
            for warning in review(&plan, constraints, now) {
                warn!("plan warning: {warning}");
            }
        }
        info!(
            "plan installed: {} blocks, {} priorities",
            plan.schedule_blocks.len(),
            plan.top_priorities.len()
        );
        self.plan = Some(plan);
        self.settle();
    }
}

/// Returns the session to rest if a dispatched call is dropped mid-flight.
///
/// Disarmed once the generator answers; after that the response path owns
/// the state transition.
struct InFlight<'a> {
    controller: &'a ReplanController,
    ticket: u64,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.controller.lock();
        if session.sequence == self.ticket && session.state.is_busy() {
            session.settle();
            debug!("request #{} abandoned before its response", self.ticket);
        }
    }
}

/// Coordinates one planning session against a plan generator.
///
/// All methods take `&self`; share the controller behind an `Arc` to issue
/// calls from several tasks.
pub struct ReplanController {
    generator: Arc<dyn PlanGenerator>,
    config: ClutchConfig,
    session: Mutex<Session>,
}

impl ReplanController {
    pub(crate) fn new(generator: Arc<dyn PlanGenerator>, config: ClutchConfig) -> Self {
        Self {
            generator,
            config,
            session: Mutex::new(Session::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send `request` and apply the response if `ticket` is still current.
    ///
    /// `apply` runs under the session lock and only for a current, successful
    /// response. A failure from either the generator or `apply` returns the
    /// session to its resting state with plan and log untouched.
    async fn dispatch<F>(&self, ticket: u64, request: GenerateRequest, apply: F) -> Result<Applied>
    where
        F: FnOnce(&mut Session, GenerateResponse) -> std::result::Result<Applied, GeneratorFailure>
            + Send,
    {
        let mut in_flight = InFlight {
            controller: self,
            ticket,
            armed: true,
        };
        let outcome = self.generator.generate(request).await;
        in_flight.armed = false;

        let mut session = self.lock();
        if session.sequence != ticket {
            debug!(
                "discarding stale response #{ticket} (latest is #{})",
                session.sequence
            );
            return Ok(Applied::Discarded);
        }

        match outcome.and_then(|response| apply(&mut session, response)) {
            Ok(applied) => {
                debug!("request #{ticket} applied");
                Ok(applied)
            }
            Err(failure) => {
                session.settle();
                warn!("request #{ticket} failed: {failure}");
                Err(ClutchError::Generator(failure))
            }
        }
    }

    /// Fail with `Busy` if a request is in flight.
    fn ensure_idle(session: &Session) -> Result<()> {
        if session.state.is_busy() {
            return Err(ClutchError::Busy {
                state: session.state,
            });
        }
        Ok(())
    }

    /// Discard the plan, constraints and conversation in one step.
    ///
    /// Any request still in flight becomes stale and will be discarded when
    /// its response arrives.
    pub fn reset(&self) {
        let mut session = self.lock();
        session.sequence += 1;
        session.state = SessionState::NoPlan;
        session.plan = None;
        session.constraints = None;
        session.log.clear();
        info!("session reset (sequence #{})", session.sequence);
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    /// A copy of the current plan.
    pub fn plan(&self) -> Option<Plan> {
        self.lock().plan.clone()
    }

    /// A copy of the constraint model the current plan was built from.
    pub fn constraints(&self) -> Option<Constraints> {
        self.lock().constraints.clone()
    }

    /// A copy of the conversation so far.
    pub fn conversation(&self) -> Vec<ConversationMessage> {
        self.lock().log.messages().to_vec()
    }

    /// The conversation log, for rendering.
    pub fn conversation_log(&self) -> ConversationLog {
        self.lock().log.clone()
    }

    /// The latest sequence number issued.
    pub fn last_sequence(&self) -> u64 {
        self.lock().sequence
    }

    pub fn config(&self) -> &ClutchConfig {
        &self.config
    }
}

impl fmt::Debug for ReplanController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.lock();
        f.debug_struct("ReplanController")
            .field("state", &session.state)
            .field("sequence", &session.sequence)
            .field("messages", &session.log.len())
            .finish()
    }
}
