//! Entry points that issue generator requests.

use log::{debug, info};

use super::{Applied, ReplanController, SessionState};
use crate::{
    error::{ClutchError, Result},
    generator::GenerateRequest,
    models::{Constraints, Plan, ReplanDelta},
};

impl ReplanController {
    /// Generate the first plan from a submitted constraint model.
    ///
    /// The constraints become part of the session only once the plan
    /// arrives; a failed attempt leaves the session empty so the caller can
    /// retry with the same constraints.
    ///
    /// # Errors
    ///
    /// * `ClutchError::Busy` - a request is already in flight
    /// * `ClutchError::InvalidInput` - a plan already exists; reset first
    /// * `ClutchError::Generator` - the generator failed or returned no plan
    pub async fn start(&self, constraints: Constraints) -> Result<Applied> {
        let (ticket, request) = {
            let mut session = self.lock();
            Self::ensure_idle(&session)?;
            if session.plan.is_some() {
                return Err(ClutchError::invalid_input("session")
                    .with_reason("a plan already exists; reset the session first"));
            }
            let ticket = session.issue(SessionState::Generating);
            let request = GenerateRequest::Initial {
                constraints: constraints.clone(),
            };
            (ticket, request)
        };

        info!("generating initial plan (request #{ticket})");
        self.dispatch(ticket, request, move |session, response| {
            let plan = response.into_plan()?;
            session.constraints = Some(constraints);
            session.install(plan.clone());
            Ok(Applied::PlanReplaced(plan))
        })
        .await
    }

    /// Adopt a previously generated plan without calling the generator.
    ///
    /// Lets a front end pick up a saved plan and replan from it.
    ///
    /// # Errors
    ///
    /// * `ClutchError::Busy` - a request is already in flight
    /// * `ClutchError::InvalidInput` - a plan already exists; reset first
    pub fn resume(&self, constraints: Constraints, plan: Plan) -> Result<()> {
        let mut session = self.lock();
        Self::ensure_idle(&session)?;
        if session.plan.is_some() {
            return Err(ClutchError::invalid_input("session")
                .with_reason("a plan already exists; reset the session first"));
        }
        // Anything still in flight from before is now stale
        session.sequence += 1;
        session.constraints = Some(constraints);
        session.install(plan);
        info!("resumed session from an existing plan");
        Ok(())
    }

    /// Replan from a structured status report.
    ///
    /// The delta is forwarded once and not kept.
    ///
    /// # Errors
    ///
    /// * `ClutchError::Busy` - a request is already in flight
    /// * `ClutchError::NoActivePlan` - there is no plan to revise
    /// * `ClutchError::Generator` - the generator failed; the plan is unchanged
    pub async fn submit_status_update(&self, delta: ReplanDelta) -> Result<Applied> {
        let (ticket, request) = {
            let mut session = self.lock();
            Self::ensure_idle(&session)?;
            let (Some(constraints), Some(plan)) = (&session.constraints, &session.plan) else {
                return Err(ClutchError::NoActivePlan);
            };
            let request = GenerateRequest::Replan {
                constraints: constraints.clone(),
                current_plan: plan.clone(),
                delta,
            };
            (session.issue(SessionState::Replanning), request)
        };

        info!("replanning from status update (request #{ticket})");
        self.dispatch(ticket, request, |session, response| {
            let plan = response.into_plan()?;
            session.install(plan.clone());
            Ok(Applied::PlanReplaced(plan))
        })
        .await
    }

    /// Send a free-text message about the current plan.
    ///
    /// The message is appended to the conversation immediately and stays
    /// there even if the generator fails. The assistant's reply is appended
    /// on success, together with the new plan if the schedule changed.
    ///
    /// # Errors
    ///
    /// * `ClutchError::InvalidInput` - the message is blank
    /// * `ClutchError::Busy` - a request is already in flight
    /// * `ClutchError::NoActivePlan` - there is no plan to discuss
    /// * `ClutchError::Generator` - the generator failed; no reply is logged
    pub async fn submit_chat_message(&self, text: &str) -> Result<Applied> {
        if text.trim().is_empty() {
            return Err(ClutchError::invalid_input("message").with_reason("message is empty"));
        }

        let (ticket, request) = {
            let mut session = self.lock();
            Self::ensure_idle(&session)?;
            let (Some(constraints), Some(plan)) = (session.constraints.clone(), session.plan.clone())
            else {
                return Err(ClutchError::NoActivePlan);
            };
            let id = session.log.push_user(text);
            debug!("user message #{id} appended");
            let request = GenerateRequest::Chat {
                constraints,
                current_plan: plan,
                conversation: session.log.turns(),
            };
            (session.issue(SessionState::Replanning), request)
        };

        info!("sending chat message (request #{ticket})");
        self.dispatch(ticket, request, |session, response| {
            let (message, plan) = response.into_chat()?;
            let plan_changed = plan.is_some();
            session.log.push_assistant(message.clone(), plan.clone());
            match plan {
                Some(plan) => session.install(plan),
                None => session.settle(),
            }
            Ok(Applied::Replied {
                message,
                plan_changed,
            })
        })
        .await
    }
}
