//! JSON wire format shared by every transport.
//!
//! Requests carry a `mode` tag plus the fields that mode needs. Responses
//! are envelopes: `{"plan": ...}` for initial/replan and
//! `{"message": ..., "updatedPlan": ...}` for chat. Bodies may arrive wrapped
//! in a fenced code block, which is stripped before parsing.

use serde::{Deserialize, Serialize};

use super::{GenerateRequest, GenerateResponse, GeneratorFailure, Mode};
use crate::models::{Constraints, ConversationTurn, Plan, ReplanDelta};

/// Request body sent to the generator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRequest<'a> {
    pub mode: Mode,
    pub constraints: &'a Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'a Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<&'a ReplanDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<&'a [ConversationTurn]>,
}

impl<'a> From<&'a GenerateRequest> for WireRequest<'a> {
    fn from(request: &'a GenerateRequest) -> Self {
        let mut wire = WireRequest {
            mode: request.mode(),
            constraints: request.constraints(),
            plan: request.current_plan(),
            delta: None,
            conversation: None,
        };
        match request {
            GenerateRequest::Initial { .. } => {}
            GenerateRequest::Replan { delta, .. } => wire.delta = Some(delta),
            GenerateRequest::Chat { conversation, .. } => {
                wire.conversation = Some(conversation.as_slice())
            }
        }
        wire
    }
}

#[derive(Debug, Deserialize)]
struct PlanEnvelope {
    plan: Option<Plan>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatEnvelope {
    message: Option<String>,
    updated_plan: Option<Plan>,
}

/// Strip surrounding whitespace and an optional fenced code block.
pub fn extract_json(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

/// Parse a generator body for the given request mode.
///
/// # Errors
///
/// Returns a [`GeneratorFailure`] when the body is not JSON, does not match
/// the envelope for `mode`, or lacks its required field.
pub fn parse_response(mode: Mode, body: &str) -> Result<GenerateResponse, GeneratorFailure> {
    let json = extract_json(body);
    match mode {
        Mode::Initial | Mode::Replan => {
            let envelope: PlanEnvelope =
                serde_json::from_str(json).map_err(GeneratorFailure::malformed)?;
            envelope
                .plan
                .map(GenerateResponse::Plan)
                .ok_or_else(|| GeneratorFailure::malformed("missing 'plan'"))
        }
        Mode::Chat => {
            let envelope: ChatEnvelope =
                serde_json::from_str(json).map_err(GeneratorFailure::malformed)?;
            let message = envelope
                .message
                .ok_or_else(|| GeneratorFailure::malformed("missing 'message'"))?;
            Ok(GenerateResponse::Chat {
                message,
                plan: envelope.updated_plan,
            })
        }
    }
}
