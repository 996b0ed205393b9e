//! Conversation log: the append-only chat history of a session.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Plan;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One exchanged message.
///
/// An assistant message's `updated_plan` is exactly the plan that became
/// current as a result of that exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_plan: Option<Plan>,
}

/// Role/content pair sent to the generator as chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl From<&ConversationMessage> for ConversationTurn {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Ordered, append-only sequence of messages.
///
/// Ids come from a monotonic counter and are never reused, not even after a
/// session reset.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<ConversationMessage>,
    next_id: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and return its id.
    pub fn push_user(&mut self, content: impl Into<String>) -> u64 {
        self.push(Role::User, content.into(), None)
    }

    /// Append an assistant message and return its id.
    pub fn push_assistant(&mut self, content: impl Into<String>, updated_plan: Option<Plan>) -> u64 {
        self.push(Role::Assistant, content.into(), updated_plan)
    }

    fn push(&mut self, role: Role, content: String, updated_plan: Option<Plan>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ConversationMessage {
            id,
            role,
            content,
            updated_plan,
        });
        id
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConversationMessage> {
        self.messages.iter()
    }

    /// The log as role/content turns, in order.
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.messages.iter().map(ConversationTurn::from).collect()
    }

    /// Drop every message. Only a full session reset may call this.
    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Index<usize> for ConversationLog {
    type Output = ConversationMessage;

    fn index(&self, index: usize) -> &Self::Output {
        &self.messages[index]
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a ConversationMessage;
    type IntoIter = std::slice::Iter<'a, ConversationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
