//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::ClutchError;

/// How a status line should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    /// Nothing went wrong, but the user has to wait or retry
    Waiting,
    Failure,
}

/// Wrapper type for displaying operation confirmation messages.
///
/// This provides consistent formatting for operations that require
/// user confirmation or status updates.
pub struct OperationStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    /// Create a new waiting status.
    pub fn waiting(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Waiting,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

impl From<&ClutchError> for OperationStatus {
    /// Busy sessions are a wait, not a failure.
    fn from(error: &ClutchError) -> Self {
        match error {
            ClutchError::Busy { .. } => Self::waiting(error.to_string()),
            _ => Self::failure(error.to_string()),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            StatusKind::Success => "Success:",
            StatusKind::Waiting => "Please wait:",
            StatusKind::Failure => "Error:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{controller::SessionState, error::GeneratorFailure};

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Plan generated");
        assert_eq!(success.to_string(), "Success: Plan generated\n");
        assert!(success.is_success());

        let failure = OperationStatus::failure("Generator unreachable");
        assert!(failure.to_string().starts_with("Error:"));
    }

    #[test]
    fn test_status_from_error() {
        let busy = ClutchError::Busy {
            state: SessionState::Generating,
        };
        assert_eq!(OperationStatus::from(&busy).kind, StatusKind::Waiting);

        let failed: ClutchError = GeneratorFailure::new("timeout").into();
        let status = OperationStatus::from(&failed);
        assert_eq!(status.kind, StatusKind::Failure);
        assert!(status.to_string().contains("please retry"));
    }
}
