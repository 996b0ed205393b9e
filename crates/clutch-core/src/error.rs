//! Error types for the Clutch planning core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::controller::SessionState;
use crate::intake::IntakeStep;

/// Opaque failure reported by a plan generator.
///
/// Network errors, non-success statuses and malformed bodies all collapse into
/// this one type. Callers treat every failure the same way: keep the current
/// plan and offer a retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct GeneratorFailure {
    pub reason: String,
}

impl GeneratorFailure {
    /// Create a failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// A success response that is missing a required field.
    pub fn malformed(what: impl fmt::Display) -> Self {
        Self::new(format!("malformed generator response: {what}"))
    }
}

/// Comprehensive error type for all Clutch operations.
#[derive(Error, Debug)]
pub enum ClutchError {
    /// A field value outside its allowed range or shape
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// An intake step whose completeness predicate does not hold
    #[error("Step '{step}' is incomplete: {reason}")]
    IncompleteStep { step: IntakeStep, reason: String },
    /// The plan generator failed; previously accepted state is untouched
    #[error("Plan generation failed, please retry: {0}")]
    Generator(#[from] GeneratorFailure),
    /// A request is already in flight for this session
    #[error("Still working on the previous request ({state}), please wait")]
    Busy { state: SessionState },
    /// A replan was attempted before any plan exists
    #[error("No active plan; complete intake and generate a plan first")]
    NoActivePlan,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ClutchError {
        ClutchError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating incomplete-step errors.
pub struct IncompleteStepBuilder {
    step: IntakeStep,
}

impl IncompleteStepBuilder {
    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ClutchError {
        ClutchError::IncompleteStep {
            step: self.step,
            reason: reason.into(),
        }
    }
}

impl ClutchError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for incomplete intake step errors.
    pub fn incomplete(step: IntakeStep) -> IncompleteStepBuilder {
        IncompleteStepBuilder { step }
    }

    /// Whether this is a validation error that only blocks local progress.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClutchError::InvalidInput { .. } | ClutchError::IncompleteStep { .. }
        )
    }

    /// Whether the caller may simply try the same operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClutchError::Generator(_) | ClutchError::Busy { .. })
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to ClutchError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| ClutchError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for Clutch operations
pub type Result<T> = std::result::Result<T, ClutchError>;
