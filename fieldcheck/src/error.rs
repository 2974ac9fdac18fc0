//! Error types

use thiserror::Error;

use crate::validation::ValidationResult;

/// A field validator was misconfigured. Fatal at attach time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a local pattern nor a remote check was supplied.
    #[error("field '{field}' has nothing to validate: set a local pattern or a remote check")]
    NothingToValidate { field: String },

    /// The local pattern failed to compile.
    #[error("field '{field}' has an invalid pattern: {message}")]
    InvalidPattern { field: String, message: String },

    /// The length bounds contradict each other.
    #[error("field '{field}' requires at least {min} characters but allows at most {max}")]
    LengthBounds { field: String, min: usize, max: usize },

    /// A remote check was configured outside a tokio runtime.
    #[error("field '{field}' has a remote check but no tokio runtime is running")]
    NoRuntime { field: String },
}

/// Which local rule rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRule {
    Required,
    MinLength,
    MaxLength,
    Pattern,
}

/// A value failed a synchronous rule. Always recoverable by editing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LocalValidationError {
    /// The rule that failed.
    pub rule: LocalRule,
    /// Message rendered inline next to the field.
    pub message: String,
}

impl LocalValidationError {
    pub fn new(rule: LocalRule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// A remote check could not produce a verdict.
///
/// Never blocks submission: the field degrades to its local result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteCheckFailure {
    /// The request did not complete (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteCheckFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// The submit gate refused a submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// At least one field is invalid; focus was moved to the first one.
    #[error("{} field(s) failed validation", error_count(.0))]
    Invalid(ValidationResult),
}

impl SubmitError {
    /// The validation result behind the refusal.
    pub fn result(&self) -> &ValidationResult {
        match self {
            Self::Invalid(result) => result,
        }
    }
}

fn error_count(result: &ValidationResult) -> usize {
    result.errors().len()
}
