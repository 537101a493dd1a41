//! Error types
//!
//! Defines domain-specific error types for validation, authentication and
//! the flow state machine. Messages never contain password values.

use std::time::Duration;

/// Field-level validation errors
///
/// The display text is the message surfaced next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required")]
    Required,

    #[error("too short")]
    TooShort { min: usize },
}

/// Authentication errors
///
/// `Rejected` is the ordinary "wrong credentials" failure. The other variants
/// cover attempts that never produced an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Login failed. Please try again.")]
    Rejected,

    #[error("{0}")]
    Unexpected(String),

    #[error("Login timed out after {0:?}. Please try again.")]
    Timeout(Duration),
}

/// Flow state machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid transition: {event} is not allowed in state {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("Controller has been disposed")]
    Disposed,
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_panic() {
            AuthError::Unexpected("Authentication service crashed. Please try again.".into())
        } else {
            AuthError::Unexpected("Authentication was cancelled.".into())
        }
    }
}
