//! Authentication result types
//!
//! Defines the answer an authenticator gives for one attempt.

/// Answer of a completed authentication call
///
/// A call that could not produce an answer returns `Err(AuthError)` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure,
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }
}
