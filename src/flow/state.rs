//! Login flow state machine
//!
//! `transition` is the only way a state changes. Succeeded and Failed are
//! reachable from Submitting alone, and Submit is accepted only in Editing.

use crate::error::FlowError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginFlowState {
    #[default]
    Editing,
    Submitting,
    Failed(String),
    Succeeded(String),
}

/// How an authentication attempt ended, as seen by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResolution {
    Success { username: String },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Submit,
    Resolved(AuthResolution),
    /// The failure message has been handed to the presentation layer.
    Acknowledge,
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::Submit => "submit",
            FlowEvent::Resolved(AuthResolution::Success { .. }) => "success",
            FlowEvent::Resolved(AuthResolution::Failure { .. }) => "failure",
            FlowEvent::Acknowledge => "acknowledge",
        }
    }
}

impl LoginFlowState {
    pub fn name(&self) -> &'static str {
        match self {
            LoginFlowState::Editing => "editing",
            LoginFlowState::Submitting => "submitting",
            LoginFlowState::Failed(_) => "failed",
            LoginFlowState::Succeeded(_) => "succeeded",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, LoginFlowState::Editing)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginFlowState::Submitting)
    }

    pub fn transition(&self, event: FlowEvent) -> Result<LoginFlowState, FlowError> {
        match (self, event) {
            (LoginFlowState::Editing, FlowEvent::Submit) => Ok(LoginFlowState::Submitting),
            (
                LoginFlowState::Submitting,
                FlowEvent::Resolved(AuthResolution::Success { username }),
            ) => Ok(LoginFlowState::Succeeded(username)),
            (
                LoginFlowState::Submitting,
                FlowEvent::Resolved(AuthResolution::Failure { message }),
            ) => Ok(LoginFlowState::Failed(message)),
            (LoginFlowState::Failed(_), FlowEvent::Acknowledge) => Ok(LoginFlowState::Editing),
            (from, event) => Err(FlowError::InvalidTransition {
                from: from.name(),
                event: event.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(username: &str) -> FlowEvent {
        FlowEvent::Resolved(AuthResolution::Success {
            username: username.into(),
        })
    }

    fn failure(message: &str) -> FlowEvent {
        FlowEvent::Resolved(AuthResolution::Failure {
            message: message.into(),
        })
    }

    #[test]
    fn test_happy_path() {
        let state = LoginFlowState::default();
        let state = state.transition(FlowEvent::Submit).unwrap();
        assert_eq!(state, LoginFlowState::Submitting);
        let state = state.transition(success("alice")).unwrap();
        assert_eq!(state, LoginFlowState::Succeeded("alice".into()));
    }

    #[test]
    fn test_failure_returns_to_editing_after_acknowledge() {
        let state = LoginFlowState::Submitting.transition(failure("nope")).unwrap();
        assert_eq!(state, LoginFlowState::Failed("nope".into()));
        assert_eq!(
            state.transition(FlowEvent::Acknowledge).unwrap(),
            LoginFlowState::Editing
        );
    }

    #[test]
    fn test_resolution_never_applies_from_editing() {
        let err = LoginFlowState::Editing.transition(success("alice")).unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "editing",
                event: "success"
            }
        );
        assert!(LoginFlowState::Editing.transition(failure("x")).is_err());
    }

    #[test]
    fn test_submit_only_from_editing() {
        for state in [
            LoginFlowState::Submitting,
            LoginFlowState::Failed("x".into()),
            LoginFlowState::Succeeded("alice".into()),
        ] {
            assert!(state.transition(FlowEvent::Submit).is_err(), "{state:?}");
        }
    }

    #[test]
    fn test_terminal_success_ignores_everything() {
        let done = LoginFlowState::Succeeded("alice".into());
        assert!(done.transition(FlowEvent::Acknowledge).is_err());
        assert!(done.transition(failure("late")).is_err());
    }
}
