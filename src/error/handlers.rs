//! Error handlers
//!
//! Maps errors to log records and to the message shown to the user.

use crate::error::types::{AuthError, FlowError};
use log::{error, info, warn};

/// Fixed message for a rejected login
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Log an authentication error at a level matching its severity
pub fn handle_auth_error(err: &AuthError) {
    match err {
        AuthError::Rejected => info!("Authentication rejected"),
        AuthError::Timeout(after) => warn!("Authentication timed out after {:?}", after),
        AuthError::Unexpected(reason) => error!("Authentication error: {}", reason),
    }
}

/// Log a refused state transition
pub fn handle_flow_error(err: &FlowError) {
    warn!("Login flow: {}", err);
}

/// Convert an authentication error to the user-facing failure message
pub fn user_message(err: &AuthError) -> String {
    match err {
        AuthError::Rejected => LOGIN_FAILED_MESSAGE.to_string(),
        AuthError::Unexpected(reason) if reason.trim().is_empty() => {
            LOGIN_FAILED_MESSAGE.to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rejected_uses_fixed_message() {
        assert_eq!(user_message(&AuthError::Rejected), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_unexpected_uses_error_description() {
        let err = AuthError::Unexpected("identity service unreachable".into());
        assert_eq!(user_message(&err), "identity service unreachable");
    }

    #[test]
    fn test_blank_unexpected_falls_back_to_fixed_message() {
        let err = AuthError::Unexpected("  ".into());
        assert_eq!(user_message(&err), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn test_timeout_message_mentions_timeout() {
        let msg = user_message(&AuthError::Timeout(Duration::from_secs(10)));
        assert!(msg.contains("timed out"));
    }
}
