//! Authentication system
//!
//! The authenticator capability, its implementations and the credentials
//! handed to it.

pub mod authenticator;
pub mod credentials;
pub mod results;

pub use authenticator::{Authenticator, InMemoryAuthenticator, SimulatedAuthenticator};
pub use credentials::Credentials;
pub use results::AuthOutcome;

use crate::config::{AppConfig, AuthenticatorKind};
use std::sync::Arc;

/// Build the authenticator selected in the configuration
pub fn from_config(config: &AppConfig) -> Arc<dyn Authenticator> {
    match config.authenticator {
        AuthenticatorKind::Simulated => Arc::new(SimulatedAuthenticator::new(config.auth_delay())),
        AuthenticatorKind::InMemory => Arc::new(InMemoryAuthenticator::new(
            config.users.clone(),
            config.auth_delay(),
        )),
    }
}
