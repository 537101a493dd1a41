//! Authenticators
//!
//! The controller only depends on [`Authenticator`]. Both implementations
//! here stand in for a real identity service: they wait out a fixed delay and
//! then answer from local data.

use super::credentials::Credentials;
use super::results::AuthOutcome;
use crate::error::AuthError;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::time::Duration;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve one attempt to Success, Failure or an error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError>;
}

/// Accepts any non-empty credentials after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        debug!(
            "Simulating authentication for '{}' ({:?})",
            credentials.username(),
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        if credentials.username().is_empty() || credentials.password().is_empty() {
            Ok(AuthOutcome::Failure)
        } else {
            Ok(AuthOutcome::Success)
        }
    }
}

/// Checks credentials against a fixed username -> password table
#[derive(Debug, Clone)]
pub struct InMemoryAuthenticator {
    users: HashMap<String, String>,
    delay: Duration,
}

impl InMemoryAuthenticator {
    pub fn new(users: HashMap<String, String>, delay: Duration) -> Self {
        Self { users, delay }
    }

    pub fn contains_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        tokio::time::sleep(self.delay).await;

        match self.users.get(credentials.username()) {
            Some(stored) if stored == credentials.password() => Ok(AuthOutcome::Success),
            Some(_) => {
                debug!("Wrong password for user '{}'", credentials.username());
                Ok(AuthOutcome::Failure)
            }
            None => {
                debug!("Unknown user '{}'", credentials.username());
                Ok(AuthOutcome::Failure)
            }
        }
    }
}
