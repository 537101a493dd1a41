//! Login flow controller
//!
//! Owns one login session's state and drives it from form input through the
//! authentication attempt to navigation or a failure notice.
//!
//! - `submit` validates synchronously and spawns at most one attempt.
//! - The attempt task holds only a weak handle to the state and re-checks
//!   that the controller is alive before applying its result.
//! - Dropping or disposing the controller cancels the attempt.

use log::{debug, info};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::navigator::Navigator;
use super::state::{AuthResolution, FlowEvent, LoginFlowState};
use crate::auth::{AuthOutcome, Authenticator, Credentials};
use crate::config::{AppConfig, FlowSettings};
use crate::error::handlers::{handle_auth_error, handle_flow_error, user_message};
use crate::error::{AuthError, FlowError};
use crate::validation::{FieldErrors, validate_credentials};

/// What a call to [`LoginFlowController::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and an authentication attempt is running.
    Started,
    /// At least one field is invalid; the state is still Editing.
    Rejected(FieldErrors),
    /// The controller was not accepting input; nothing changed.
    Ignored(FlowError),
}

struct Shared {
    state: watch::Sender<LoginFlowState>,
    notices: watch::Sender<Option<String>>,
    cancel: CancellationToken,
}

impl Shared {
    fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn apply(&self, event: FlowEvent) -> Result<LoginFlowState, FlowError> {
        if self.is_disposed() {
            return Err(FlowError::Disposed);
        }

        let mut applied = Err(FlowError::Disposed);
        self.state.send_if_modified(|state| match state.transition(event) {
            Ok(next) => {
                debug!("Login flow: {} -> {}", state.name(), next.name());
                *state = next.clone();
                applied = Ok(next);
                true
            }
            Err(err) => {
                applied = Err(err);
                false
            }
        });
        applied
    }

    fn resolve(
        &self,
        navigator: &dyn Navigator,
        username: String,
        result: Result<AuthOutcome, AuthError>,
    ) {
        match result {
            Ok(AuthOutcome::Success) => {
                let event = FlowEvent::Resolved(AuthResolution::Success {
                    username: username.clone(),
                });
                match self.apply(event) {
                    Ok(_) => {
                        info!("Login succeeded for '{}'", username);
                        navigator.show_welcome(&username);
                    }
                    Err(err) => handle_flow_error(&err),
                }
            }
            Ok(AuthOutcome::Failure) => self.fail(AuthError::Rejected),
            Err(err) => self.fail(err),
        }
    }

    fn fail(&self, err: AuthError) {
        handle_auth_error(&err);
        let message = user_message(&err);

        let event = FlowEvent::Resolved(AuthResolution::Failure {
            message: message.clone(),
        });
        if let Err(err) = self.apply(event) {
            handle_flow_error(&err);
            return;
        }

        self.notices.send_replace(Some(message));

        if let Err(err) = self.apply(FlowEvent::Acknowledge) {
            handle_flow_error(&err);
        }
    }
}

pub struct LoginFlowController {
    shared: Arc<Shared>,
    authenticator: Arc<dyn Authenticator>,
    navigator: Arc<dyn Navigator>,
    settings: FlowSettings,
}

impl LoginFlowController {
    pub fn new(
        settings: FlowSettings,
        authenticator: Arc<dyn Authenticator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(LoginFlowState::Editing);
        let (notices, _) = watch::channel(None);

        Self {
            shared: Arc::new(Shared {
                state,
                notices,
                cancel: CancellationToken::new(),
            }),
            authenticator,
            navigator,
            settings,
        }
    }

    /// Build a controller with the configured authenticator
    pub fn from_config(config: &AppConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(config.flow_settings(), crate::auth::from_config(config), navigator)
    }

    /// Validate the form and, if it passes, start an authentication attempt.
    ///
    /// Must be called from within a tokio runtime. Calls made while an
    /// attempt is in flight are ignored, not queued.
    pub fn submit(&self, username: &str, password: &str) -> SubmitOutcome {
        if self.is_disposed() {
            debug!("Ignoring submit on disposed controller");
            return SubmitOutcome::Ignored(FlowError::Disposed);
        }

        let current = self.current_state();
        if !current.is_editing() {
            debug!("Ignoring submit while {}", current.name());
            return SubmitOutcome::Ignored(FlowError::InvalidTransition {
                from: current.name(),
                event: FlowEvent::Submit.name(),
            });
        }

        let credentials = match validate_credentials(username, password, &self.settings) {
            Ok(credentials) => credentials,
            Err(errors) => {
                debug!("Login form rejected: {:?}", errors);
                return SubmitOutcome::Rejected(errors);
            }
        };

        if let Err(err) = self.shared.apply(FlowEvent::Submit) {
            return SubmitOutcome::Ignored(err);
        }

        info!("Login attempt started for '{}'", credentials.username());
        self.spawn_attempt(credentials);
        SubmitOutcome::Started
    }

    fn spawn_attempt(&self, credentials: Credentials) {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let cancel = self.shared.cancel.clone();
        let authenticator = Arc::clone(&self.authenticator);
        let navigator = Arc::clone(&self.navigator);
        let timeout = self.settings.auth_timeout;
        let username = credentials.username().to_string();

        tokio::spawn(async move {
            // Runs in its own task so a panicking authenticator surfaces as a JoinError.
            let mut call =
                tokio::spawn(async move { authenticator.authenticate(&credentials).await });

            let finished = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                joined = tokio::time::timeout(timeout, &mut call) => Some(joined),
            };

            let result = match finished {
                None => {
                    call.abort();
                    debug!("Login attempt for '{}' cancelled", username);
                    return;
                }
                Some(Ok(Ok(result))) => result,
                Some(Ok(Err(join_error))) => Err(AuthError::from(join_error)),
                Some(Err(_elapsed)) => {
                    call.abort();
                    Err(AuthError::Timeout(timeout))
                }
            };

            let Some(shared) = shared.upgrade() else {
                debug!("Discarding login result for '{}': controller dropped", username);
                return;
            };
            if shared.is_disposed() {
                debug!("Discarding login result for '{}': controller disposed", username);
                return;
            }

            shared.resolve(navigator.as_ref(), username, result);
        });
    }

    pub fn current_state(&self) -> LoginFlowState {
        self.shared.state.borrow().clone()
    }

    /// Stream of state changes
    pub fn subscribe(&self) -> watch::Receiver<LoginFlowState> {
        self.shared.state.subscribe()
    }

    /// Latest failure message. Receivers see each message once; only the
    /// newest is kept if several arrive before it is read.
    pub fn notices(&self) -> watch::Receiver<Option<String>> {
        self.shared.notices.subscribe()
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Tear the controller down. An in-flight attempt is aborted and its
    /// result is never applied.
    pub fn dispose(&self) {
        if !self.shared.cancel.is_cancelled() {
            info!("Login flow disposed in state {}", self.current_state().name());
            self.shared.cancel.cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }
}

impl Drop for LoginFlowController {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}
