//! Login flow
//!
//! The state machine behind the login screen and the controller that drives
//! it from form input to navigation.

pub mod controller;
pub mod navigator;
pub mod state;

pub use controller::{LoginFlowController, SubmitOutcome};
pub use navigator::Navigator;
pub use state::{AuthResolution, FlowEvent, LoginFlowState};
