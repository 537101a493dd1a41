pub mod auth;
pub mod config;
pub mod error;
pub mod flow;
pub mod screen;
pub mod validation;

pub use config::{AppConfig, FlowSettings};
pub use flow::{LoginFlowController, LoginFlowState, SubmitOutcome};
