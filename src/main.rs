//! Login Flow - Entry Point
//!
//! Terminal login screen backed by the login flow controller.

use log::{error, info};
use std::sync::Arc;
use tokio::io::BufReader;

use login_flow::screen::{ChannelNavigator, run_login_screen};
use login_flow::{AppConfig, LoginFlowController};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting login flow ({:?} authenticator, {:?} delay)",
        config.authenticator,
        config.auth_delay()
    );

    let (navigator, mut routes) = ChannelNavigator::channel();
    let controller = LoginFlowController::from_config(&config, Arc::new(navigator));

    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();

    match run_login_screen(&controller, &mut routes, reader, &mut writer).await {
        Ok(Some(username)) => info!("Session started for '{}'", username),
        Ok(None) => info!("Login screen closed"),
        Err(e) => {
            error!("Terminal I/O failed: {}", e);
            controller.dispose();
            std::process::exit(1);
        }
    }

    controller.dispose();
}
