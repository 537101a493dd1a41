//! Configuration management for the login flow
//!
//! Layers built-in defaults, an optional `login-flow.toml` and `LOGIN_FLOW_*`
//! environment variables, then validates the result.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Config file looked up in the working directory (extension optional)
const CONFIG_FILE: &str = "login-flow";

/// Environment variable prefix, e.g. `LOGIN_FLOW_AUTH_DELAY_MS`
const ENV_PREFIX: &str = "LOGIN_FLOW";

/// Which authenticator backs the controller
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticatorKind {
    /// Accepts any non-empty credentials after a fixed delay
    Simulated,
    /// Checks credentials against the configured `users` table
    InMemory,
}

/// Complete application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    // ═══ VALIDATION ═══
    /// Minimum username length in characters
    pub min_username_length: usize,

    /// Minimum password length in characters
    pub min_password_length: usize,

    // ═══ AUTHENTICATION ═══
    pub authenticator: AuthenticatorKind,

    /// Simulated latency of every authentication call
    pub auth_delay_ms: u64,

    /// Upper bound on a single authentication attempt
    pub auth_timeout_secs: u64,

    /// Username -> password table for the in-memory authenticator
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// Settings the flow controller needs, cut from [`AppConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub min_username_length: usize,
    pub min_password_length: usize,
    pub auth_timeout: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            min_password_length: 6,
            auth_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `login-flow.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("min_username_length", 3_i64)?
            .set_default("min_password_length", 6_i64)?
            .set_default("authenticator", "simulated")?
            .set_default("auth_delay_ms", 2000_i64)?
            .set_default("auth_timeout_secs", 10_i64)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.min_username_length == 0 {
            return Err(config::ConfigError::Message(
                "min_username_length must be greater than 0".into(),
            ));
        }

        if self.min_password_length == 0 {
            return Err(config::ConfigError::Message(
                "min_password_length must be greater than 0".into(),
            ));
        }

        if self.auth_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "auth_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.auth_delay() >= self.auth_timeout() {
            return Err(config::ConfigError::Message(
                "auth_delay_ms must be shorter than auth_timeout_secs".into(),
            ));
        }

        if self.authenticator == AuthenticatorKind::InMemory && self.users.is_empty() {
            return Err(config::ConfigError::Message(
                "in_memory authenticator requires at least one entry in [users]".into(),
            ));
        }

        Ok(())
    }

    /// Get the simulated authentication delay as Duration
    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    /// Get the authentication timeout as Duration
    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    /// Settings for the flow controller
    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            min_username_length: self.min_username_length,
            min_password_length: self.min_password_length,
            auth_timeout: self.auth_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.min_username_length, 3);
        assert_eq!(config.min_password_length, 6);
        assert_eq!(config.authenticator, AuthenticatorKind::Simulated);
        assert_eq!(config.auth_delay(), Duration::from_secs(2));
        assert_eq!(config.auth_timeout(), Duration::from_secs(10));
        assert!(config.users.is_empty());
        assert_eq!(config.flow_settings(), FlowSettings::default());
    }

    #[test]
    fn test_overrides_and_users_table() {
        let config = AppConfig::from_toml_str(
            r#"
            authenticator = "in_memory"
            auth_delay_ms = 500
            min_password_length = 8

            [users]
            alice = "alice123"
            "#,
        )
        .unwrap();

        assert_eq!(config.authenticator, AuthenticatorKind::InMemory);
        assert_eq!(config.auth_delay(), Duration::from_millis(500));
        assert_eq!(config.flow_settings().min_password_length, 8);
        assert_eq!(config.users.get("alice").map(String::as_str), Some("alice123"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(AppConfig::from_toml_str("auth_timeout_secs = 0").is_err());
    }

    #[test]
    fn test_delay_must_fit_in_timeout() {
        let result = AppConfig::from_toml_str("auth_delay_ms = 5000\nauth_timeout_secs = 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_in_memory_without_users_is_rejected() {
        assert!(AppConfig::from_toml_str(r#"authenticator = "in_memory""#).is_err());
    }
}
