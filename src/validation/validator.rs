//! Field validators
//!
//! Pure checks over raw form input. A field that is missing, empty or only
//! whitespace is `Required`; anything shorter than the configured minimum
//! (counted in characters) is `TooShort`.

use super::results::{FieldErrors, ValidationResult};
use crate::auth::Credentials;
use crate::config::FlowSettings;
use crate::error::ValidationError;

/// Classifies a single field value
pub trait Validator {
    fn validate(&self, value: &str) -> ValidationResult;

    /// Validate a possibly absent value; absence is `Required`.
    fn validate_field(&self, value: Option<&str>) -> ValidationResult {
        match value {
            Some(value) => self.validate(value),
            None => ValidationResult::Invalid(ValidationError::Required),
        }
    }
}

fn check_min_length(value: &str, min: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::Invalid(ValidationError::Required);
    }

    if value.chars().count() < min {
        return ValidationResult::Invalid(ValidationError::TooShort { min });
    }

    ValidationResult::Valid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameValidator {
    min_length: usize,
}

impl UsernameValidator {
    pub const DEFAULT_MIN_LENGTH: usize = 3;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for UsernameValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}

impl Validator for UsernameValidator {
    fn validate(&self, value: &str) -> ValidationResult {
        check_min_length(value, self.min_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub const DEFAULT_MIN_LENGTH: usize = 6;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}

impl Validator for PasswordValidator {
    fn validate(&self, value: &str) -> ValidationResult {
        check_min_length(value, self.min_length)
    }
}

/// Runs both validators and builds [`Credentials`] only when every field passes.
pub fn validate_credentials(
    username: &str,
    password: &str,
    settings: &FlowSettings,
) -> Result<Credentials, FieldErrors> {
    let errors = FieldErrors {
        username: UsernameValidator::new(settings.min_username_length)
            .validate(username)
            .error()
            .cloned(),
        password: PasswordValidator::new(settings.min_password_length)
            .validate(password)
            .error()
            .cloned(),
    };

    if errors.is_empty() {
        Ok(Credentials::new(username, password))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_lengths() {
        let validator = UsernameValidator::default();
        for short in ["a", "ab", "é", "xy"] {
            assert!(!validator.validate(short).is_valid(), "{short:?} should be invalid");
        }
        for ok in ["abc", "alice", "ünï", "a b"] {
            assert!(validator.validate(ok).is_valid(), "{ok:?} should be valid");
        }
    }

    #[test]
    fn test_username_messages() {
        let validator = UsernameValidator::default();
        assert_eq!(validator.validate("").message().as_deref(), Some("required"));
        assert_eq!(validator.validate("ab").message().as_deref(), Some("too short"));
        assert_eq!(validator.validate("alice").message(), None);
    }

    #[test]
    fn test_password_lengths() {
        let validator = PasswordValidator::default();
        for short in ["", "a", "abcde", "12345"] {
            assert!(!validator.validate(short).is_valid(), "{short:?} should be invalid");
        }
        assert!(validator.validate("abcdef").is_valid());
        assert!(validator.validate("secret1").is_valid());
    }

    #[test]
    fn test_whitespace_only_is_required() {
        assert_eq!(
            UsernameValidator::default().validate("     "),
            ValidationResult::Invalid(ValidationError::Required)
        );
        assert_eq!(
            PasswordValidator::default().validate("\t\t\t\t\t\t\t"),
            ValidationResult::Invalid(ValidationError::Required)
        );
    }

    #[test]
    fn test_absent_value_is_required() {
        assert_eq!(
            UsernameValidator::default().validate_field(None),
            ValidationResult::Invalid(ValidationError::Required)
        );
        assert!(PasswordValidator::default().validate_field(Some("abcdef")).is_valid());
    }

    #[test]
    fn test_validators_share_one_capability() {
        let validators: [(&dyn Validator, &str); 2] = [
            (&UsernameValidator::default(), "abc"),
            (&PasswordValidator::default(), "abcdef"),
        ];
        for (validator, value) in validators {
            assert!(validator.validate(value).is_valid());
        }
    }

    #[test]
    fn test_validate_credentials_collects_both_fields() {
        let errors = validate_credentials("ab", "123", &FlowSettings::default()).unwrap_err();
        assert_eq!(errors.username, Some(ValidationError::TooShort { min: 3 }));
        assert_eq!(errors.password, Some(ValidationError::TooShort { min: 6 }));
    }

    #[test]
    fn test_validate_credentials_builds_credentials() {
        let creds = validate_credentials("alice", "secret1", &FlowSettings::default()).unwrap();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), "secret1");
    }

    #[test]
    fn test_custom_minimums() {
        let settings = FlowSettings {
            min_username_length: 5,
            min_password_length: 10,
            ..FlowSettings::default()
        };
        let errors = validate_credentials("abcd", "secret1", &settings).unwrap_err();
        assert!(errors.username.is_some());
        assert!(errors.password.is_some());
    }
}
