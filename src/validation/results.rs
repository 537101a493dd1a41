//! Validation result types
//!
//! Defines result structures returned by validators.

use crate::error::ValidationError;

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The message to show next to the field, if any
    pub fn message(&self) -> Option<String> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err.to_string()),
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }
}

/// Field-level errors of a rejected submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}
