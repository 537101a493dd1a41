//! Input validation
//!
//! Per-field validators for the login form and the combined credential check.

pub mod results;
pub mod validator;

pub use results::{FieldErrors, ValidationResult};
pub use validator::{PasswordValidator, UsernameValidator, Validator, validate_credentials};
