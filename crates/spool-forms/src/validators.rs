//! Email shape validation
//!
//! The waitlist only checks that an address looks like `local@domain.tld`.
//! Deliverability and uniqueness are left to the record store.

use crate::field::{FieldError, FieldResult};
use regex::Regex;
use std::sync::LazyLock;

// One `@`, no whitespace, at least one dot in the domain part.
static EMAIL_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_SHAPE_REGEX: invalid regex pattern")
});

/// Message returned when an address does not have the expected shape
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Validates that a string has the basic `local@domain.tld` shape.
///
/// # Examples
///
/// ```
/// use spool_forms::validators::EmailShapeValidator;
///
/// let validator = EmailShapeValidator::new();
/// assert!(validator.validate("ada@example.com").is_ok());
/// assert!(validator.validate("bob").is_err());
/// assert!(validator.validate("bob@").is_err());
/// assert!(validator.validate("bob@x").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailShapeValidator;

impl EmailShapeValidator {
	pub fn new() -> Self {
		Self
	}

	/// Returns true when the value matches the expected shape
	pub fn is_match(&self, value: &str) -> bool {
		EMAIL_SHAPE_REGEX.is_match(value)
	}

	pub fn validate(&self, value: &str) -> FieldResult<()> {
		if self.is_match(value) {
			Ok(())
		} else {
			Err(FieldError::Validation(INVALID_EMAIL_MESSAGE.to_string()))
		}
	}
}
