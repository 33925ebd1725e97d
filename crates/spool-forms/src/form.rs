//! The waitlist form definition
//!
//! [`WaitlistForm`] holds the two fields a visitor fills in and turns raw input
//! into a [`Signup`]. Required checks run across every field before any shape
//! check, so an empty name with a malformed email reports the missing field.

use crate::field::{FieldError, FormField};
use crate::fields::{CharField, EmailField};
use serde::{Deserialize, Serialize};

/// Local validation failures; these never reach the record store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Please fill in all fields")]
	MissingField { field: String },
	#[error("Please enter a valid email address")]
	InvalidEmail,
}

impl ValidationError {
	/// Message shown inline under the form
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::ValidationError;
	///
	/// let err = ValidationError::MissingField { field: "name".to_string() };
	/// assert_eq!(err.user_message(), "Please fill in all fields");
	/// assert_eq!(
	///     ValidationError::InvalidEmail.user_message(),
	///     "Please enter a valid email address"
	/// );
	/// ```
	pub fn user_message(&self) -> String {
		self.to_string()
	}
}

/// Input that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
	pub name: String,
	pub email: String,
}

/// Name + email form used on the landing page
#[derive(Debug, Clone)]
pub struct WaitlistForm {
	name: CharField,
	email: EmailField,
}

impl WaitlistForm {
	pub const NAME_FIELD: &'static str = "name";
	pub const EMAIL_FIELD: &'static str = "email";

	/// Create the form with its default labels
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::{FormField, WaitlistForm};
	///
	/// let form = WaitlistForm::new();
	/// let labels: Vec<_> = form.fields().iter().map(|f| f.label().unwrap()).collect();
	/// assert_eq!(labels, ["Full Name", "Email Address"]);
	/// ```
	pub fn new() -> Self {
		Self {
			name: CharField::new(Self::NAME_FIELD)
				.required()
				.with_label("Full Name"),
			email: EmailField::new(Self::EMAIL_FIELD)
				.required()
				.with_label("Email Address"),
		}
	}

	/// Fields in display order
	pub fn fields(&self) -> [&dyn FormField; 2] {
		[&self.name, &self.email]
	}

	/// Validate raw input
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::{ValidationError, WaitlistForm};
	///
	/// let form = WaitlistForm::new();
	///
	/// let signup = form.validate("Ada", "ada@example.com").unwrap();
	/// assert_eq!(signup.name, "Ada");
	///
	/// assert_eq!(form.validate("Ada", "bob@x"), Err(ValidationError::InvalidEmail));
	/// assert!(matches!(
	///     form.validate("", "bob@x"),
	///     Err(ValidationError::MissingField { .. })
	/// ));
	/// ```
	pub fn validate(&self, name: &str, email: &str) -> Result<Signup, ValidationError> {
		let inputs: [(&dyn FormField, &str); 2] = [(&self.name, name), (&self.email, email)];

		if let Some((field, _)) = inputs
			.iter()
			.find(|(field, value)| field.required() && field.is_blank(value))
		{
			return Err(ValidationError::MissingField {
				field: field.name().to_string(),
			});
		}

		let name = self.name.clean(name)?;
		let email = self.email.clean(email)?;

		Ok(Signup { name, email })
	}
}

// Only the email field has a shape check
impl From<FieldError> for ValidationError {
	fn from(error: FieldError) -> Self {
		match error {
			FieldError::Required(field) => ValidationError::MissingField { field },
			FieldError::Validation(_) => ValidationError::InvalidEmail,
		}
	}
}

impl Default for WaitlistForm {
	fn default() -> Self {
		Self::new()
	}
}
