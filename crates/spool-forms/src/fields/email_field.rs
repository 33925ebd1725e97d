//! Email field

use crate::field::{FieldError, FieldResult, FormField, Widget};
use crate::validators::EmailShapeValidator;

/// Email field checked against the `local@domain.tld` shape
#[derive(Debug, Clone)]
pub struct EmailField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
	validator: EmailShapeValidator,
}

impl EmailField {
	/// Create a new EmailField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::{EmailField, FormField, Widget};
	///
	/// let field = EmailField::new("email");
	/// assert_eq!(field.name(), "email");
	/// assert_eq!(field.widget(), &Widget::EmailInput);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			widget: Widget::EmailInput,
			validator: EmailShapeValidator::new(),
		}
	}
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

impl FormField for EmailField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn clean(&self, value: &str) -> FieldResult<String> {
		if value.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(String::new());
		}

		self.validator.validate(value)?;
		Ok(value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_email_field_required() {
		let field = EmailField::new("email").required();

		assert_eq!(
			field.clean(""),
			Err(FieldError::Required("email".to_string()))
		);
	}

	#[rstest]
	fn test_email_field_rejects_bad_shape() {
		// Arrange
		let field = EmailField::new("email").required();

		// Act
		let result = field.clean("bob@x");

		// Assert
		assert!(matches!(result, Err(FieldError::Validation(_))));
	}

	#[rstest]
	fn test_email_field_returns_value_unchanged() {
		let field = EmailField::new("email").required();

		assert_eq!(field.clean("Ada@Example.com").unwrap(), "Ada@Example.com");
	}
}
