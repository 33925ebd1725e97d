//! Field trait and shared field types

use serde::{Deserialize, Serialize};

/// Errors produced while cleaning a single field value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required: {0}")]
	Required(String),
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Input widget a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
	TextInput,
	EmailInput,
}

impl Widget {
	/// HTML `type` attribute for this widget
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::Widget;
	///
	/// assert_eq!(Widget::TextInput.input_type(), "text");
	/// assert_eq!(Widget::EmailInput.input_type(), "email");
	/// ```
	pub fn input_type(&self) -> &'static str {
		match self {
			Widget::TextInput => "text",
			Widget::EmailInput => "email",
		}
	}
}

/// A form field that can be labelled, rendered and cleaned
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str>;

	fn required(&self) -> bool;

	fn widget(&self) -> &Widget;

	/// Returns true when the raw value counts as "not provided"
	fn is_blank(&self, value: &str) -> bool {
		value.is_empty()
	}

	/// Validate and normalize a raw input value
	fn clean(&self, value: &str) -> FieldResult<String>;
}
