//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Character field for free text
///
/// Values are kept verbatim, so a value made only of spaces still satisfies
/// `required`.
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
}

impl CharField {
	/// Create a new CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::fields::CharField;
	///
	/// let field = CharField::new("name");
	/// assert_eq!(field.name, "name");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			widget: Widget::TextInput,
		}
	}
	/// Set the field as required
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::fields::CharField;
	///
	/// let field = CharField::new("name").required();
	/// assert!(field.required);
	/// ```
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}
	/// Set the label for the field
	///
	/// # Examples
	///
	/// ```
	/// use spool_forms::fields::CharField;
	///
	/// let field = CharField::new("name").with_label("Full Name");
	/// assert_eq!(field.label.as_deref(), Some("Full Name"));
	/// ```
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

impl FormField for CharField {
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
		if value.is_empty() && self.required {
			return Err(FieldError::Required(self.name.clone()));
		}
		Ok(value.to_string())
	}
}
