//! Form state owned by a controller

use serde::{Deserialize, Serialize};
use spool_forms::WaitlistForm;
use std::fmt;

/// Coarse lifecycle state of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
	#[default]
	Idle,
	Submitting,
	Submitted,
	Failed,
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Phase::Idle => "idle",
			Phase::Submitting => "submitting",
			Phase::Submitted => "submitted",
			Phase::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Editable field of the waitlist form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
	Name,
	Email,
}

impl Field {
	/// Form field name, as used for the input's `name` attribute
	pub fn as_str(&self) -> &'static str {
		match self {
			Field::Name => WaitlistForm::NAME_FIELD,
			Field::Email => WaitlistForm::EMAIL_FIELD,
		}
	}

	/// Look up a field by its input name
	///
	/// # Examples
	///
	/// ```
	/// use spool_pages::Field;
	///
	/// assert_eq!(Field::from_name("email"), Some(Field::Email));
	/// assert_eq!(Field::from_name("phone"), None);
	/// ```
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			WaitlistForm::NAME_FIELD => Some(Field::Name),
			WaitlistForm::EMAIL_FIELD => Some(Field::Email),
			_ => None,
		}
	}
}

/// Snapshot of the form
///
/// `error_message` is present exactly when the phase is [`Phase::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
	name: String,
	email: String,
	phase: Phase,
	error_message: Option<String>,
}

impl FormState {
	/// Empty form in [`Phase::Idle`]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn value(&self, field: Field) -> &str {
		match field {
			Field::Name => &self.name,
			Field::Email => &self.email,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn error_message(&self) -> Option<&str> {
		self.error_message.as_deref()
	}

	pub fn is_submitting(&self) -> bool {
		self.phase == Phase::Submitting
	}

	pub(crate) fn set_value(&mut self, field: Field, value: String) {
		match field {
			Field::Name => self.name = value,
			Field::Email => self.email = value,
		}
	}

	pub(crate) fn transition(&mut self, phase: Phase) {
		debug_assert_ne!(phase, Phase::Failed, "use fail() to enter the failed phase");
		self.phase = phase;
		self.error_message = None;
	}

	pub(crate) fn fail(&mut self, message: String) {
		self.phase = Phase::Failed;
		self.error_message = Some(message);
	}

	pub(crate) fn clear(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_new_state_is_idle_and_empty() {
		let state = FormState::new();

		assert_eq!(state.phase(), Phase::Idle);
		assert_eq!(state.name(), "");
		assert_eq!(state.email(), "");
		assert_eq!(state.error_message(), None);
	}

	#[rstest]
	fn test_transition_clears_error() {
		// Arrange
		let mut state = FormState::new();
		state.fail("Please fill in all fields".to_string());

		// Act
		state.transition(Phase::Idle);

		// Assert
		assert_eq!(state.phase(), Phase::Idle);
		assert_eq!(state.error_message(), None);
	}

	#[rstest]
	fn test_clear_resets_values() {
		let mut state = FormState::new();
		state.set_value(Field::Name, "Ada".to_string());
		state.set_value(Field::Email, "ada@example.com".to_string());
		state.transition(Phase::Submitted);

		state.clear();

		assert_eq!(state, FormState::new());
	}

	#[rstest]
	#[case(Field::Name, "name")]
	#[case(Field::Email, "email")]
	fn test_field_names_round_trip(#[case] field: Field, #[case] name: &str) {
		assert_eq!(field.as_str(), name);
		assert_eq!(Field::from_name(name), Some(field));
	}
}
