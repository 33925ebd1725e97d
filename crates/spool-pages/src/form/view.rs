//! UI state derived from a [`FormState`]

use crate::form::messages::{SUBMIT_LABEL, SUBMITTED_LABEL, SUBMITTING_LABEL};
use crate::form::state::{Field, FormState, Phase};
use serde::Serialize;

/// What the form should look like for a given state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
	pub name: String,
	pub email: String,
	pub phase: Phase,
	/// Inputs are disabled only while submitting
	pub inputs_disabled: bool,
	pub submit_disabled: bool,
	pub submit_label: &'static str,
	/// `submit-btn` plus a `loading` or `submitted` modifier
	pub submit_classes: Vec<&'static str>,
	pub error_banner: Option<String>,
}

impl FormView {
	/// Derive the view for `state`
	///
	/// # Examples
	///
	/// ```
	/// use spool_pages::{FormState, FormView};
	///
	/// let view = FormView::from_state(&FormState::new());
	/// assert_eq!(view.submit_label, "Get Early Access");
	/// assert_eq!(view.submit_class_attr(), "submit-btn");
	/// assert!(!view.inputs_disabled);
	/// ```
	pub fn from_state(state: &FormState) -> Self {
		let phase = state.phase();
		let submitting = phase == Phase::Submitting;

		let submit_label = match phase {
			Phase::Submitting => SUBMITTING_LABEL,
			Phase::Submitted => SUBMITTED_LABEL,
			Phase::Idle | Phase::Failed => SUBMIT_LABEL,
		};

		let mut submit_classes = vec!["submit-btn"];
		match phase {
			Phase::Submitting => submit_classes.push("loading"),
			Phase::Submitted => submit_classes.push("submitted"),
			Phase::Idle | Phase::Failed => {}
		}

		Self {
			name: state.name().to_string(),
			email: state.email().to_string(),
			phase,
			inputs_disabled: submitting,
			submit_disabled: submitting,
			submit_label,
			submit_classes,
			error_banner: state.error_message().map(str::to_string),
		}
	}

	pub fn value(&self, field: Field) -> &str {
		match field {
			Field::Name => &self.name,
			Field::Email => &self.email,
		}
	}

	/// Space separated `class` attribute of the submit button
	pub fn submit_class_attr(&self) -> String {
		self.submit_classes.join(" ")
	}
}

impl From<&FormState> for FormView {
	fn from(state: &FormState) -> Self {
		Self::from_state(state)
	}
}
