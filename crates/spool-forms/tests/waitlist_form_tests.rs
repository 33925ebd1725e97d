//! Waitlist form validation tests

use rstest::rstest;
use serde_json::json;
use spool_forms::{FormField, Signup, ValidationError, WaitlistForm, Widget};

#[rstest]
#[case("bob")]
#[case("bob@")]
#[case("bob@x")]
#[case("bob@x.")]
#[case("bob @x.io")]
fn test_invalid_email_shapes(#[case] email: &str) {
	let form = WaitlistForm::new();

	let result = form.validate("Bob", email);

	assert_eq!(result, Err(ValidationError::InvalidEmail));
}

#[rstest]
fn test_valid_signup_serializes_both_fields() {
	// Arrange
	let form = WaitlistForm::new();

	// Act
	let signup = form.validate("Ada", "ada@example.com").unwrap();

	// Assert
	assert_eq!(
		signup,
		Signup {
			name: "Ada".to_string(),
			email: "ada@example.com".to_string(),
		}
	);
	assert_eq!(
		serde_json::to_value(&signup).unwrap(),
		json!({"name": "Ada", "email": "ada@example.com"})
	);
}

#[rstest]
fn test_fields_render_metadata() {
	let form = WaitlistForm::new();
	let [name, email] = form.fields();

	assert_eq!(name.name(), WaitlistForm::NAME_FIELD);
	assert_eq!(name.widget(), &Widget::TextInput);
	assert!(name.required());
	assert_eq!(email.name(), WaitlistForm::EMAIL_FIELD);
	assert_eq!(email.widget(), &Widget::EmailInput);
	assert!(email.required());
}
