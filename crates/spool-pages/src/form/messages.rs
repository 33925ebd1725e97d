//! User-facing copy for the waitlist form

use spool_store::{StoreError, StoreErrorKind};

pub const FORM_TITLE: &str = "Join the Waitlist";

pub const SUBMIT_LABEL: &str = "Get Early Access";
pub const SUBMITTING_LABEL: &str = "Signing Up...";
pub const SUBMITTED_LABEL: &str = "Added to Waitlist!";

pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email is already on the waitlist!";
pub const MISSING_TABLE_MESSAGE: &str = "Database table not found. Please check your setup.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message for a structured store error
///
/// # Examples
///
/// ```
/// use spool_pages::messages::store_error_message;
/// use spool_store::StoreError;
///
/// assert_eq!(
///     store_error_message(&StoreError::new("23505", "duplicate key")),
///     "This email is already on the waitlist!"
/// );
/// assert_eq!(
///     store_error_message(&StoreError::new("42501", "permission denied for table waitlist")),
///     "Database error: permission denied for table waitlist"
/// );
/// ```
pub fn store_error_message(error: &StoreError) -> String {
	match error.kind() {
		StoreErrorKind::UniqueViolation => DUPLICATE_EMAIL_MESSAGE.to_string(),
		StoreErrorKind::UndefinedTable => MISSING_TABLE_MESSAGE.to_string(),
		StoreErrorKind::Other => format!("Database error: {}", error.message),
	}
}
