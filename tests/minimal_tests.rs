//! The `minimal` preset: controller and in-memory store without the HTTP backend

#![cfg(all(feature = "minimal", not(feature = "postgrest")))]

use rstest::rstest;
use spool::prelude::*;

#[rstest]
#[tokio::test]
async fn test_minimal_signup_uses_memory_store() {
	// Arrange
	let store = MemoryRecordStore::with_collections(["waitlist"]);
	let controller = WaitlistFormController::with_store(store);
	controller.set_name("Ada").unwrap();
	controller.set_email("ada@example.com").unwrap();

	// Act
	let outcome = controller.submit().await;

	// Assert
	assert!(outcome.is_submitted());
	assert_eq!(controller.store().count("waitlist"), 1);
}
