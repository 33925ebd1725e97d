//! rstest fixtures shared by the workspace tests

use crate::mock::ScriptedStore;
use rstest::*;
use spool_store::MemoryRecordStore;

/// In-memory store with an empty `waitlist` collection
#[fixture]
pub fn memory_store() -> MemoryRecordStore {
	MemoryRecordStore::with_collections(["waitlist"])
}

/// Scripted store accepting every insert
#[fixture]
pub fn scripted_store() -> ScriptedStore {
	ScriptedStore::new()
}

/// A name and email that pass validation
#[fixture]
pub fn valid_signup() -> (String, String) {
	("Ada".to_string(), "ada@example.com".to_string())
}
