//! In-memory record store for development and testing
//!
//! Collections must be created up front. Inserting into an unknown collection
//! fails with [`UNDEFINED_TABLE`], and a second row with the same email in one
//! collection fails with [`UNIQUE_VIOLATION`], mirroring a `waitlist` table
//! with a unique `email` column.
//!
//! # Examples
//!
//! ```
//! use spool_store::{MemoryRecordStore, RecordStore, StoreErrorKind, InsertError, WaitlistRecord};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryRecordStore::with_collections(["waitlist"]);
//!     let record = WaitlistRecord::now("Ada", "ada@example.com");
//!
//!     store.insert("waitlist", &record).await.unwrap();
//!
//!     match store.insert("waitlist", &record).await {
//!         Err(InsertError::Store(err)) => assert_eq!(err.kind(), StoreErrorKind::UniqueViolation),
//!         other => panic!("expected a duplicate error, got {other:?}"),
//!     }
//!     assert_eq!(store.records("waitlist").len(), 1);
//! }
//! ```

use crate::types::{
	InsertError, InsertResult, InsertedRow, RecordStore, StoreError, UNDEFINED_TABLE,
	UNIQUE_VIOLATION, WaitlistRecord,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory record store
///
/// Clones share the same underlying collections.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
	collections: Arc<RwLock<HashMap<String, Vec<WaitlistRecord>>>>,
	offline: Arc<AtomicBool>,
}

impl MemoryRecordStore {
	/// Create a store with no collections
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store with the given (empty) collections
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::MemoryRecordStore;
	///
	/// let store = MemoryRecordStore::with_collections(["waitlist"]);
	/// assert!(store.has_collection("waitlist"));
	/// assert!(!store.has_collection("signups"));
	/// ```
	pub fn with_collections<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let store = Self::new();
		for name in names {
			store.create_collection(name);
		}
		store
	}

	/// Create a collection if it does not exist yet
	pub fn create_collection(&self, name: impl Into<String>) {
		self.collections.write().entry(name.into()).or_default();
	}

	pub fn has_collection(&self, name: &str) -> bool {
		self.collections.read().contains_key(name)
	}

	/// Records stored in `collection`, in insertion order
	pub fn records(&self, collection: &str) -> Vec<WaitlistRecord> {
		self.collections
			.read()
			.get(collection)
			.cloned()
			.unwrap_or_default()
	}

	/// Number of records stored in `collection`
	pub fn count(&self, collection: &str) -> usize {
		self.collections
			.read()
			.get(collection)
			.map_or(0, Vec::len)
	}

	/// Remove every record, keeping the collections
	pub fn clear(&self) {
		for rows in self.collections.write().values_mut() {
			rows.clear();
		}
	}

	/// Simulate an unreachable store
	///
	/// While offline every insert fails with [`InsertError::Transport`].
	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::SeqCst);
	}
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
	async fn insert(&self, collection: &str, record: &WaitlistRecord) -> InsertResult<InsertedRow> {
		if self.offline.load(Ordering::SeqCst) {
			return Err(InsertError::Transport(
				"connection refused: memory store is offline".to_string(),
			));
		}

		let mut collections = self.collections.write();
		let rows = collections.get_mut(collection).ok_or_else(|| {
			StoreError::new(
				UNDEFINED_TABLE,
				format!("relation \"public.{}\" does not exist", collection),
			)
		})?;

		if rows.iter().any(|row| row.email == record.email) {
			return Err(StoreError::new(
				UNIQUE_VIOLATION,
				format!(
					"duplicate key value violates unique constraint \"{}_email_key\"",
					collection
				),
			)
			.with_details(format!("Key (email)=({}) already exists.", record.email))
			.into());
		}

		rows.push(record.clone());
		let id = rows.len();

		let mut row = serde_json::to_value(record)
			.map_err(|e| InsertError::Transport(format!("failed to encode record: {}", e)))?;
		if let Some(object) = row.as_object_mut() {
			object.insert("id".to_string(), serde_json::Value::from(id));
		}

		Ok(InsertedRow::new(row))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::StoreErrorKind;
	use rstest::rstest;

	fn record(email: &str) -> WaitlistRecord {
		WaitlistRecord::now("Ada", email)
	}

	#[rstest]
	#[tokio::test]
	async fn test_insert_returns_row_with_id() {
		// Arrange
		let store = MemoryRecordStore::with_collections(["waitlist"]);

		// Act
		let first = store.insert("waitlist", &record("a@example.com")).await.unwrap();
		let second = store.insert("waitlist", &record("b@example.com")).await.unwrap();

		// Assert
		assert_eq!(first.get("id"), Some(&serde_json::json!(1)));
		assert_eq!(second.get("id"), Some(&serde_json::json!(2)));
		assert_eq!(store.count("waitlist"), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_duplicate_email_is_unique_violation() {
		// Arrange
		let store = MemoryRecordStore::with_collections(["waitlist"]);
		store.insert("waitlist", &record("a@example.com")).await.unwrap();

		// Act
		let result = store.insert("waitlist", &record("a@example.com")).await;

		// Assert
		match result {
			Err(InsertError::Store(err)) => {
				assert_eq!(err.kind(), StoreErrorKind::UniqueViolation);
				assert_eq!(
					err.details.as_deref(),
					Some("Key (email)=(a@example.com) already exists.")
				);
			}
			other => panic!("unexpected result: {:?}", other),
		}
		assert_eq!(store.count("waitlist"), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_collection_is_undefined_table() {
		let store = MemoryRecordStore::new();

		let result = store.insert("waitlist", &record("a@example.com")).await;

		match result {
			Err(InsertError::Store(err)) => {
				assert_eq!(err.kind(), StoreErrorKind::UndefinedTable);
				assert_eq!(err.message, "relation \"public.waitlist\" does not exist");
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_offline_store_is_transport_error() {
		// Arrange
		let store = MemoryRecordStore::with_collections(["waitlist"]);
		store.set_offline(true);

		// Act
		let result = store.insert("waitlist", &record("a@example.com")).await;

		// Assert
		assert!(matches!(result, Err(InsertError::Transport(_))));
		assert_eq!(store.count("waitlist"), 0);

		store.set_offline(false);
		assert!(store.insert("waitlist", &record("a@example.com")).await.is_ok());
	}

	#[rstest]
	#[tokio::test]
	async fn test_clones_share_rows_and_clear_keeps_collections() {
		let store = MemoryRecordStore::with_collections(["waitlist"]);
		let other = store.clone();

		other.insert("waitlist", &record("a@example.com")).await.unwrap();
		assert_eq!(store.records("waitlist")[0].email, "a@example.com");

		store.clear();
		assert_eq!(other.count("waitlist"), 0);
		assert!(other.has_collection("waitlist"));
	}
}
