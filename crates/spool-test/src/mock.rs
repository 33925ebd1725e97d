//! Scripted record store
//!
//! [`ScriptedStore`] plays back queued insert results in order and records
//! every call it receives. Once the queue is empty it falls back to its
//! default response, or echoes the record back as the inserted row.

use async_trait::async_trait;
use spool_store::{
	InsertError, InsertResult, InsertedRow, RecordStore, WaitlistRecord,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};

/// Call record for an insert received by a [`ScriptedStore`]
#[derive(Debug, Clone)]
pub struct InsertCall {
	pub collection: String,
	pub record: WaitlistRecord,
	pub timestamp: Instant,
}

/// Record store double with queued responses
///
/// Clones share calls, queue and gate, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone, Default)]
pub struct ScriptedStore {
	calls: Arc<Mutex<Vec<InsertCall>>>,
	responses: Arc<Mutex<VecDeque<InsertResult<InsertedRow>>>>,
	default_response: Option<InsertResult<InsertedRow>>,
	gate: Option<Arc<Semaphore>>,
}

impl ScriptedStore {
	/// Create a store that accepts every insert
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::{RecordStore, WaitlistRecord};
	/// use spool_test::ScriptedStore;
	///
	/// # tokio_test::block_on(async {
	/// let store = ScriptedStore::new();
	/// let row = store
	///     .insert("waitlist", &WaitlistRecord::now("Ada", "ada@example.com"))
	///     .await
	///     .unwrap();
	/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Ada"));
	/// assert_eq!(store.call_count().await, 1);
	/// # });
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store answering every unqueued insert with `response`
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::{InsertError, RecordStore, WaitlistRecord};
	/// use spool_test::{ScriptedStore, responses};
	///
	/// # tokio_test::block_on(async {
	/// let store = ScriptedStore::with_default(responses::transport_failure());
	/// let result = store
	///     .insert("waitlist", &WaitlistRecord::now("Ada", "ada@example.com"))
	///     .await;
	/// assert!(matches!(result, Err(InsertError::Transport(_))));
	/// # });
	/// ```
	pub fn with_default(response: InsertResult<InsertedRow>) -> Self {
		Self {
			default_response: Some(response),
			..Self::default()
		}
	}

	/// Create a store whose inserts wait for [`ScriptedStore::release`]
	///
	/// Each release lets exactly one pending (or future) insert complete. The
	/// call is recorded before it starts waiting.
	pub fn gated() -> Self {
		Self {
			gate: Some(Arc::new(Semaphore::new(0))),
			..Self::default()
		}
	}

	/// Let one gated insert complete; no effect on an ungated store
	pub fn release(&self) {
		if let Some(gate) = &self.gate {
			gate.add_permits(1);
		}
	}

	/// Queue a response for the next insert
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::{InsertError, RecordStore, StoreErrorKind, WaitlistRecord};
	/// use spool_test::{ScriptedStore, responses};
	///
	/// # tokio_test::block_on(async {
	/// let store = ScriptedStore::new();
	/// store.returns(responses::duplicate_email("ada@example.com")).await;
	///
	/// let record = WaitlistRecord::now("Ada", "ada@example.com");
	/// match store.insert("waitlist", &record).await {
	///     Err(InsertError::Store(err)) => assert_eq!(err.kind(), StoreErrorKind::UniqueViolation),
	///     other => panic!("unexpected: {other:?}"),
	/// }
	/// assert!(store.insert("waitlist", &record).await.is_ok());
	/// # });
	/// ```
	pub async fn returns(&self, response: InsertResult<InsertedRow>) {
		self.responses.lock().await.push_back(response);
	}

	/// Queue several responses for sequential inserts
	pub async fn returns_many(&self, responses: Vec<InsertResult<InsertedRow>>) {
		let mut queue = self.responses.lock().await;
		for response in responses {
			queue.push_back(response);
		}
	}

	/// Number of inserts received so far, including ones still gated
	pub async fn call_count(&self) -> usize {
		self.calls.lock().await.len()
	}

	pub async fn was_called(&self) -> bool {
		self.call_count().await > 0
	}

	/// All call records, in arrival order
	pub async fn calls(&self) -> Vec<InsertCall> {
		self.calls.lock().await.clone()
	}

	/// Yield until at least `count` inserts have been received
	pub async fn wait_for_calls(&self, count: usize) {
		while self.call_count().await < count {
			tokio::task::yield_now().await;
		}
	}

	fn echo(record: &WaitlistRecord) -> InsertResult<InsertedRow> {
		serde_json::to_value(record)
			.map(InsertedRow::new)
			.map_err(|e| InsertError::Transport(format!("failed to encode record: {}", e)))
	}
}

#[async_trait]
impl RecordStore for ScriptedStore {
	async fn insert(&self, collection: &str, record: &WaitlistRecord) -> InsertResult<InsertedRow> {
		self.calls.lock().await.push(InsertCall {
			collection: collection.to_string(),
			record: record.clone(),
			timestamp: Instant::now(),
		});

		if let Some(gate) = &self.gate {
			let permit = gate
				.acquire()
				.await
				.map_err(|_| InsertError::Transport("scripted store gate closed".to_string()))?;
			permit.forget();
		}

		let queued = self.responses.lock().await.pop_front();
		match queued.or_else(|| self.default_response.clone()) {
			Some(response) => response,
			None => Self::echo(record),
		}
	}
}

/// Canned insert results
pub mod responses {
	use spool_store::{
		InsertError, InsertResult, InsertedRow, StoreError, UNDEFINED_TABLE, UNIQUE_VIOLATION,
	};

	/// Success without an echoed row
	pub fn ok() -> InsertResult<InsertedRow> {
		Ok(InsertedRow::empty())
	}

	pub fn store_error(code: &str, message: &str) -> InsertResult<InsertedRow> {
		Err(StoreError::new(code, message).into())
	}

	pub fn duplicate_email(email: &str) -> InsertResult<InsertedRow> {
		Err(StoreError::new(
			UNIQUE_VIOLATION,
			"duplicate key value violates unique constraint \"waitlist_email_key\"",
		)
		.with_details(format!("Key (email)=({}) already exists.", email))
		.into())
	}

	pub fn undefined_table(collection: &str) -> InsertResult<InsertedRow> {
		store_error(
			UNDEFINED_TABLE,
			&format!("relation \"public.{}\" does not exist", collection),
		)
	}

	pub fn transport_failure() -> InsertResult<InsertedRow> {
		Err(InsertError::Transport("error sending request: connection refused".to_string()))
	}
}
