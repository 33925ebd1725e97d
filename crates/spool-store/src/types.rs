//! Record store types and the [`RecordStore`] trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Postgres SQLSTATE for a unique constraint violation
pub const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a missing relation
pub const UNDEFINED_TABLE: &str = "42P01";

/// A signup row as sent to the store
///
/// `created_at` is serialized as an RFC 3339 UTC timestamp with millisecond
/// precision, e.g. `2025-01-15T09:30:00.000Z`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistRecord {
	pub name: String,
	pub email: String,
	#[serde(with = "iso_millis")]
	pub created_at: DateTime<Utc>,
}

impl WaitlistRecord {
	pub fn new(
		name: impl Into<String>,
		email: impl Into<String>,
		created_at: DateTime<Utc>,
	) -> Self {
		Self {
			name: name.into(),
			email: email.into(),
			created_at,
		}
	}

	/// Create a record stamped with the current time
	pub fn now(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self::new(name, email, Utc::now())
	}
}

mod iso_millis {
	use chrono::{DateTime, SecondsFormat, Utc};
	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(
		value: &DateTime<Utc>,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<DateTime<Utc>, D::Error> {
		let raw = String::deserialize(deserializer)?;
		DateTime::parse_from_rfc3339(&raw)
			.map(|dt| dt.with_timezone(&Utc))
			.map_err(serde::de::Error::custom)
	}
}

/// Row echoed back by the store after a successful insert
///
/// Stores differ in what they return (generated ids, defaults), so the row is
/// kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertedRow(serde_json::Value);

impl InsertedRow {
	pub fn new(value: serde_json::Value) -> Self {
		Self(value)
	}

	/// A row for stores that acknowledge without echoing data
	pub fn empty() -> Self {
		Self(serde_json::Value::Null)
	}

	pub fn is_empty(&self) -> bool {
		match &self.0 {
			serde_json::Value::Null => true,
			serde_json::Value::Object(map) => map.is_empty(),
			_ => false,
		}
	}

	pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
		self.0.get(key)
	}

	pub fn as_json(&self) -> &serde_json::Value {
		&self.0
	}

	pub fn into_json(self) -> serde_json::Value {
		self.0
	}
}

/// Coarse classification of a [`StoreError`] code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
	UniqueViolation,
	UndefinedTable,
	Other,
}

/// Structured error returned by the store
///
/// Field names follow the PostgREST error body so the type can be
/// deserialized straight from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct StoreError {
	#[serde(default)]
	pub code: String,
	#[serde(default)]
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hint: Option<String>,
}

impl StoreError {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			details: None,
			hint: None,
		}
	}

	pub fn with_details(mut self, details: impl Into<String>) -> Self {
		self.details = Some(details.into());
		self
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.hint = Some(hint.into());
		self
	}

	/// Classify the error code
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::{StoreError, StoreErrorKind};
	///
	/// assert_eq!(StoreError::new("23505", "dup").kind(), StoreErrorKind::UniqueViolation);
	/// assert_eq!(StoreError::new("42P01", "missing").kind(), StoreErrorKind::UndefinedTable);
	/// assert_eq!(StoreError::new("42501", "denied").kind(), StoreErrorKind::Other);
	/// ```
	pub fn kind(&self) -> StoreErrorKind {
		match self.code.as_str() {
			UNIQUE_VIOLATION => StoreErrorKind::UniqueViolation,
			UNDEFINED_TABLE => StoreErrorKind::UndefinedTable,
			_ => StoreErrorKind::Other,
		}
	}
}

/// Why an insert did not succeed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
	/// The store answered with a structured error
	#[error("store error: {0}")]
	Store(#[from] StoreError),
	/// No structured answer was obtained (connection, timeout, undecodable reply)
	#[error("transport error: {0}")]
	Transport(String),
}

pub type InsertResult<T> = Result<T, InsertError>;

/// Backend that persists waitlist records
#[async_trait]
pub trait RecordStore: Send + Sync {
	/// Insert one record into `collection`
	async fn insert(&self, collection: &str, record: &WaitlistRecord) -> InsertResult<InsertedRow>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
	async fn insert(&self, collection: &str, record: &WaitlistRecord) -> InsertResult<InsertedRow> {
		(**self).insert(collection, record).await
	}
}
