//! PostgREST record store
//!
//! This backend inserts rows through the REST interface Supabase exposes over
//! Postgres tables: `POST {base_url}/rest/v1/{collection}`.
//!
//! Inserts ask for `Prefer: return=minimal`. The anon role only needs insert
//! rights on the table, and a 2xx with no body yields an empty
//! [`InsertedRow`]. A server that echoes rows anyway still has its first row
//! decoded.
//!
//! # Examples
//!
//! ```no_run
//! use spool_store::{PostgrestStore, RecordStore, WaitlistRecord};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let url = "https://project.supabase.co".parse().unwrap();
//!     let store = PostgrestStore::new(url, "anon-key".to_string().into(), Duration::from_secs(30))
//!         .unwrap();
//!
//!     let record = WaitlistRecord::now("Ada", "ada@example.com");
//!     store.insert("waitlist", &record).await.unwrap();
//! }
//! ```

use crate::types::{
	InsertError, InsertResult, InsertedRow, RecordStore, StoreError, WaitlistRecord,
};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;
use url::Url;

const REST_PATH: [&str; 2] = ["rest", "v1"];

/// Errors building a [`PostgrestStore`]
#[derive(Debug, thiserror::Error)]
pub enum PostgrestConfigError {
	#[error("base URL cannot carry a path: {0}")]
	InvalidBaseUrl(String),
	#[error("failed to create HTTP client: {0}")]
	Client(#[from] reqwest::Error),
}

/// PostgREST/Supabase record store
pub struct PostgrestStore {
	base_url: Url,
	api_key: SecretString,
	client: Client,
}

impl PostgrestStore {
	/// Create a store with its own HTTP client
	///
	/// `api_key` is sent both as the `apikey` header and as a bearer token,
	/// which is what Supabase expects for the public anon key.
	pub fn new(
		base_url: Url,
		api_key: SecretString,
		timeout: Duration,
	) -> Result<Self, PostgrestConfigError> {
		let client = Client::builder().timeout(timeout).build()?;
		Self::with_client(base_url, api_key, client)
	}

	/// Create a store with a custom client
	pub fn with_client(
		base_url: Url,
		api_key: SecretString,
		client: Client,
	) -> Result<Self, PostgrestConfigError> {
		if base_url.cannot_be_a_base() {
			return Err(PostgrestConfigError::InvalidBaseUrl(base_url.to_string()));
		}
		Ok(Self {
			base_url,
			api_key,
			client,
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Endpoint for a collection, keeping any path the base URL already has
	///
	/// # Examples
	///
	/// ```
	/// use spool_store::PostgrestStore;
	/// use std::time::Duration;
	///
	/// let store = PostgrestStore::new(
	///     "https://project.supabase.co".parse().unwrap(),
	///     "key".to_string().into(),
	///     Duration::from_secs(5),
	/// )
	/// .unwrap();
	/// assert_eq!(
	///     store.collection_url("waitlist").unwrap().as_str(),
	///     "https://project.supabase.co/rest/v1/waitlist"
	/// );
	/// ```
	pub fn collection_url(&self, collection: &str) -> InsertResult<Url> {
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| InsertError::Transport(format!("invalid base URL: {}", self.base_url)))?
			.pop_if_empty()
			.extend(REST_PATH)
			.push(collection);
		Ok(url)
	}

	fn decode_error(status: reqwest::StatusCode, body: &str) -> StoreError {
		let fallback_code = format!("HTTP{}", status.as_u16());
		match serde_json::from_str::<StoreError>(body) {
			Ok(mut err) => {
				if err.code.is_empty() {
					err.code = fallback_code;
				}
				err
			}
			Err(_) => {
				let message = if body.trim().is_empty() {
					status
						.canonical_reason()
						.unwrap_or("unknown error")
						.to_string()
				} else {
					body.to_string()
				};
				StoreError::new(fallback_code, message)
			}
		}
	}

	fn decode_rows(body: &str) -> InsertResult<InsertedRow> {
		if body.trim().is_empty() {
			return Ok(InsertedRow::empty());
		}
		let rows: Vec<serde_json::Value> = serde_json::from_str(body)
			.map_err(|e| InsertError::Transport(format!("invalid response body: {}", e)))?;
		Ok(rows
			.into_iter()
			.next()
			.map(InsertedRow::new)
			.unwrap_or_else(InsertedRow::empty))
	}
}

impl fmt::Debug for PostgrestStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PostgrestStore")
			.field("base_url", &self.base_url.as_str())
			.field("api_key", &"[REDACTED]")
			.finish()
	}
}

#[async_trait]
impl RecordStore for PostgrestStore {
	async fn insert(&self, collection: &str, record: &WaitlistRecord) -> InsertResult<InsertedRow> {
		let url = self.collection_url(collection)?;
		let key = self.api_key.expose_secret();

		tracing::debug!(collection, url = %url, "sending PostgREST insert");

		let response = self
			.client
			.post(url)
			.header("apikey", key)
			.bearer_auth(key)
			.header("Prefer", "return=minimal")
			.json(&[record])
			.send()
			.await
			.map_err(|e| InsertError::Transport(format!("PostgREST request failed: {}", e)))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| InsertError::Transport(format!("failed to read response: {}", e)))?;

		if !status.is_success() {
			return Err(Self::decode_error(status, &body).into());
		}

		Self::decode_rows(&body)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::StoreErrorKind;
	use reqwest::StatusCode;
	use rstest::rstest;

	fn store(base: &str) -> PostgrestStore {
		PostgrestStore::new(
			base.parse().unwrap(),
			"test-key".to_string().into(),
			Duration::from_secs(5),
		)
		.unwrap()
	}

	#[rstest]
	#[case("https://project.supabase.co", "https://project.supabase.co/rest/v1/waitlist")]
	#[case("https://project.supabase.co/", "https://project.supabase.co/rest/v1/waitlist")]
	#[case("http://localhost:54321/proxy", "http://localhost:54321/proxy/rest/v1/waitlist")]
	fn test_collection_url(#[case] base: &str, #[case] expected: &str) {
		let store = store(base);

		assert_eq!(store.collection_url("waitlist").unwrap().as_str(), expected);
	}

	#[rstest]
	fn test_rejects_cannot_be_a_base_url() {
		let result = PostgrestStore::new(
			"mailto:ops@example.com".parse().unwrap(),
			"k".to_string().into(),
			Duration::from_secs(1),
		);

		assert!(matches!(result, Err(PostgrestConfigError::InvalidBaseUrl(_))));
	}

	#[rstest]
	fn test_debug_redacts_key() {
		let rendered = format!("{:?}", store("https://project.supabase.co"));

		assert!(rendered.contains("[REDACTED]"));
		assert!(!rendered.contains("test-key"));
	}

	#[rstest]
	fn test_decode_error_without_json_body() {
		// Act
		let err = PostgrestStore::decode_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

		// Assert
		assert_eq!(err.code, "HTTP502");
		assert_eq!(err.message, "<html>bad gateway</html>");
		assert_eq!(err.kind(), StoreErrorKind::Other);
	}

	#[rstest]
	fn test_decode_error_empty_body_uses_reason() {
		let err = PostgrestStore::decode_error(StatusCode::SERVICE_UNAVAILABLE, "");

		assert_eq!(err.code, "HTTP503");
		assert_eq!(err.message, "Service Unavailable");
	}

	#[rstest]
	fn test_decode_rows_takes_first_row() {
		let row = PostgrestStore::decode_rows(r#"[{"id": 7, "email": "ada@example.com"}]"#).unwrap();

		assert_eq!(row.get("id"), Some(&serde_json::json!(7)));
	}

	#[rstest]
	#[case("")]
	#[case("[]")]
	fn test_decode_rows_empty(#[case] body: &str) {
		assert!(PostgrestStore::decode_rows(body).unwrap().is_empty());
	}
}
