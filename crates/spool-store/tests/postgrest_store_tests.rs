//! PostgREST backend tests against a mock HTTP server

#![cfg(feature = "postgrest")]

use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use spool_store::{
	InsertError, PostgrestStore, RecordStore, StoreErrorKind, WaitlistRecord,
};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record() -> WaitlistRecord {
	WaitlistRecord::new(
		"Ada",
		"ada@example.com",
		Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap(),
	)
}

fn store_for(server: &MockServer, timeout: Duration) -> PostgrestStore {
	PostgrestStore::new(
		server.uri().parse().unwrap(),
		"anon-key".to_string().into(),
		timeout,
	)
	.unwrap()
}

#[rstest]
#[tokio::test]
async fn test_insert_sends_postgrest_request() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/rest/v1/waitlist"))
		.and(header("apikey", "anon-key"))
		.and(header("authorization", "Bearer anon-key"))
		.and(header("prefer", "return=minimal"))
		.and(body_json(json!([{
			"name": "Ada",
			"email": "ada@example.com",
			"created_at": "2025-01-15T09:30:00.000Z"
		}])))
		.respond_with(ResponseTemplate::new(201))
		.expect(1)
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	// Act
	let row = store.insert("waitlist", &record()).await.unwrap();

	// Assert
	assert!(row.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_insert_does_not_request_row_back() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/rest/v1/waitlist"))
		.respond_with(ResponseTemplate::new(201))
		.expect(1)
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	// Act
	store.insert("waitlist", &record()).await.unwrap();

	// Assert
	let requests = server.received_requests().await.unwrap();
	let prefer = requests[0].headers.get("prefer").unwrap().to_str().unwrap();
	assert!(!prefer.contains("representation"));
}

#[rstest]
#[tokio::test]
async fn test_insert_decodes_echoed_row() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/rest/v1/waitlist"))
		.respond_with(ResponseTemplate::new(201).set_body_json(json!([{
			"id": 42,
			"name": "Ada",
			"email": "ada@example.com"
		}])))
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	let row = store.insert("waitlist", &record()).await.unwrap();

	assert_eq!(row.get("id"), Some(&json!(42)));
}

#[rstest]
#[case(409, "23505", StoreErrorKind::UniqueViolation)]
#[case(404, "42P01", StoreErrorKind::UndefinedTable)]
#[case(401, "42501", StoreErrorKind::Other)]
#[tokio::test]
async fn test_insert_maps_structured_errors(
	#[case] status: u16,
	#[case] code: &str,
	#[case] expected: StoreErrorKind,
) {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/rest/v1/waitlist"))
		.respond_with(ResponseTemplate::new(status).set_body_json(json!({
			"code": code,
			"details": null,
			"hint": null,
			"message": "rejected by database"
		})))
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	// Act
	let result = store.insert("waitlist", &record()).await;

	// Assert
	match result {
		Err(InsertError::Store(err)) => {
			assert_eq!(err.kind(), expected);
			assert_eq!(err.code, code);
			assert_eq!(err.message, "rejected by database");
		}
		other => panic!("unexpected result: {:?}", other),
	}
}

#[rstest]
#[tokio::test]
async fn test_insert_unstructured_error_body() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	let result = store.insert("waitlist", &record()).await;

	match result {
		Err(InsertError::Store(err)) => {
			assert_eq!(err.code, "HTTP500");
			assert_eq!(err.message, "upstream exploded");
		}
		other => panic!("unexpected result: {:?}", other),
	}
}

#[rstest]
#[tokio::test]
async fn test_insert_timeout_is_transport_error() {
	// Arrange
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_millis(100));

	// Act
	let result = store.insert("waitlist", &record()).await;

	// Assert
	assert!(matches!(result, Err(InsertError::Transport(_))));
}

#[rstest]
#[tokio::test]
async fn test_insert_unreachable_server_is_transport_error() {
	// Arrange: reserve a free port, then release it so nothing listens there
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);
	let store = PostgrestStore::new(
		format!("http://127.0.0.1:{}", port).parse().unwrap(),
		"anon-key".to_string().into(),
		Duration::from_secs(2),
	)
	.unwrap();

	// Act
	let result = store.insert("waitlist", &record()).await;

	// Assert
	assert!(matches!(result, Err(InsertError::Transport(_))));
}

#[rstest]
#[tokio::test]
async fn test_insert_garbled_success_body_is_transport_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(201).set_body_string("{not json"))
		.mount(&server)
		.await;
	let store = store_for(&server, Duration::from_secs(5));

	let result = store.insert("waitlist", &record()).await;

	assert!(matches!(result, Err(InsertError::Transport(_))));
}
