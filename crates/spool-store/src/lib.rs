//! Record store backends for the Spool waitlist
//!
//! The waitlist form only needs one operation from its backend: insert a
//! record into a named collection. [`RecordStore`] captures that seam and this
//! crate ships two implementations:
//!
//! - [`MemoryRecordStore`]: keeps rows in memory, enforces unique emails and
//!   reports unknown collections the way Postgres does. Intended for local
//!   development and tests.
//! - [`PostgrestStore`] (feature `postgrest`): talks to a Supabase/PostgREST
//!   endpoint over HTTP.
//!
//! ## Example
//!
//! ```
//! use spool_store::{MemoryRecordStore, RecordStore, WaitlistRecord};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryRecordStore::with_collections(["waitlist"]);
//!     let record = WaitlistRecord::now("Ada", "ada@example.com");
//!
//!     let row = store.insert("waitlist", &record).await.unwrap();
//!     assert_eq!(row.get("email").and_then(|v| v.as_str()), Some("ada@example.com"));
//! }
//! ```

pub mod memory;
#[cfg(feature = "postgrest")]
pub mod postgrest;
pub mod types;

pub use memory::MemoryRecordStore;
#[cfg(feature = "postgrest")]
pub use postgrest::{PostgrestConfigError, PostgrestStore};
pub use types::{
	InsertError, InsertResult, InsertedRow, RecordStore, StoreError, StoreErrorKind,
	UNDEFINED_TABLE, UNIQUE_VIOLATION, WaitlistRecord,
};
