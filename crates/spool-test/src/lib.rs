//! Testing utilities for the Spool waitlist
//!
//! - [`mock::ScriptedStore`]: a [`RecordStore`](spool_store::RecordStore) that
//!   replays queued responses, records every insert and can hold an insert in
//!   flight until the test releases it
//! - [`fixtures`]: rstest fixtures for stores and sample input
//! - [`logging::init_test_logging`]: one-time `tracing` subscriber for tests

pub mod fixtures;
pub mod logging;
pub mod mock;

pub use fixtures::{memory_store, scripted_store, valid_signup};
pub use logging::init_test_logging;
pub use mock::{InsertCall, ScriptedStore, responses};
