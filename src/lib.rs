//! # Spool
//!
//! Waitlist signup for the Spool landing page.
//!
//! A visitor fills in a name and an email address; the form validates them
//! locally, inserts a row into a hosted `waitlist` table and shows the
//! outcome. After a successful signup the form clears itself again.
//!
//! ## Crates
//!
//! - [`forms`]: fields, the email shape check and [`forms::ValidationError`]
//! - [`store`]: the [`store::RecordStore`] seam with PostgREST and in-memory backends
//! - [`pages`]: [`pages::WaitlistFormController`], its derived view and markup
//! - [`conf`]: layered settings (defaults, TOML file, `SPOOL_*` environment)
//!
//! ## Feature Flags
//!
//! - `minimal`: controller, forms and the in-memory store
//! - `full` (default): `minimal` plus settings and the PostgREST backend
//! - `test`: re-exports `spool-test` as [`test`]
//!
//! ## Quick Example
//!
//! ```
//! use spool::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryRecordStore::with_collections(["waitlist"]);
//!     let controller = WaitlistFormController::with_store(store);
//!
//!     controller.set_name("Ada").unwrap();
//!     controller.set_email("ada@example").unwrap();
//!
//!     let outcome = controller.submit().await;
//!     assert_eq!(
//!         outcome.error().map(|e| e.user_message()).as_deref(),
//!         Some("Please enter a valid email address")
//!     );
//! }
//! ```

#[cfg(all(feature = "pages", feature = "conf", feature = "postgrest"))]
pub mod app;

#[cfg(feature = "conf")]
pub use spool_conf as conf;
#[cfg(feature = "forms")]
pub use spool_forms as forms;
#[cfg(feature = "pages")]
pub use spool_pages as pages;
#[cfg(feature = "store")]
pub use spool_store as store;
#[cfg(feature = "test")]
pub use spool_test as test;

#[cfg(all(feature = "pages", feature = "conf", feature = "postgrest"))]
pub use app::{AppError, build_controller, controller_from_env, controller_options};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use spool_forms::{Signup, ValidationError, WaitlistForm};

	#[cfg(feature = "store")]
	pub use spool_store::{
		InsertError, InsertedRow, MemoryRecordStore, RecordStore, StoreError, StoreErrorKind,
		WaitlistRecord,
	};

	#[cfg(feature = "postgrest")]
	pub use spool_store::PostgrestStore;

	#[cfg(feature = "pages")]
	pub use spool_pages::{
		ControllerOptions, EditRejected, Field, FormState, FormView, Phase, SubmissionError,
		SubmitOutcome, WaitlistFormController, render_form,
	};

	#[cfg(feature = "conf")]
	pub use spool_conf::{SettingsBuilder, SettingsError, WaitlistSettings};

	#[cfg(all(feature = "pages", feature = "conf", feature = "postgrest"))]
	pub use crate::app::{AppError, build_controller};
}
