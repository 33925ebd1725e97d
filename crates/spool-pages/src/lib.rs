//! Waitlist page behaviour for Spool
//!
//! [`WaitlistFormController`] owns the form state of one visitor session. It
//! validates input with [`spool_forms::WaitlistForm`], inserts the signup
//! through a [`spool_store::RecordStore`], and after a successful signup
//! clears the form again once the reset delay has passed.
//!
//! ## Lifecycle
//!
//! ```text
//!          edit                  submit (valid)            insert ok
//! Idle ─────────▶ Idle ─────────────────────────▶ Submitting ─────────▶ Submitted
//!   ▲                │ submit (invalid)                │ insert failed      │
//!   │                ▼                                 ▼                    │
//!   └──── edit ── Failed ◀─────────────────────────────┘                    │
//!   └──────────────────────────── reset delay elapsed ──────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use spool_pages::{Phase, SubmitOutcome, WaitlistFormController};
//! use spool_store::MemoryRecordStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryRecordStore::with_collections(["waitlist"]);
//!     let controller = WaitlistFormController::with_store(store.clone());
//!
//!     controller.set_name("Ada").unwrap();
//!     controller.set_email("ada@example.com").unwrap();
//!
//!     assert!(matches!(controller.submit().await, SubmitOutcome::Submitted(_)));
//!     assert_eq!(controller.state().phase(), Phase::Submitted);
//!     assert_eq!(controller.view().submit_label, "Added to Waitlist!");
//!     assert_eq!(store.count("waitlist"), 1);
//! }
//! ```

pub mod form;

pub use form::{
	ControllerOptions, EditRejected, Field, FormState, FormView, Phase, SubmissionError,
	SubmitOutcome, WaitlistFormController, html_escape, messages, render_form,
};
