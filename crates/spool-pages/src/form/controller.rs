//! Waitlist form controller
//!
//! [`WaitlistFormController`] is the single owner of a [`FormState`]. Every
//! change goes through it, and each change is published to subscribers over a
//! [`tokio::sync::watch`] channel so a view layer can re-render.
//!
//! Only one submission can be in flight: the phase is checked and moved to
//! [`Phase::Submitting`] under the state lock before the store is awaited.
//! A successful submission schedules a reset task that clears the form after
//! [`ControllerOptions::reset_delay`]. The task is aborted when the controller
//! is dropped.
//!
//! A submit future dropped while the store call is pending leaves the form in
//! [`Phase::Failed`] with the network message, so it never stays stuck in
//! [`Phase::Submitting`].

use crate::form::messages;
use crate::form::render::render_form;
use crate::form::state::{Field, FormState, Phase};
use crate::form::view::FormView;
use parking_lot::Mutex;
use spool_forms::{ValidationError, WaitlistForm};
use spool_store::{InsertError, InsertedRow, RecordStore, StoreError, WaitlistRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Collection signups are inserted into by default
pub const DEFAULT_COLLECTION: &str = "waitlist";

/// How long the success state stays visible by default
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Controller settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
	pub collection: String,
	pub reset_delay: Duration,
}

impl ControllerOptions {
	pub fn new(collection: impl Into<String>, reset_delay: Duration) -> Self {
		Self {
			collection: collection.into(),
			reset_delay,
		}
	}

	pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
		self.collection = collection.into();
		self
	}

	pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
		self.reset_delay = reset_delay;
		self
	}
}

impl Default for ControllerOptions {
	fn default() -> Self {
		Self::new(DEFAULT_COLLECTION, DEFAULT_RESET_DELAY)
	}
}

/// Why a submission failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
	/// Input was rejected locally; the store was not contacted
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// The store answered with a structured error
	#[error(transparent)]
	Store(StoreError),
	/// The store could not be reached or its answer could not be read
	#[error("transport error: {0}")]
	Transport(String),
}

impl SubmissionError {
	/// Message shown beneath the form
	///
	/// # Examples
	///
	/// ```
	/// use spool_pages::SubmissionError;
	/// use spool_store::{InsertError, StoreError};
	///
	/// let err = SubmissionError::from(InsertError::Store(StoreError::new("42P01", "missing")));
	/// assert_eq!(err.user_message(), "Database table not found. Please check your setup.");
	///
	/// let err = SubmissionError::from(InsertError::Transport("timed out".to_string()));
	/// assert_eq!(err.user_message(), "Network error. Please check your connection.");
	/// ```
	pub fn user_message(&self) -> String {
		match self {
			SubmissionError::Validation(err) => err.user_message(),
			SubmissionError::Store(err) => messages::store_error_message(err),
			SubmissionError::Transport(_) => messages::NETWORK_ERROR_MESSAGE.to_string(),
		}
	}
}

impl From<InsertError> for SubmissionError {
	fn from(error: InsertError) -> Self {
		match error {
			InsertError::Store(err) => SubmissionError::Store(err),
			InsertError::Transport(detail) => SubmissionError::Transport(detail),
		}
	}
}

/// Result of [`WaitlistFormController::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// The record was inserted; the row echoed by the store is attached
	Submitted(InsertedRow),
	/// Validation or the insert failed; the form is now [`Phase::Failed`]
	Failed(SubmissionError),
	/// A submission was already in flight or just succeeded
	Ignored,
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, SubmitOutcome::Submitted(_))
	}

	pub fn error(&self) -> Option<&SubmissionError> {
		match self {
			SubmitOutcome::Failed(err) => Some(err),
			_ => None,
		}
	}
}

/// An edit arrived while the form was submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot edit `{}` while the form is submitting", .field.as_str())]
pub struct EditRejected {
	pub field: Field,
}

struct Shared {
	state: Mutex<FormState>,
	updates: watch::Sender<FormState>,
}

impl Shared {
	fn new() -> Self {
		let (updates, _) = watch::channel(FormState::new());
		Self {
			state: Mutex::new(FormState::new()),
			updates,
		}
	}

	fn publish(&self, state: &FormState) {
		self.updates.send_replace(state.clone());
	}

	fn clear(&self) {
		let mut state = self.state.lock();
		state.clear();
		self.publish(&state);
	}
}

/// Marks a store call in progress; fails the form if dropped before disarming
struct InFlight<'a> {
	shared: Option<&'a Shared>,
}

impl<'a> InFlight<'a> {
	fn new(shared: &'a Shared) -> Self {
		Self {
			shared: Some(shared),
		}
	}

	fn disarm(mut self) {
		self.shared = None;
	}
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		let Some(shared) = self.shared.take() else {
			return;
		};
		let mut state = shared.state.lock();
		if state.is_submitting() {
			tracing::warn!("submission dropped before the store answered");
			state.fail(messages::NETWORK_ERROR_MESSAGE.to_string());
			shared.publish(&state);
		}
	}
}

/// Controller for one visitor's waitlist form
pub struct WaitlistFormController<S> {
	store: S,
	form: WaitlistForm,
	options: ControllerOptions,
	shared: Arc<Shared>,
	pending_reset: Mutex<Option<AbortHandle>>,
}

impl<S: RecordStore> WaitlistFormController<S> {
	/// Create a controller in [`Phase::Idle`] with empty fields
	pub fn new(store: S, options: ControllerOptions) -> Self {
		Self {
			store,
			form: WaitlistForm::new(),
			options,
			shared: Arc::new(Shared::new()),
			pending_reset: Mutex::new(None),
		}
	}

	/// Create a controller with [`ControllerOptions::default`]
	pub fn with_store(store: S) -> Self {
		Self::new(store, ControllerOptions::default())
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn options(&self) -> &ControllerOptions {
		&self.options
	}

	/// Snapshot of the current state
	pub fn state(&self) -> FormState {
		self.shared.state.lock().clone()
	}

	/// Receive every state change from now on
	///
	/// # Examples
	///
	/// ```
	/// use spool_pages::{Phase, WaitlistFormController};
	/// use spool_store::MemoryRecordStore;
	///
	/// let controller = WaitlistFormController::with_store(MemoryRecordStore::new());
	/// let mut updates = controller.subscribe();
	///
	/// controller.set_name("Ada").unwrap();
	///
	/// assert!(updates.has_changed().unwrap());
	/// assert_eq!(updates.borrow_and_update().name(), "Ada");
	/// ```
	pub fn subscribe(&self) -> watch::Receiver<FormState> {
		self.shared.updates.subscribe()
	}

	/// Derived UI state for the current snapshot
	pub fn view(&self) -> FormView {
		FormView::from_state(&self.state())
	}

	/// Markup for the current snapshot
	pub fn render(&self) -> String {
		render_form(&self.view())
	}

	/// Update one field
	///
	/// Editing a failed form clears the error and returns it to
	/// [`Phase::Idle`]. Edits after a successful signup are kept until the
	/// pending reset clears them.
	///
	/// # Errors
	///
	/// Returns [`EditRejected`] while a submission is in flight.
	pub fn edit(&self, field: Field, value: impl Into<String>) -> Result<(), EditRejected> {
		let mut state = self.shared.state.lock();
		if state.is_submitting() {
			tracing::debug!(field = field.as_str(), "edit rejected while submitting");
			return Err(EditRejected { field });
		}

		state.set_value(field, value.into());
		if state.phase() == Phase::Failed {
			state.transition(Phase::Idle);
			tracing::debug!(field = field.as_str(), "error cleared by edit");
		}
		self.shared.publish(&state);
		Ok(())
	}

	pub fn set_name(&self, value: impl Into<String>) -> Result<(), EditRejected> {
		self.edit(Field::Name, value)
	}

	pub fn set_email(&self, value: impl Into<String>) -> Result<(), EditRejected> {
		self.edit(Field::Email, value)
	}

	/// Validate the form and insert it into the store
	///
	/// Invalid input moves the form to [`Phase::Failed`] without contacting
	/// the store. Valid input makes exactly one insert attempt, during which
	/// the phase is [`Phase::Submitting`] and further submits are ignored.
	///
	/// Dropping the returned future before the store answers moves the form
	/// to [`Phase::Failed`] with the network message.
	///
	/// The reset after a successful signup is spawned on the current tokio
	/// runtime. Without one the form stays [`Phase::Submitted`] until
	/// [`reset`](Self::reset) is called.
	pub async fn submit(&self) -> SubmitOutcome {
		let signup = {
			let mut state = self.shared.state.lock();
			if matches!(state.phase(), Phase::Submitting | Phase::Submitted) {
				tracing::debug!(phase = %state.phase(), "submit ignored");
				return SubmitOutcome::Ignored;
			}

			match self.form.validate(state.name(), state.email()) {
				Ok(signup) => {
					state.transition(Phase::Submitting);
					self.shared.publish(&state);
					tracing::debug!(collection = %self.options.collection, "submitting signup");
					signup
				}
				Err(err) => {
					tracing::warn!(error = %err, "signup rejected by validation");
					state.fail(err.user_message());
					self.shared.publish(&state);
					return SubmitOutcome::Failed(err.into());
				}
			}
		};

		let in_flight = InFlight::new(&self.shared);
		let record = WaitlistRecord::now(signup.name, signup.email);
		let result = self.store.insert(&self.options.collection, &record).await;
		in_flight.disarm();

		match result {
			Ok(row) => {
				tracing::info!(
					collection = %self.options.collection,
					row = %row.as_json(),
					"added to waitlist"
				);
				{
					let mut state = self.shared.state.lock();
					state.transition(Phase::Submitted);
					self.shared.publish(&state);
				}
				self.schedule_reset();
				SubmitOutcome::Submitted(row)
			}
			Err(err) => {
				match &err {
					InsertError::Store(store_err) => tracing::error!(
						code = %store_err.code,
						message = %store_err.message,
						details = store_err.details.as_deref().unwrap_or(""),
						"waitlist insert failed"
					),
					InsertError::Transport(detail) => {
						tracing::error!(detail = %detail, "waitlist store unreachable")
					}
				}
				let err = SubmissionError::from(err);
				{
					let mut state = self.shared.state.lock();
					state.fail(err.user_message());
					self.shared.publish(&state);
				}
				SubmitOutcome::Failed(err)
			}
		}
	}

	/// Abort the scheduled reset, if one has not fired yet
	///
	/// Returns `true` when a pending reset was aborted.
	pub fn cancel_pending_reset(&self) -> bool {
		match self.pending_reset.lock().take() {
			Some(handle) if !handle.is_finished() => {
				handle.abort();
				tracing::debug!("pending form reset aborted");
				true
			}
			_ => false,
		}
	}

	/// Whether a reset is scheduled and has not fired yet
	pub fn has_pending_reset(&self) -> bool {
		self.pending_reset
			.lock()
			.as_ref()
			.is_some_and(|handle| !handle.is_finished())
	}

	/// Clear the form now, aborting any scheduled reset
	///
	/// Returns `false` and leaves the form untouched while submitting.
	pub fn reset(&self) -> bool {
		let mut state = self.shared.state.lock();
		if state.is_submitting() {
			return false;
		}
		// `pending_reset` is never held while taking the state lock
		self.cancel_pending_reset();
		state.clear();
		self.shared.publish(&state);
		true
	}

	fn schedule_reset(&self) {
		let runtime = match tokio::runtime::Handle::try_current() {
			Ok(runtime) => runtime,
			Err(err) => {
				tracing::warn!(error = %err, "no tokio runtime, form reset not scheduled");
				return;
			}
		};
		let shared = Arc::clone(&self.shared);
		let delay = self.options.reset_delay;
		let handle = runtime.spawn(async move {
			tokio::time::sleep(delay).await;
			shared.clear();
			tracing::debug!("form reset after successful signup");
		})
		.abort_handle();

		if let Some(previous) = self.pending_reset.lock().replace(handle) {
			previous.abort();
		}
		tracing::debug!(delay_ms = delay.as_millis() as u64, "form reset scheduled");
	}
}

impl<S> Drop for WaitlistFormController<S> {
	fn drop(&mut self) {
		if let Some(handle) = self.pending_reset.get_mut().take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use spool_store::MemoryRecordStore;
	use std::future::Future;
	use std::pin::pin;
	use std::task::{Context, Poll, Waker};

	#[rstest]
	fn test_default_options() {
		let options = ControllerOptions::default();

		assert_eq!(options.collection, "waitlist");
		assert_eq!(options.reset_delay, Duration::from_millis(3000));
	}

	#[rstest]
	fn test_edit_rejected_message() {
		let err = EditRejected { field: Field::Email };

		assert_eq!(err.to_string(), "cannot edit `email` while the form is submitting");
	}

	#[rstest]
	fn test_edit_publishes_update() {
		// Arrange
		let controller = WaitlistFormController::with_store(MemoryRecordStore::new());
		let mut updates = controller.subscribe();

		// Act
		controller.set_email("ada@example.com").unwrap();

		// Assert
		assert!(updates.has_changed().unwrap());
		assert_eq!(updates.borrow_and_update().email(), "ada@example.com");
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_submit_does_not_schedule_reset() {
		let controller = WaitlistFormController::with_store(MemoryRecordStore::new());

		let outcome = controller.submit().await;

		assert!(matches!(
			outcome,
			SubmitOutcome::Failed(SubmissionError::Validation(_))
		));
		assert!(!controller.has_pending_reset());
	}

	#[rstest]
	fn test_submit_without_runtime_skips_reset() {
		// Arrange
		let controller =
			WaitlistFormController::with_store(MemoryRecordStore::with_collections(["waitlist"]));
		controller.set_name("Ada").unwrap();
		controller.set_email("ada@example.com").unwrap();
		let mut cx = Context::from_waker(Waker::noop());

		// Act
		let poll = {
			let mut submit = pin!(controller.submit());
			submit.as_mut().poll(&mut cx)
		};

		// Assert
		assert!(matches!(poll, Poll::Ready(SubmitOutcome::Submitted(_))));
		assert_eq!(controller.state().phase(), Phase::Submitted);
		assert!(!controller.has_pending_reset());
		assert!(controller.reset());
		assert_eq!(controller.state().phase(), Phase::Idle);
	}

	#[rstest]
	fn test_drop_without_runtime_is_fine() {
		let controller = WaitlistFormController::with_store(MemoryRecordStore::new());

		assert!(!controller.cancel_pending_reset());
		drop(controller);
	}
}
