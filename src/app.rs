//! Wiring settings to a live controller

use spool_conf::{SettingsError, WaitlistSettings};
use spool_pages::{ControllerOptions, WaitlistFormController};
use spool_store::{PostgrestConfigError, PostgrestStore};
use std::path::Path;

/// Errors while assembling the waitlist form
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("configuration error: {0}")]
	Settings(#[from] SettingsError),
	#[error("record store setup failed: {0}")]
	Store(#[from] PostgrestConfigError),
}

/// Controller options taken from settings
pub fn controller_options(settings: &WaitlistSettings) -> ControllerOptions {
	ControllerOptions::new(settings.store.collection.clone(), settings.form.reset_delay())
}

/// Build a controller backed by the configured PostgREST endpoint
///
/// # Examples
///
/// ```
/// use spool::conf::{DefaultSource, EnvSource, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new())
///     .add_source(EnvSource::from_vars([
///         ("SPOOL_STORE__URL", "https://project.supabase.co"),
///         ("SPOOL_STORE__ANON_KEY", "anon"),
///     ]))
///     .build()
///     .unwrap();
///
/// let controller = spool::build_controller(settings).unwrap();
/// assert_eq!(controller.options().collection, "waitlist");
/// ```
pub fn build_controller(
	settings: WaitlistSettings,
) -> Result<WaitlistFormController<PostgrestStore>, AppError> {
	let options = controller_options(&settings);
	let timeout = settings.store.timeout();
	let url = settings.store.url;

	tracing::info!(
		url = %url,
		collection = %options.collection,
		reset_delay_ms = settings.form.reset_delay_ms,
		"configuring waitlist form"
	);

	let store = PostgrestStore::new(url, settings.store.anon_key, timeout)?;
	Ok(WaitlistFormController::new(store, options))
}

/// Load settings (defaults, `config_file`, `SPOOL_*` environment) and build
/// a controller
pub fn controller_from_env(
	config_file: Option<&Path>,
) -> Result<WaitlistFormController<PostgrestStore>, AppError> {
	build_controller(WaitlistSettings::load(config_file)?)
}
