//! Configuration for the Spool waitlist
//!
//! Settings are assembled from layered sources merged in priority order
//! (environment variables > TOML file > defaults):
//!
//! ```toml
//! [store]
//! url = "https://project.supabase.co"
//! anon_key = "public-anon-key"
//! collection = "waitlist"
//! timeout_secs = 30
//!
//! [form]
//! reset_delay_ms = 3000
//! ```
//!
//! The same keys can be given as `SPOOL_STORE__URL`, `SPOOL_STORE__ANON_KEY`,
//! `SPOOL_FORM__RESET_DELAY_MS` and so on.
//!
//! ## Example
//!
//! ```
//! use spool_conf::{DefaultSource, EnvSource, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(DefaultSource::new())
//!     .add_source(EnvSource::from_vars([
//!         ("SPOOL_STORE__URL", "https://project.supabase.co"),
//!         ("SPOOL_STORE__ANON_KEY", "anon"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.store.collection, "waitlist");
//! assert_eq!(settings.form.reset_delay_ms, 3000);
//! ```

pub mod settings;
pub mod sources;

pub use settings::{
	FormSettings, SettingsBuilder, SettingsError, StoreSettings, WaitlistSettings,
};
pub use sources::{ConfigSource, DefaultSource, ENV_PREFIX, EnvSource, SourceError, TomlFileSource};
