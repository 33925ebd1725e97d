//! Typed waitlist settings

use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
use indexmap::IndexMap;
use secrecy::SecretString;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Errors building settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Missing required setting: {0}")]
	Missing(String),

	#[error("Invalid value for {key}: {reason}")]
	Invalid { key: String, reason: String },

	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},
}

/// Record store connection settings
#[derive(Debug)]
pub struct StoreSettings {
	/// Project base URL, e.g. `https://project.supabase.co`
	pub url: Url,
	/// Public anon key; never printed by `Debug`
	pub anon_key: SecretString,
	/// Collection (table) signups are inserted into
	pub collection: String,
	pub timeout_secs: u64,
}

impl StoreSettings {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

/// Form behaviour settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
	/// How long the success state is shown before the form resets
	pub reset_delay_ms: u64,
}

impl FormSettings {
	pub fn reset_delay(&self) -> Duration {
		Duration::from_millis(self.reset_delay_ms)
	}
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			reset_delay_ms: 3000,
		}
	}
}

/// All settings of the waitlist page
#[derive(Debug)]
pub struct WaitlistSettings {
	pub store: StoreSettings,
	pub form: FormSettings,
}

impl WaitlistSettings {
	/// Load defaults, then `config_file` (if given and present), then `SPOOL_*`
	/// environment variables
	pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
		let mut builder = SettingsBuilder::new()
			.add_source(DefaultSource::new())
			.add_source(EnvSource::new());
		if let Some(path) = config_file {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder.build()
	}
}

/// Merges [`ConfigSource`]s and builds [`WaitlistSettings`]
///
/// Sources may be added in any order; higher priority sources win.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merged key/value map, highest priority last-writer
	pub fn merged(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|s| s.priority());

		let mut merged = IndexMap::new();
		for source in ordered {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"loaded settings source"
			);
			merged.extend(values);
		}
		Ok(merged)
	}

	pub fn build(&self) -> Result<WaitlistSettings, SettingsError> {
		let values = self.merged()?;
		let reader = Reader { values: &values };

		let url = reader.required_str("store.url")?;
		let url = Url::parse(&url).map_err(|e| SettingsError::Invalid {
			key: "store.url".to_string(),
			reason: e.to_string(),
		})?;
		if url.cannot_be_a_base() {
			return Err(SettingsError::Invalid {
				key: "store.url".to_string(),
				reason: "expected an http(s) base URL".to_string(),
			});
		}

		let anon_key = reader.required_str("store.anon_key")?;
		if anon_key.is_empty() {
			return Err(SettingsError::Invalid {
				key: "store.anon_key".to_string(),
				reason: "must not be empty".to_string(),
			});
		}

		let collection = reader
			.optional_str("store.collection")?
			.unwrap_or_else(|| "waitlist".to_string());
		let timeout_secs = reader.optional_u64("store.timeout_secs")?.unwrap_or(30);
		let reset_delay_ms = reader
			.optional_u64("form.reset_delay_ms")?
			.unwrap_or(FormSettings::default().reset_delay_ms);

		Ok(WaitlistSettings {
			store: StoreSettings {
				url,
				anon_key: SecretString::from(anon_key),
				collection,
				timeout_secs,
			},
			form: FormSettings { reset_delay_ms },
		})
	}
}

struct Reader<'a> {
	values: &'a IndexMap<String, Value>,
}

impl Reader<'_> {
	fn required_str(&self, key: &str) -> Result<String, SettingsError> {
		self.optional_str(key)?
			.ok_or_else(|| SettingsError::Missing(key.to_string()))
	}

	fn optional_str(&self, key: &str) -> Result<Option<String>, SettingsError> {
		match self.values.get(key) {
			None | Some(Value::Null) => Ok(None),
			Some(Value::String(s)) => Ok(Some(s.clone())),
			Some(other) => Err(SettingsError::Invalid {
				key: key.to_string(),
				reason: format!("expected a string, got {}", other),
			}),
		}
	}

	fn optional_u64(&self, key: &str) -> Result<Option<u64>, SettingsError> {
		let invalid = |reason: String| SettingsError::Invalid {
			key: key.to_string(),
			reason,
		};
		match self.values.get(key) {
			None | Some(Value::Null) => Ok(None),
			Some(Value::Number(n)) => n
				.as_u64()
				.map(Some)
				.ok_or_else(|| invalid(format!("expected a non-negative integer, got {}", n))),
			Some(Value::String(s)) => s
				.trim()
				.parse::<u64>()
				.map(Some)
				.map_err(|e| invalid(e.to_string())),
			Some(other) => Err(invalid(format!("expected an integer, got {}", other))),
		}
	}
}
