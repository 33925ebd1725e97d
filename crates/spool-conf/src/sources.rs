//! Configuration sources for the layered settings system
//!
//! Every source yields a flat map of dotted keys (`store.url`,
//! `form.reset_delay_ms`). The builder merges them by [`ConfigSource::priority`].

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Default prefix for environment variables
pub const ENV_PREFIX: &str = "SPOOL_";

/// Separator between a table name and a key in environment variable names
const ENV_NESTING_SEPARATOR: &str = "__";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Built-in defaults
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Defaults for every optional key
	///
	/// # Examples
	///
	/// ```
	/// use spool_conf::{ConfigSource, DefaultSource};
	///
	/// let values = DefaultSource::new().load().unwrap();
	/// assert_eq!(values["store.collection"], "waitlist");
	/// assert_eq!(values["form.reset_delay_ms"], 3000);
	/// ```
	pub fn new() -> Self {
		let mut values = IndexMap::new();
		values.insert("store.collection".to_string(), Value::from("waitlist"));
		values.insert("store.timeout_secs".to_string(), Value::from(30u64));
		values.insert("form.reset_delay_ms".to_string(), Value::from(3000u64));
		Self { values }
	}

	/// Override or add a default value
	pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Built-in defaults".to_string()
	}
}

/// TOML file configuration source
///
/// A missing file yields no values.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let table: toml::Table = toml::from_str(&content)?;
		let json_value = serde_json::to_value(table)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		let mut flat = IndexMap::new();
		for (key, value) in map {
			flatten_into(&mut flat, key, value);
		}
		Ok(flat)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

fn flatten_into(out: &mut IndexMap<String, Value>, prefix: &str, value: &Value) {
	match value {
		Value::Object(table) => {
			for (key, nested) in table {
				flatten_into(out, &format!("{}.{}", prefix, key), nested);
			}
		}
		other => {
			out.insert(prefix.to_string(), other.clone());
		}
	}
}

/// Environment variable configuration source
///
/// `SPOOL_STORE__ANON_KEY` becomes `store.anon_key`. Values stay strings and
/// are parsed when settings are built.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Read from the process environment with the default prefix
	pub fn new() -> Self {
		Self {
			prefix: ENV_PREFIX.to_string(),
			vars: None,
		}
	}

	/// Read from a fixed set of variables instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use spool_conf::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::from_vars([
	///     ("SPOOL_STORE__URL", "https://project.supabase.co"),
	///     ("HOME", "/root"),
	/// ]);
	/// let values = source.load().unwrap();
	/// assert_eq!(values["store.url"], "https://project.supabase.co");
	/// assert_eq!(values.len(), 1);
	/// ```
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: ENV_PREFIX.to_string(),
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	/// Set the prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn key_for(&self, var: &str) -> Option<String> {
		let rest = var.strip_prefix(&self.prefix)?;
		if rest.is_empty() {
			return None;
		}
		Some(rest.to_lowercase().replace(ENV_NESTING_SEPARATOR, "."))
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		Ok(vars
			.into_iter()
			.filter_map(|(var, value)| self.key_for(&var).map(|key| (key, Value::String(value))))
			.collect())
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_toml_source_flattens_tables() {
		// Arrange
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[store]\nurl = \"https://project.supabase.co\"\ntimeout_secs = 10\n\n[form]\nreset_delay_ms = 1500"
		)
		.unwrap();
		let source = TomlFileSource::new(file.path());

		// Act
		let values = source.load().unwrap();

		// Assert
		assert_eq!(values["store.url"], "https://project.supabase.co");
		assert_eq!(values["store.timeout_secs"], 10);
		assert_eq!(values["form.reset_delay_ms"], 1500);
	}

	#[rstest]
	fn test_missing_toml_file_is_empty() {
		let source = TomlFileSource::new("/nonexistent/spool.toml");

		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_malformed_toml_is_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[store\nurl = ").unwrap();

		let result = TomlFileSource::new(file.path()).load();

		assert!(matches!(result, Err(SourceError::Toml(_))));
	}

	#[rstest]
	#[case("SPOOL_STORE__ANON_KEY", Some("store.anon_key"))]
	#[case("SPOOL_FORM__RESET_DELAY_MS", Some("form.reset_delay_ms"))]
	#[case("SPOOL_", None)]
	#[case("OTHER_STORE__URL", None)]
	fn test_env_key_mapping(#[case] var: &str, #[case] expected: Option<&str>) {
		let source = EnvSource::new();

		assert_eq!(source.key_for(var).as_deref(), expected);
	}

	#[rstest]
	fn test_env_custom_prefix() {
		let source = EnvSource::from_vars([("WAITLIST_STORE__URL", "http://localhost")])
			.with_prefix("WAITLIST_");

		let values = source.load().unwrap();

		assert_eq!(values["store.url"], "http://localhost");
	}
}
