//! Fixture settings.
//!
//! Settings are read from the `[fixtures]` table of a TOML document:
//!
//! ```toml
//! [fixtures]
//! default_strategy = "skip_existing"
//! default_contexts = ["base", "development"]
//! ```
//!
//! Missing keys, or a missing table, fall back to merge and the base context.

use std::path::Path;

use serde::Deserialize;

use crate::context::{Context, LoadStrategy};
use crate::error::{FixtureError, FixtureResult};

/// Defaults applied when a caller does not choose a strategy or contexts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSettings {
	/// Strategy used when none is given.
	pub default_strategy: LoadStrategy,
	/// Contexts loaded when none are given.
	pub default_contexts: Vec<Context>,
}

impl Default for FixtureSettings {
	fn default() -> Self {
		Self {
			default_strategy: LoadStrategy::default(),
			default_contexts: vec![Context::Base],
		}
	}
}

#[derive(Deserialize)]
struct SettingsDocument {
	#[serde(default)]
	fixtures: FixtureSettings,
}

impl FixtureSettings {
	/// Creates the default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the default strategy.
	pub fn with_default_strategy(mut self, strategy: LoadStrategy) -> Self {
		self.default_strategy = strategy;
		self
	}

	/// Sets the default contexts.
	pub fn with_default_contexts(mut self, contexts: Vec<Context>) -> Self {
		self.default_contexts = contexts;
		self
	}

	/// Parses settings from the `[fixtures]` table of a TOML document.
	pub fn from_toml_str(source: &str) -> FixtureResult<Self> {
		let document: SettingsDocument =
			toml::from_str(source).map_err(|e| FixtureError::Settings(e.to_string()))?;
		Ok(document.fixtures)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)
			.map_err(|e| FixtureError::Settings(format!("{}: {}", path.display(), e)))?;
		Self::from_toml_str(&source)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_defaults() {
		let settings = FixtureSettings::default();
		assert_eq!(settings.default_strategy, LoadStrategy::Merge);
		assert_eq!(settings.default_contexts, vec![Context::Base]);
	}

	#[rstest]
	fn test_from_toml_str() {
		// Arrange
		let source = r#"
[project]
name = "demo"

[fixtures]
default_strategy = "skip_existing"
default_contexts = ["base", "qa"]
"#;

		// Act
		let settings = FixtureSettings::from_toml_str(source).unwrap();

		// Assert
		assert_eq!(settings.default_strategy, LoadStrategy::SkipExisting);
		assert_eq!(
			settings.default_contexts,
			vec![Context::Base, Context::Custom("qa".to_string())]
		);
	}

	#[rstest]
	#[case("")]
	#[case("[other]\nkey = 1\n")]
	#[case("[fixtures]\n")]
	fn test_missing_values_use_defaults(#[case] source: &str) {
		let settings = FixtureSettings::from_toml_str(source).unwrap();
		assert_eq!(settings, FixtureSettings::default());
	}

	#[rstest]
	#[case("[fixtures]\ndefault_strategy = \"upsert\"\n")]
	#[case("[fixtures]\nunknown = true\n")]
	#[case("not toml at all = = =")]
	fn test_invalid_settings(#[case] source: &str) {
		let result = FixtureSettings::from_toml_str(source);
		assert!(matches!(result, Err(FixtureError::Settings(_))));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = NamedTempFile::with_suffix(".toml").unwrap();
		writeln!(file, "[fixtures]\ndefault_strategy = \"insert\"").unwrap();

		let settings = FixtureSettings::from_file(file.path()).unwrap();

		assert_eq!(settings.default_strategy, LoadStrategy::Insert);
		assert_eq!(settings.default_contexts, vec![Context::Base]);
	}

	#[rstest]
	fn test_from_missing_file() {
		let result = FixtureSettings::from_file("/nonexistent/toolsets.toml");
		assert!(matches!(result, Err(FixtureError::Settings(_))));
	}
}
