//! Fixture contexts and load strategies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;

/// Selection tag grouping fixtures by environment.
///
/// Contexts are plain tags: no context implies another one. Besides the
/// well-known values any other name can be used through [`Context::Custom`].
///
/// # Example
///
/// ```
/// use toolsets_fixtures::Context;
///
/// assert_eq!("testing".parse::<Context>().unwrap(), Context::Testing);
/// assert_eq!(Context::from("staging"), Context::Custom("staging".into()));
/// assert_eq!(Context::default().as_str(), "base");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Context {
	/// Fixtures loaded in every environment.
	#[default]
	Base,
	/// Production-only fixtures.
	Production,
	/// Development fixtures.
	Development,
	/// Test fixtures.
	Testing,
	/// Any other application-defined context.
	Custom(String),
}

impl Context {
	/// Returns the string form of the context.
	pub fn as_str(&self) -> &str {
		match self {
			Context::Base => "base",
			Context::Production => "production",
			Context::Development => "development",
			Context::Testing => "testing",
			Context::Custom(name) => name,
		}
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Context {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"base" => Context::Base,
			"production" => Context::Production,
			"development" => Context::Development,
			"testing" => Context::Testing,
			other => Context::Custom(other.to_string()),
		})
	}
}

impl From<&str> for Context {
	fn from(s: &str) -> Self {
		match s.parse() {
			Ok(context) => context,
			Err(never) => match never {},
		}
	}
}

impl From<String> for Context {
	fn from(s: String) -> Self {
		Context::from(s.as_str())
	}
}

impl From<Context> for String {
	fn from(context: Context) -> Self {
		match context {
			Context::Custom(name) => name,
			other => other.as_str().to_string(),
		}
	}
}

/// How loaded instances are reconciled with rows that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
	/// Stage every instance for creation; duplicate keys fail.
	Insert,
	/// Upsert every instance by primary key.
	#[default]
	Merge,
	/// Create only instances whose primary key is not stored yet.
	SkipExisting,
}

impl LoadStrategy {
	/// All strategies, in documentation order.
	pub const ALL: [LoadStrategy; 3] = [
		LoadStrategy::Merge,
		LoadStrategy::Insert,
		LoadStrategy::SkipExisting,
	];

	/// Returns the string form of the strategy.
	pub fn as_str(&self) -> &'static str {
		match self {
			LoadStrategy::Insert => "insert",
			LoadStrategy::Merge => "merge",
			LoadStrategy::SkipExisting => "skip_existing",
		}
	}
}

impl fmt::Display for LoadStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LoadStrategy {
	type Err = FixtureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		LoadStrategy::ALL
			.into_iter()
			.find(|strategy| strategy.as_str() == s)
			.ok_or_else(|| FixtureError::InvalidStrategy(s.to_string()))
	}
}
