//! Error types for fixture registration, resolution and loading.

use thiserror::Error;
use toolsets_db::DbError;

/// Errors that can occur while resolving or loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// A fixture or one of its dependencies is not registered.
	#[error("Fixture '{0}' not found")]
	NotFound(String),

	/// The dependency graph reachable from the request contains a cycle.
	#[error("Circular dependency detected: {name}")]
	CircularDependency {
		/// Fixture at which the cycle was detected.
		name: String,
	},

	/// A strategy selector did not match any load strategy.
	#[error("Invalid strategy: {0}. Use: merge, insert, skip_existing")]
	InvalidStrategy(String),

	/// Storage failure, passed through unchanged.
	#[error(transparent)]
	Database(#[from] DbError),

	/// Fixture settings could not be read.
	#[error("Settings error: {0}")]
	Settings(String),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_not_found_error() {
		let error = FixtureError::NotFound("roles".to_string());
		assert_eq!(error.to_string(), "Fixture 'roles' not found");
	}

	#[rstest]
	fn test_circular_dependency_error() {
		let error = FixtureError::CircularDependency {
			name: "a".to_string(),
		};
		assert_eq!(error.to_string(), "Circular dependency detected: a");
	}

	#[rstest]
	fn test_database_error_is_transparent() {
		let error: FixtureError = DbError::NoActiveTransaction.into();
		assert!(matches!(error, FixtureError::Database(_)));
		assert_eq!(error.to_string(), "No active transaction");
	}
}
