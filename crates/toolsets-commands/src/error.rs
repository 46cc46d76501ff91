//! Error types for management commands.

use thiserror::Error;
use toolsets_fixtures::FixtureError;

/// Errors returned by fixture commands.
#[derive(Debug, Error)]
pub enum CommandError {
	/// The requested strategy is not a known load strategy.
	#[error("Invalid strategy: {0}. Use: merge, insert, skip_existing")]
	InvalidStrategy(String),

	/// Fixture resolution or loading failed.
	#[error(transparent)]
	Fixture(#[from] FixtureError),
}

impl CommandError {
	/// Returns the process exit status for this error.
	///
	/// Storage failures exit with 2; invalid input and resolution errors
	/// exit with 1.
	pub fn exit_code(&self) -> i32 {
		match self {
			CommandError::Fixture(FixtureError::Database(_)) => 2,
			CommandError::InvalidStrategy(_) | CommandError::Fixture(_) => 1,
		}
	}
}

/// Result type alias for command execution.
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use toolsets_db::DbError;

	#[rstest]
	fn test_invalid_strategy_message() {
		let error = CommandError::InvalidStrategy("upsert".to_string());
		assert_eq!(
			error.to_string(),
			"Invalid strategy: upsert. Use: merge, insert, skip_existing"
		);
	}

	#[rstest]
	#[case(CommandError::InvalidStrategy("x".to_string()), 1)]
	#[case(CommandError::Fixture(FixtureError::NotFound("roles".to_string())), 1)]
	#[case(CommandError::Fixture(FixtureError::CircularDependency { name: "a".to_string() }), 1)]
	#[case(CommandError::Fixture(FixtureError::Database(DbError::NoActiveTransaction)), 2)]
	#[case(CommandError::Fixture(FixtureError::Database(DbError::Backend("down".to_string()))), 2)]
	fn test_exit_codes(#[case] error: CommandError, #[case] expected: i32) {
		assert_eq!(error.exit_code(), expected);
	}

	#[rstest]
	fn test_fixture_error_passes_through() {
		let error: CommandError = FixtureError::NotFound("roles".to_string()).into();
		assert_eq!(error.to_string(), "Fixture 'roles' not found");
	}
}
