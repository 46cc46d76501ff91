//! Error types for storage sessions.

use thiserror::Error;

/// Errors raised by a [`Session`](crate::Session) implementation.
#[derive(Debug, Error)]
pub enum DbError {
	/// A row with the same primary key already exists.
	#[error("Integrity error: duplicate primary key {key} for {model}")]
	Integrity {
		/// Model identifier of the conflicting row.
		model: String,
		/// Rendered primary key of the conflicting row.
		key: String,
	},

	/// Commit or rollback was requested outside a transaction.
	#[error("No active transaction")]
	NoActiveTransaction,

	/// Transaction bookkeeping failed.
	#[error("Transaction error: {0}")]
	Transaction(String),

	/// The storage backend reported a failure.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Result type alias for storage operations.
pub type DbResult<T> = Result<T, DbError>;
