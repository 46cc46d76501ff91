//! Transaction scopes
//!
//! [`TransactionScope`] opens one transaction level on a [`Session`] and must be
//! finished with [`TransactionScope::commit`] or [`TransactionScope::rollback`].
//! When the session already has an open transaction the scope is a savepoint,
//! so a failed inner scope leaves the outer work intact.
//!
//! ## Example
//!
//! ```rust
//! use toolsets_db::{MemoryDatabase, Session, TransactionScope};
//!
//! # async fn example() -> toolsets_db::DbResult<()> {
//! let db = MemoryDatabase::new();
//! let mut session = db.session();
//!
//! let outer = TransactionScope::begin(&mut session).await?;
//! assert!(!outer.is_savepoint());
//! outer.commit().await?;
//!
//! assert_eq!(session.transaction_depth(), 0);
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example()).unwrap();
//! ```

use crate::error::DbResult;
use crate::session::Session;

/// RAII handle over one transaction level of a session.
///
/// Dropping a scope without committing or rolling back only logs a warning;
/// the open level stays on the session until the caller resolves it.
pub struct TransactionScope<'a, S: Session + ?Sized> {
	session: &'a mut S,
	depth: usize,
	finished: bool,
}

impl<'a, S: Session + ?Sized> TransactionScope<'a, S> {
	/// Begins a new transaction level on the session.
	pub async fn begin(session: &'a mut S) -> DbResult<Self> {
		session.begin().await?;
		let depth = session.transaction_depth();
		tracing::trace!(depth, "transaction scope opened");
		Ok(Self {
			session,
			depth,
			finished: false,
		})
	}

	/// Returns the session this scope operates on.
	pub fn session(&mut self) -> &mut S {
		self.session
	}

	/// Returns the nesting depth of this scope (1 for the outermost level).
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns true if this scope is a savepoint inside another transaction.
	pub fn is_savepoint(&self) -> bool {
		self.depth > 1
	}

	/// Commits this level.
	///
	/// If the commit fails the level is rolled back before the error is
	/// returned.
	pub async fn commit(mut self) -> DbResult<()> {
		self.finished = true;
		match self.session.commit().await {
			Ok(()) => {
				tracing::trace!(depth = self.depth, "transaction scope committed");
				Ok(())
			}
			Err(e) => {
				if self.session.transaction_depth() >= self.depth
					&& let Err(rollback_err) = self.session.rollback().await
				{
					tracing::warn!(
						error = %rollback_err,
						depth = self.depth,
						"rollback after failed commit also failed"
					);
				}
				Err(e)
			}
		}
	}

	/// Rolls back this level.
	pub async fn rollback(mut self) -> DbResult<()> {
		self.finished = true;
		self.session.rollback().await?;
		tracing::trace!(depth = self.depth, "transaction scope rolled back");
		Ok(())
	}
}

impl<S: Session + ?Sized> Drop for TransactionScope<'_, S> {
	fn drop(&mut self) {
		if !self.finished {
			tracing::warn!(
				depth = self.depth,
				"TransactionScope dropped without explicit commit or rollback"
			);
		}
	}
}
