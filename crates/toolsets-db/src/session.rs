//! Session abstraction.

use async_trait::async_trait;

use crate::entity::{Entity, PrimaryKey};
use crate::error::DbResult;

/// A unit-of-work handle on a database.
///
/// Transactions nest: `begin` on a session that already has an open
/// transaction starts a savepoint, and `commit`/`rollback` always act on the
/// innermost level.
#[async_trait]
pub trait Session: Send {
	/// Begins a transaction, or a savepoint if one is already active.
	async fn begin(&mut self) -> DbResult<()>;

	/// Commits the innermost transaction level.
	async fn commit(&mut self) -> DbResult<()>;

	/// Rolls back the innermost transaction level.
	async fn rollback(&mut self) -> DbResult<()>;

	/// Stages a new instance for insertion on the next flush.
	fn add(&mut self, entity: Box<dyn Entity>);

	/// Writes all staged instances.
	async fn flush(&mut self) -> DbResult<()>;

	/// Inserts or replaces an instance by primary key, returning the stored copy.
	async fn merge(&mut self, entity: Box<dyn Entity>) -> DbResult<Box<dyn Entity>>;

	/// Looks up an instance by model identifier and primary key.
	async fn get(&mut self, model_id: &str, key: &PrimaryKey) -> DbResult<Option<Box<dyn Entity>>>;

	/// Returns the number of open transaction levels.
	fn transaction_depth(&self) -> usize;

	/// Returns true if a transaction is active.
	fn in_transaction(&self) -> bool {
		self.transaction_depth() > 0
	}
}
