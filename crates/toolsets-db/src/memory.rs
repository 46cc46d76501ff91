//! In-memory storage backend.
//!
//! `MemoryDatabase` keeps rows in per-model tables keyed by primary key and is
//! shared between sessions. Each `MemorySession` stages added rows until the
//! next flush and implements savepoints by snapshotting the tables on `begin`.
//! Snapshots cover the whole database, so concurrent writers on separate
//! sessions should not interleave transactions.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::entity::{Entity, Model, PrimaryKey};
use crate::error::{DbError, DbResult};
use crate::session::Session;

type Table = IndexMap<String, Box<dyn Entity>>;

#[derive(Debug, Clone, Default)]
struct Tables {
	rows: IndexMap<&'static str, Table>,
	next_surrogate: u64,
}

impl Tables {
	fn row_key(&mut self, key: &PrimaryKey) -> String {
		if key.is_set() {
			key.cache_key()
		} else {
			self.next_surrogate += 1;
			format!("auto:{}", self.next_surrogate)
		}
	}

	fn insert(&mut self, entity: Box<dyn Entity>) -> DbResult<()> {
		let key = entity.key();
		let row_key = self.row_key(&key);
		let table = self.rows.entry(entity.model_id()).or_default();
		if table.contains_key(&row_key) {
			return Err(DbError::Integrity {
				model: entity.model_id().to_string(),
				key: key.to_string(),
			});
		}
		table.insert(row_key, entity);
		Ok(())
	}

	fn upsert(&mut self, entity: Box<dyn Entity>) {
		let row_key = self.row_key(&entity.key());
		self.rows
			.entry(entity.model_id())
			.or_default()
			.insert(row_key, entity);
	}

	fn lookup(&self, model_id: &str, key: &PrimaryKey) -> Option<&(dyn Entity + 'static)> {
		if !key.is_set() {
			return None;
		}
		self.rows
			.get(model_id)
			.and_then(|table| table.get(&key.cache_key()))
			.map(|row| &**row)
	}
}

/// Shared in-memory database.
///
/// Cloning is cheap and every clone refers to the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
	inner: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
	/// Creates an empty database.
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens a new session on this database.
	pub fn session(&self) -> MemorySession {
		MemorySession {
			database: self.clone(),
			savepoints: Vec::new(),
			pending: Vec::new(),
		}
	}

	/// Returns the number of stored rows for a model.
	pub fn count(&self, model_id: &str) -> usize {
		self.inner
			.read()
			.rows
			.get(model_id)
			.map_or(0, |table| table.len())
	}

	/// Returns true if a row with the given key exists.
	pub fn contains(&self, model_id: &str, key: &PrimaryKey) -> bool {
		self.inner.read().lookup(model_id, key).is_some()
	}

	/// Fetches a typed copy of the row with the given key.
	pub fn fetch<M: Model>(&self, key: &PrimaryKey) -> Option<M> {
		self.inner
			.read()
			.lookup(M::MODEL_ID, key)
			.and_then(|row| row.downcast_ref::<M>())
			.cloned()
	}

	/// Returns typed copies of every stored row of a model, in insertion order.
	pub fn all<M: Model>(&self) -> Vec<M> {
		self.inner
			.read()
			.rows
			.get(M::MODEL_ID)
			.map(|table| {
				table
					.values()
					.filter_map(|row| row.downcast_ref::<M>())
					.cloned()
					.collect()
			})
			.unwrap_or_default()
	}

	/// Removes every row.
	pub fn clear(&self) {
		*self.inner.write() = Tables::default();
	}
}

/// A session on a [`MemoryDatabase`].
///
/// Dropping a session with an open transaction rolls the database back to the
/// state it had before the outermost `begin`.
#[derive(Debug)]
pub struct MemorySession {
	database: MemoryDatabase,
	savepoints: Vec<Tables>,
	pending: Vec<Box<dyn Entity>>,
}

impl MemorySession {
	/// Returns the database this session writes to.
	pub fn database(&self) -> &MemoryDatabase {
		&self.database
	}

	/// Returns the number of staged, unflushed rows.
	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	fn flush_pending(&mut self) -> DbResult<()> {
		if self.pending.is_empty() {
			return Ok(());
		}
		let pending = std::mem::take(&mut self.pending);
		let mut guard = self.database.inner.write();
		// Apply to a copy so a failed flush leaves no partial writes.
		let mut staged = guard.clone();
		for entity in pending {
			staged.insert(entity)?;
		}
		*guard = staged;
		Ok(())
	}
}

#[async_trait]
impl Session for MemorySession {
	async fn begin(&mut self) -> DbResult<()> {
		self.flush_pending()?;
		let snapshot = self.database.inner.read().clone();
		self.savepoints.push(snapshot);
		tracing::trace!(depth = self.savepoints.len(), "memory transaction begun");
		Ok(())
	}

	async fn commit(&mut self) -> DbResult<()> {
		if self.savepoints.is_empty() {
			return Err(DbError::NoActiveTransaction);
		}
		self.flush_pending()?;
		self.savepoints.pop();
		Ok(())
	}

	async fn rollback(&mut self) -> DbResult<()> {
		let snapshot = self.savepoints.pop().ok_or(DbError::NoActiveTransaction)?;
		self.pending.clear();
		*self.database.inner.write() = snapshot;
		tracing::trace!(depth = self.savepoints.len(), "memory transaction rolled back");
		Ok(())
	}

	fn add(&mut self, entity: Box<dyn Entity>) {
		self.pending.push(entity);
	}

	async fn flush(&mut self) -> DbResult<()> {
		self.flush_pending()
	}

	async fn merge(&mut self, entity: Box<dyn Entity>) -> DbResult<Box<dyn Entity>> {
		self.flush_pending()?;
		let stored = entity.clone();
		self.database.inner.write().upsert(entity);
		Ok(stored)
	}

	async fn get(&mut self, model_id: &str, key: &PrimaryKey) -> DbResult<Option<Box<dyn Entity>>> {
		self.flush_pending()?;
		Ok(self
			.database
			.inner
			.read()
			.lookup(model_id, key)
			.map(|row| row.clone_entity()))
	}

	fn transaction_depth(&self) -> usize {
		self.savepoints.len()
	}
}

impl Drop for MemorySession {
	fn drop(&mut self) {
		if let Some(outermost) = self.savepoints.drain(..).next() {
			tracing::warn!("MemorySession dropped inside a transaction, rolling back");
			*self.database.inner.write() = outermost;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::IntoEntity;
	use rstest::{fixture, rstest};

	#[derive(Debug, Clone, PartialEq)]
	struct Role {
		id: Option<i64>,
		name: String,
	}

	impl Model for Role {
		const MODEL_ID: &'static str = "auth.Role";

		fn primary_key(&self) -> PrimaryKey {
			PrimaryKey::new(self.id)
		}
	}

	fn role(id: i64, name: &str) -> Box<dyn Entity> {
		Role {
			id: Some(id),
			name: name.to_string(),
		}
		.into_entity()
	}

	#[fixture]
	fn db() -> MemoryDatabase {
		MemoryDatabase::new()
	}

	#[rstest]
	#[tokio::test]
	async fn test_add_is_staged_until_flush(db: MemoryDatabase) {
		// Arrange
		let mut session = db.session();

		// Act
		session.add(role(1, "admin"));

		// Assert
		assert_eq!(session.pending_count(), 1);
		assert_eq!(db.count(Role::MODEL_ID), 0);
		session.flush().await.unwrap();
		assert_eq!(db.count(Role::MODEL_ID), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_duplicate_key_is_rejected_atomically(db: MemoryDatabase) {
		// Arrange
		let mut session = db.session();
		session.add(role(1, "admin"));
		session.flush().await.unwrap();

		// Act
		session.add(role(2, "user"));
		session.add(role(1, "again"));
		let result = session.flush().await;

		// Assert
		assert!(matches!(result, Err(DbError::Integrity { .. })));
		assert_eq!(db.count(Role::MODEL_ID), 1);
		assert_eq!(session.pending_count(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unset_keys_get_surrogates(db: MemoryDatabase) {
		let mut session = db.session();
		for name in ["a", "b"] {
			session.add(
				Role {
					id: None,
					name: name.to_string(),
				}
				.into_entity(),
			);
		}
		session.flush().await.unwrap();
		assert_eq!(db.count(Role::MODEL_ID), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_merge_replaces_existing_row(db: MemoryDatabase) {
		// Arrange
		let mut session = db.session();
		session.merge(role(1, "original")).await.unwrap();

		// Act
		let merged = session.merge(role(1, "updated")).await.unwrap();

		// Assert
		assert_eq!(db.count(Role::MODEL_ID), 1);
		assert_eq!(
			merged.downcast_ref::<Role>().map(|r| r.name.as_str()),
			Some("updated")
		);
		assert_eq!(
			db.fetch::<Role>(&PrimaryKey::new(1)).map(|r| r.name),
			Some("updated".to_string())
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_autoflushes(db: MemoryDatabase) {
		let mut session = db.session();
		session.add(role(5, "staged"));
		let found = session.get(Role::MODEL_ID, &PrimaryKey::new(5)).await.unwrap();
		assert!(found.is_some());
		let missing = session.get(Role::MODEL_ID, &PrimaryKey::new(6)).await.unwrap();
		assert!(missing.is_none());
	}

	#[rstest]
	#[tokio::test]
	async fn test_rollback_restores_snapshot(db: MemoryDatabase) {
		// Arrange
		let mut session = db.session();
		session.add(role(1, "kept"));
		session.flush().await.unwrap();

		// Act
		session.begin().await.unwrap();
		session.add(role(2, "discarded"));
		session.flush().await.unwrap();
		session.rollback().await.unwrap();

		// Assert
		assert_eq!(db.all::<Role>(), vec![Role {
			id: Some(1),
			name: "kept".to_string()
		}]);
		assert_eq!(session.transaction_depth(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_commit_without_transaction_fails(db: MemoryDatabase) {
		let mut session = db.session();
		assert!(matches!(
			session.commit().await,
			Err(DbError::NoActiveTransaction)
		));
		assert!(matches!(
			session.rollback().await,
			Err(DbError::NoActiveTransaction)
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_dropping_session_rolls_back_open_transaction(db: MemoryDatabase) {
		{
			let mut session = db.session();
			session.begin().await.unwrap();
			session.merge(role(9, "temp")).await.unwrap();
			assert_eq!(db.count(Role::MODEL_ID), 1);
		}
		assert_eq!(db.count(Role::MODEL_ID), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_clear_removes_rows(db: MemoryDatabase) {
		let mut session = db.session();
		session.add(role(1, "admin"));
		session.flush().await.unwrap();
		assert!(db.contains(Role::MODEL_ID, &PrimaryKey::new(1)));

		db.clear();

		assert!(db.all::<Role>().is_empty());
		assert!(!db.contains(Role::MODEL_ID, &PrimaryKey::new(1)));
	}
}
