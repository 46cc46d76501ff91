//! Session wrapper that records transaction activity.

#![allow(dead_code)]

use async_trait::async_trait;
use toolsets_db::{DbResult, Entity, MemoryDatabase, MemorySession, PrimaryKey, Session};

/// Delegates to a [`MemorySession`] and counts transaction calls.
#[derive(Debug)]
pub struct RecordingSession {
	inner: MemorySession,
	pub begins: usize,
	pub commits: usize,
	pub rollbacks: usize,
	pub max_depth: usize,
}

impl RecordingSession {
	pub fn new(db: &MemoryDatabase) -> Self {
		Self {
			inner: db.session(),
			begins: 0,
			commits: 0,
			rollbacks: 0,
			max_depth: 0,
		}
	}
}

#[async_trait]
impl Session for RecordingSession {
	async fn begin(&mut self) -> DbResult<()> {
		self.inner.begin().await?;
		self.begins += 1;
		self.max_depth = self.max_depth.max(self.inner.transaction_depth());
		Ok(())
	}

	async fn commit(&mut self) -> DbResult<()> {
		self.commits += 1;
		self.inner.commit().await
	}

	async fn rollback(&mut self) -> DbResult<()> {
		self.rollbacks += 1;
		self.inner.rollback().await
	}

	fn add(&mut self, entity: Box<dyn Entity>) {
		self.inner.add(entity);
	}

	async fn flush(&mut self) -> DbResult<()> {
		self.inner.flush().await
	}

	async fn merge(&mut self, entity: Box<dyn Entity>) -> DbResult<Box<dyn Entity>> {
		self.inner.merge(entity).await
	}

	async fn get(&mut self, model_id: &str, key: &PrimaryKey) -> DbResult<Option<Box<dyn Entity>>> {
		self.inner.get(model_id, key).await
	}

	fn transaction_depth(&self) -> usize {
		self.inner.transaction_depth()
	}
}
