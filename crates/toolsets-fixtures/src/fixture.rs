//! Fixture definitions.

use std::fmt;
use std::sync::Arc;

use toolsets_db::{Entity, IntoEntity};

use crate::context::Context;

/// Type-erased fixture producer.
pub type Producer = Arc<dyn Fn() -> Vec<Box<dyn Entity>> + Send + Sync>;

/// Wraps a typed producer into a [`Producer`].
pub(crate) fn erase<F, I>(producer: F) -> Producer
where
	F: Fn() -> I + Send + Sync + 'static,
	I: IntoIterator,
	I::Item: IntoEntity,
{
	Arc::new(move || producer().into_iter().map(IntoEntity::into_entity).collect())
}

/// A named, dependency-aware unit of seed data.
#[derive(Clone)]
pub struct Fixture {
	/// Unique fixture name.
	pub name: String,
	/// Fixtures that must be loaded before this one, in order.
	pub depends_on: Vec<String>,
	/// Contexts this fixture belongs to. Never empty.
	pub contexts: Vec<Context>,
	producer: Producer,
}

impl Fixture {
	/// Creates a fixture in the base context with no dependencies.
	pub fn new<F, I>(name: impl Into<String>, producer: F) -> Self
	where
		F: Fn() -> I + Send + Sync + 'static,
		I: IntoIterator,
		I::Item: IntoEntity,
	{
		Self {
			name: name.into(),
			depends_on: Vec::new(),
			contexts: vec![Context::Base],
			producer: erase(producer),
		}
	}

	/// Sets the dependencies.
	pub fn with_depends_on<I, S>(mut self, depends_on: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.depends_on = depends_on.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the contexts. Duplicates are dropped; an empty list means base.
	pub fn with_contexts<I, C>(mut self, contexts: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Context>,
	{
		let mut unique: Vec<Context> = Vec::new();
		for context in contexts.into_iter().map(Into::into) {
			if !unique.contains(&context) {
				unique.push(context);
			}
		}
		if unique.is_empty() {
			unique.push(Context::Base);
		}
		self.contexts = unique;
		self
	}

	/// Runs the producer and returns the instances it yields.
	pub fn produce(&self) -> Vec<Box<dyn Entity>> {
		(self.producer)()
	}

	/// Returns true if the fixture is tagged with any of the given contexts.
	pub fn belongs_to(&self, contexts: &[Context]) -> bool {
		self.contexts.iter().any(|c| contexts.contains(c))
	}
}

impl fmt::Debug for Fixture {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Fixture")
			.field("name", &self.name)
			.field("depends_on", &self.depends_on)
			.field("contexts", &self.contexts)
			.finish_non_exhaustive()
	}
}
