//! Fixture loading.
//!
//! The loader walks a resolved fixture order and writes each fixture's
//! instances through a [`Session`]. Every fixture is applied inside its own
//! [`TransactionScope`]: a failure rolls back only the fixture being loaded,
//! while fixtures committed before it stay committed. With
//! [`LoadOptions::with_atomic`] the whole batch runs inside one outer
//! transaction and the per-fixture scopes become savepoints.

use indexmap::IndexMap;
use toolsets_db::{Entity, Model, Session, TransactionScope};

use crate::context::{Context, LoadStrategy};
use crate::error::FixtureResult;
use crate::registry::FixtureRegistry;

/// Options controlling how fixtures are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// How instances are reconciled with existing rows.
	pub strategy: LoadStrategy,

	/// Wrap the whole batch in one outer transaction.
	pub atomic: bool,
}

impl LoadOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the load strategy.
	pub fn with_strategy(mut self, strategy: LoadStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Sets the atomic flag.
	pub fn with_atomic(mut self, atomic: bool) -> Self {
		self.atomic = atomic;
		self
	}
}

/// Instances loaded per fixture, in load order.
#[derive(Debug, Default)]
pub struct LoadResult {
	loaded: IndexMap<String, Vec<Box<dyn Entity>>>,
}

impl LoadResult {
	fn record(&mut self, name: &str, instances: Vec<Box<dyn Entity>>) {
		self.loaded.insert(name.to_string(), instances);
	}

	/// Returns the instances loaded for a fixture.
	pub fn get(&self, name: &str) -> Option<&[Box<dyn Entity>]> {
		self.loaded.get(name).map(Vec::as_slice)
	}

	/// Returns true if the fixture was part of the load.
	pub fn contains(&self, name: &str) -> bool {
		self.loaded.contains_key(name)
	}

	/// Returns the number of fixtures processed.
	pub fn len(&self) -> usize {
		self.loaded.len()
	}

	/// Returns true if no fixture was processed.
	pub fn is_empty(&self) -> bool {
		self.loaded.is_empty()
	}

	/// Returns the processed fixture names in load order.
	pub fn names(&self) -> Vec<&str> {
		self.loaded.keys().map(String::as_str).collect()
	}

	/// Returns the total number of loaded instances across all fixtures.
	pub fn total_records(&self) -> usize {
		self.loaded.values().map(Vec::len).sum()
	}

	/// Returns typed copies of the instances of model `M` loaded for a fixture.
	pub fn instances<M: Model>(&self, name: &str) -> Vec<M> {
		self.get(name)
			.unwrap_or_default()
			.iter()
			.filter_map(|entity| entity.downcast_ref::<M>())
			.cloned()
			.collect()
	}

	/// Iterates over `(fixture name, loaded instances)` in load order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[Box<dyn Entity>])> {
		self.loaded
			.iter()
			.map(|(name, instances)| (name.as_str(), instances.as_slice()))
	}
}

/// A fixture as it would be loaded, without touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFixture {
	/// Fixture name.
	pub name: String,
	/// Number of instances the producer yields.
	pub count: usize,
	/// Model of the first instance, if any.
	pub model_id: Option<&'static str>,
}

/// Dry-run preview of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
	/// Strategy the load would use.
	pub strategy: LoadStrategy,
	/// Fixtures in load order.
	pub fixtures: Vec<PlannedFixture>,
}

impl LoadPlan {
	/// Returns true if there is nothing to load.
	pub fn is_empty(&self) -> bool {
		self.fixtures.is_empty()
	}

	/// Returns the total number of instances across all fixtures.
	pub fn total_records(&self) -> usize {
		self.fixtures.iter().map(|f| f.count).sum()
	}
}

/// Loads fixtures from a registry into a session.
///
/// # Example
///
/// ```ignore
/// let loader = FixtureLoader::new(&registry)
///     .with_options(LoadOptions::new().with_strategy(LoadStrategy::SkipExisting));
/// let result = loader.load_by_context(&mut session, &[Context::Base]).await?;
/// println!("Loaded {} records", result.total_records());
/// ```
#[derive(Debug, Clone)]
pub struct FixtureLoader<'r> {
	registry: &'r FixtureRegistry,
	options: LoadOptions,
}

impl<'r> FixtureLoader<'r> {
	/// Creates a loader with default options.
	pub fn new(registry: &'r FixtureRegistry) -> Self {
		Self {
			registry,
			options: LoadOptions::default(),
		}
	}

	/// Replaces the load options.
	pub fn with_options(mut self, options: LoadOptions) -> Self {
		self.options = options;
		self
	}

	/// Returns the load options.
	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	/// Loads the named fixtures and their dependencies.
	pub async fn load<S, N>(&self, session: &mut S, names: &[N]) -> FixtureResult<LoadResult>
	where
		S: Session + ?Sized,
		N: AsRef<str>,
	{
		let ordered = self.registry.resolve_dependencies(names)?;
		self.run(session, &ordered).await
	}

	/// Loads every fixture of the given contexts and their dependencies.
	pub async fn load_by_context<S>(
		&self,
		session: &mut S,
		contexts: &[Context],
	) -> FixtureResult<LoadResult>
	where
		S: Session + ?Sized,
	{
		let ordered = self.registry.resolve_context_dependencies(contexts)?;
		self.run(session, &ordered).await
	}

	/// Previews a load of the named fixtures.
	pub fn plan<N: AsRef<str>>(&self, names: &[N]) -> FixtureResult<LoadPlan> {
		let ordered = self.registry.resolve_dependencies(names)?;
		self.plan_ordered(&ordered)
	}

	/// Previews a load of the given contexts.
	pub fn plan_by_context(&self, contexts: &[Context]) -> FixtureResult<LoadPlan> {
		let ordered = self.registry.resolve_context_dependencies(contexts)?;
		self.plan_ordered(&ordered)
	}

	fn plan_ordered(&self, ordered: &[String]) -> FixtureResult<LoadPlan> {
		let mut fixtures = Vec::with_capacity(ordered.len());
		for name in ordered {
			let instances = self.registry.get(name)?.produce();
			fixtures.push(PlannedFixture {
				name: name.clone(),
				count: instances.len(),
				model_id: instances.first().map(|i| i.model_id()),
			});
		}
		Ok(LoadPlan {
			strategy: self.options.strategy,
			fixtures,
		})
	}

	async fn run<S>(&self, session: &mut S, ordered: &[String]) -> FixtureResult<LoadResult>
	where
		S: Session + ?Sized,
	{
		if !self.options.atomic {
			return load_ordered(session, self.registry, ordered, self.options.strategy).await;
		}

		let mut outer = TransactionScope::begin(session).await?;
		match load_ordered(outer.session(), self.registry, ordered, self.options.strategy).await {
			Ok(result) => {
				outer.commit().await?;
				Ok(result)
			}
			Err(e) => {
				if let Err(rollback_err) = outer.rollback().await {
					tracing::warn!(error = %rollback_err, "failed to roll back fixture batch");
				}
				Err(e)
			}
		}
	}
}

/// Loads the named fixtures and their dependencies.
///
/// Each fixture is committed in its own transaction (a savepoint when the
/// session already has one open).
pub async fn load_fixtures<S, N>(
	session: &mut S,
	registry: &FixtureRegistry,
	names: &[N],
	strategy: LoadStrategy,
) -> FixtureResult<LoadResult>
where
	S: Session + ?Sized,
	N: AsRef<str>,
{
	FixtureLoader::new(registry)
		.with_options(LoadOptions::new().with_strategy(strategy))
		.load(session, names)
		.await
}

/// Loads every fixture of the given contexts and their dependencies.
pub async fn load_fixtures_by_context<S>(
	session: &mut S,
	registry: &FixtureRegistry,
	contexts: &[Context],
	strategy: LoadStrategy,
) -> FixtureResult<LoadResult>
where
	S: Session + ?Sized,
{
	FixtureLoader::new(registry)
		.with_options(LoadOptions::new().with_strategy(strategy))
		.load_by_context(session, contexts)
		.await
}

async fn load_ordered<S>(
	session: &mut S,
	registry: &FixtureRegistry,
	ordered: &[String],
	strategy: LoadStrategy,
) -> FixtureResult<LoadResult>
where
	S: Session + ?Sized,
{
	let mut result = LoadResult::default();

	for name in ordered {
		let instances = registry.get(name)?.produce();
		let Some(model_id) = instances.first().map(|i| i.model_id()) else {
			result.record(name, Vec::new());
			continue;
		};

		let loaded = load_one(session, name, instances, strategy).await?;
		tracing::info!(
			fixture = %name,
			count = loaded.len(),
			model = model_id,
			"Loaded fixture '{}': {} {}(s)",
			name,
			loaded.len(),
			model_id
		);
		result.record(name, loaded);
	}

	Ok(result)
}

/// Applies one fixture inside its own transaction scope.
async fn load_one<S>(
	session: &mut S,
	name: &str,
	instances: Vec<Box<dyn Entity>>,
	strategy: LoadStrategy,
) -> FixtureResult<Vec<Box<dyn Entity>>>
where
	S: Session + ?Sized,
{
	let mut scope = TransactionScope::begin(session).await?;
	match apply(scope.session(), instances, strategy).await {
		Ok(loaded) => {
			scope.commit().await?;
			Ok(loaded)
		}
		Err(e) => {
			tracing::debug!(fixture = %name, error = %e, "fixture load failed, rolling back");
			if let Err(rollback_err) = scope.rollback().await {
				tracing::warn!(
					fixture = %name,
					error = %rollback_err,
					"failed to roll back fixture transaction"
				);
			}
			Err(e)
		}
	}
}

async fn apply<S>(
	session: &mut S,
	instances: Vec<Box<dyn Entity>>,
	strategy: LoadStrategy,
) -> FixtureResult<Vec<Box<dyn Entity>>>
where
	S: Session + ?Sized,
{
	let mut loaded = Vec::with_capacity(instances.len());

	for instance in instances {
		match strategy {
			LoadStrategy::Insert => {
				session.add(instance.clone());
				loaded.push(instance);
			}
			LoadStrategy::Merge => {
				loaded.push(session.merge(instance).await?);
			}
			LoadStrategy::SkipExisting => {
				let key = instance.key();
				if key.is_set() && session.get(instance.model_id(), &key).await?.is_some() {
					tracing::trace!(model = instance.model_id(), key = %key, "row exists, skipped");
					continue;
				}
				session.add(instance.clone());
				loaded.push(instance);
			}
		}
	}

	session.flush().await?;
	Ok(loaded)
}
