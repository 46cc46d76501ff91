//! Fixture registry.
//!
//! A [`FixtureRegistry`] maps fixture names to [`Fixture`] definitions. It is a
//! plain value: applications build one (usually at start-up) and pass it to the
//! loader explicitly, and tests can create as many isolated registries as they
//! need.
//!
//! Fixtures are registered either with the bare [`FixtureRegistry::register`]
//! call, which names the fixture after the producer function, or with the
//! [`FixtureRegistry::fixture`] builder for explicit names, dependencies and
//! contexts. Both return the producer unchanged so it stays callable.
//!
//! # Example
//!
//! ```
//! use toolsets_db::{Model, PrimaryKey};
//! use toolsets_fixtures::{Context, FixtureRegistry};
//!
//! #[derive(Debug, Clone)]
//! struct Role {
//!     id: i64,
//! }
//!
//! impl Model for Role {
//!     const MODEL_ID: &'static str = "auth.Role";
//!
//!     fn primary_key(&self) -> PrimaryKey {
//!         PrimaryKey::new(self.id)
//!     }
//! }
//!
//! fn roles() -> Vec<Role> {
//!     vec![Role { id: 1 }, Role { id: 2 }]
//! }
//!
//! let mut registry = FixtureRegistry::new();
//! let roles = registry.register(roles);
//! registry
//!     .fixture()
//!     .name("test_roles")
//!     .depends_on(["roles"])
//!     .contexts([Context::Testing])
//!     .register(|| vec![Role { id: 99 }]);
//!
//! assert_eq!(roles().len(), 2);
//! assert_eq!(registry.resolve_dependencies(&["test_roles"]).unwrap(), ["roles", "test_roles"]);
//! ```

use indexmap::IndexMap;
use toolsets_db::IntoEntity;

use crate::context::Context;
use crate::error::{FixtureError, FixtureResult};
use crate::fixture::Fixture;

/// Registry of fixture definitions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FixtureRegistry {
	fixtures: IndexMap<String, Fixture>,
	anonymous: usize,
}

impl FixtureRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a producer under its own function name, in the base context.
	///
	/// Closures and function pointers have no usable name; register them
	/// through [`Self::fixture`] with an explicit [`FixtureBuilder::name`].
	/// Without one they get a generated `anonymous_fixture_N` name and a
	/// warning is logged.
	pub fn register<F, I>(&mut self, producer: F) -> F
	where
		F: Fn() -> I + Clone + Send + Sync + 'static,
		I: IntoIterator,
		I::Item: IntoEntity,
	{
		self.fixture().register(producer)
	}

	/// Starts a parameterised registration.
	pub fn fixture(&mut self) -> FixtureBuilder<'_> {
		FixtureBuilder {
			registry: self,
			name: None,
			depends_on: Vec::new(),
			contexts: Vec::new(),
		}
	}

	/// Adds a fixture definition.
	///
	/// An existing definition with the same name is replaced in place, keeping
	/// its position in registration order.
	pub fn add(&mut self, fixture: Fixture) {
		let name = fixture.name.clone();
		if self.fixtures.insert(name.clone(), fixture).is_some() {
			tracing::warn!(fixture = %name, "fixture re-registered, previous definition replaced");
		} else {
			tracing::debug!(fixture = %name, "fixture registered");
		}
	}

	/// Returns the fixture with the given name.
	pub fn get(&self, name: &str) -> FixtureResult<&Fixture> {
		self.fixtures
			.get(name)
			.ok_or_else(|| FixtureError::NotFound(name.to_string()))
	}

	/// Returns every fixture in registration order.
	pub fn get_all(&self) -> Vec<&Fixture> {
		self.fixtures.values().collect()
	}

	/// Returns the fixtures tagged with any of the given contexts, in
	/// registration order.
	pub fn get_by_context(&self, contexts: &[Context]) -> Vec<&Fixture> {
		self.fixtures
			.values()
			.filter(|fixture| fixture.belongs_to(contexts))
			.collect()
	}

	/// Returns true if a fixture with the given name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.fixtures.contains_key(name)
	}

	/// Removes a fixture, preserving the order of the others.
	pub fn remove(&mut self, name: &str) -> Option<Fixture> {
		self.fixtures.shift_remove(name)
	}

	/// Returns the registered names in registration order.
	pub fn names(&self) -> Vec<&str> {
		self.fixtures.keys().map(String::as_str).collect()
	}

	fn inferred_name<F>(&mut self) -> String {
		let path = std::any::type_name::<F>();
		if let Some(name) = name_from_path(path) {
			return name.to_string();
		}

		let name = loop {
			self.anonymous += 1;
			let candidate = format!("anonymous_fixture_{}", self.anonymous);
			if !self.fixtures.contains_key(&candidate) {
				break candidate;
			}
		};
		tracing::warn!(
			producer = path,
			fixture = %name,
			"producer has no function name, register it with an explicit name"
		);
		name
	}

	/// Returns the number of registered fixtures.
	pub fn len(&self) -> usize {
		self.fixtures.len()
	}

	/// Returns true if no fixtures are registered.
	pub fn is_empty(&self) -> bool {
		self.fixtures.is_empty()
	}
}

/// Builder for registering a fixture with explicit parameters.
///
/// Created by [`FixtureRegistry::fixture`].
#[must_use = "a fixture is only registered once `register` is called"]
pub struct FixtureBuilder<'r> {
	registry: &'r mut FixtureRegistry,
	name: Option<String>,
	depends_on: Vec<String>,
	contexts: Vec<Context>,
}

impl FixtureBuilder<'_> {
	/// Sets the fixture name. Defaults to the producer's function name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the fixtures that must be loaded first.
	pub fn depends_on<I, S>(mut self, depends_on: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.depends_on = depends_on.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the contexts. Defaults to base.
	pub fn contexts<I, C>(mut self, contexts: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Context>,
	{
		self.contexts = contexts.into_iter().map(Into::into).collect();
		self
	}

	/// Registers the producer and returns it unchanged.
	pub fn register<F, I>(self, producer: F) -> F
	where
		F: Fn() -> I + Clone + Send + Sync + 'static,
		I: IntoIterator,
		I::Item: IntoEntity,
	{
		let name = match self.name {
			Some(name) => name,
			None => self.registry.inferred_name::<F>(),
		};
		let fixture = Fixture::new(name, producer.clone())
			.with_depends_on(self.depends_on)
			.with_contexts(self.contexts);
		self.registry.add(fixture);
		producer
	}
}

/// Derives a fixture name from a producer's type path.
///
/// Only function items carry their own name. Function pointers (`fn() -> ..`)
/// and closures (`..::{{closure}}`) yield `None`.
fn name_from_path(path: &str) -> Option<&str> {
	let path = path.trim_start_matches('&');
	if path.starts_with("fn(")
		|| path.starts_with("unsafe ")
		|| path.starts_with("extern ")
		|| path.contains("{{closure}}")
	{
		return None;
	}
	let path = path.split('<').next().unwrap_or(path);
	path.rsplit("::").next().filter(|name| !name.is_empty())
}
