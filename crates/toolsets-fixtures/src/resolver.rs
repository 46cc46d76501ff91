//! Dependency resolution.
//!
//! Resolution turns requested fixture names (or contexts) into a load order in
//! which every fixture follows all of its transitive dependencies. The walk is
//! a depth-first post-order traversal with three marks, driven by an explicit
//! stack so deep dependency chains cannot overflow the call stack.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::context::Context;
use crate::error::{FixtureError, FixtureResult};
use crate::fixture::Fixture;
use crate::registry::FixtureRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
	InProgress,
	Done,
}

struct Frame<'r> {
	fixture: &'r Fixture,
	cursor: usize,
}

struct Walk<'r> {
	registry: &'r FixtureRegistry,
	marks: HashMap<&'r str, Mark>,
	stack: Vec<Frame<'r>>,
	order: Vec<String>,
}

impl<'r> Walk<'r> {
	fn new(registry: &'r FixtureRegistry) -> Self {
		Self {
			registry,
			marks: HashMap::new(),
			stack: Vec::new(),
			order: Vec::new(),
		}
	}

	/// Pushes `name` onto the stack unless it is already resolved.
	fn enter(&mut self, name: &str) -> FixtureResult<()> {
		match self.marks.get(name) {
			Some(Mark::Done) => return Ok(()),
			Some(Mark::InProgress) => {
				return Err(FixtureError::CircularDependency {
					name: name.to_string(),
				});
			}
			None => {}
		}
		let fixture = self.registry.get(name)?;
		self.marks.insert(fixture.name.as_str(), Mark::InProgress);
		self.stack.push(Frame { fixture, cursor: 0 });
		Ok(())
	}

	fn visit(&mut self, name: &str) -> FixtureResult<()> {
		self.enter(name)?;
		while let Some(frame) = self.stack.last_mut() {
			let fixture = frame.fixture;
			match fixture.depends_on.get(frame.cursor) {
				Some(dependency) => {
					frame.cursor += 1;
					self.enter(dependency)?;
				}
				None => {
					self.marks.insert(fixture.name.as_str(), Mark::Done);
					self.order.push(fixture.name.clone());
					self.stack.pop();
				}
			}
		}
		Ok(())
	}
}

impl FixtureRegistry {
	/// Resolves the given fixtures and all their dependencies into load order.
	///
	/// Dependencies come before dependents and every name appears once. The
	/// order is otherwise the depth-first post-order of the request, so the
	/// same request against the same registry always yields the same result.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::NotFound`] if a requested name or dependency is
	/// not registered, and [`FixtureError::CircularDependency`] if a cycle is
	/// reachable from the request.
	pub fn resolve_dependencies<S: AsRef<str>>(&self, names: &[S]) -> FixtureResult<Vec<String>> {
		let mut walk = Walk::new(self);
		for name in names {
			walk.visit(name.as_ref())?;
		}
		tracing::debug!(
			requested = names.len(),
			resolved = ?walk.order,
			"resolved fixture dependencies"
		);
		Ok(walk.order)
	}

	/// Resolves every fixture tagged with any of the given contexts, together
	/// with its dependencies, into one load order.
	///
	/// Dependencies are included even when they belong to none of the
	/// requested contexts.
	pub fn resolve_context_dependencies(&self, contexts: &[Context]) -> FixtureResult<Vec<String>> {
		let mut closure: IndexSet<String> = IndexSet::new();
		for fixture in self.get_by_context(contexts) {
			closure.extend(self.resolve_dependencies(&[fixture.name.as_str()])?);
		}
		let names: Vec<&str> = closure.iter().map(String::as_str).collect();
		self.resolve_dependencies(&names)
	}
}
