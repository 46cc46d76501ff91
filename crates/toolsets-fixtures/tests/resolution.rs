//! Dependency resolution scenarios.

mod helpers;

use std::collections::HashSet;

use helpers::models::{Role, User, roles, users};
use rstest::*;
use toolsets_fixtures::{Context, FixtureError, FixtureRegistry};

#[fixture]
fn auth_registry() -> FixtureRegistry {
	let mut registry = FixtureRegistry::new();
	registry.register(roles);
	registry.fixture().depends_on(["roles"]).register(users);
	registry
}

fn assert_dependencies_first(registry: &FixtureRegistry, order: &[String]) {
	let unique: HashSet<&String> = order.iter().collect();
	assert_eq!(unique.len(), order.len(), "duplicate in {:?}", order);

	for (position, name) in order.iter().enumerate() {
		for dependency in &registry.get(name).unwrap().depends_on {
			let dep_position = order.iter().position(|n| n == dependency);
			assert!(
				matches!(dep_position, Some(p) if p < position),
				"{} must come before {} in {:?}",
				dependency,
				name,
				order
			);
		}
	}
}

#[rstest]
fn test_dependency_precedes_dependent(auth_registry: FixtureRegistry) {
	// Act
	let order = auth_registry.resolve_dependencies(&["users"]).unwrap();

	// Assert
	assert_eq!(order, ["roles", "users"]);
}

#[rstest]
fn test_two_node_cycle_is_rejected() {
	// Arrange
	let mut registry = FixtureRegistry::new();
	registry.fixture().name("a").depends_on(["b"]).register(roles);
	registry.fixture().name("b").depends_on(["a"]).register(roles);

	// Act
	let result = registry.resolve_dependencies(&["a"]);

	// Assert
	assert!(matches!(
		result,
		Err(FixtureError::CircularDependency { ref name }) if name == "a"
	));
}

#[rstest]
fn test_cycle_outside_request_is_ignored() {
	let mut registry = FixtureRegistry::new();
	registry.register(roles);
	registry.fixture().name("a").depends_on(["b"]).register(roles);
	registry.fixture().name("b").depends_on(["a"]).register(roles);

	assert_eq!(registry.resolve_dependencies(&["roles"]).unwrap(), ["roles"]);
}

#[rstest]
fn test_context_pulls_in_dependencies_from_other_contexts() {
	// Arrange
	let mut registry = FixtureRegistry::new();
	registry
		.fixture()
		.name("base_roles")
		.contexts([Context::Base])
		.register(roles);
	registry
		.fixture()
		.name("test_users")
		.depends_on(["base_roles"])
		.contexts([Context::Testing])
		.register(users);

	// Act
	let order = registry
		.resolve_context_dependencies(&[Context::Testing])
		.unwrap();

	// Assert
	assert_eq!(order, ["base_roles", "test_users"]);
}

#[rstest]
fn test_resolution_is_idempotent(auth_registry: FixtureRegistry) {
	let first = auth_registry.resolve_dependencies(&["users", "roles"]).unwrap();
	let second = auth_registry.resolve_dependencies(&["users", "roles"]).unwrap();
	assert_eq!(first, second);

	let first = auth_registry
		.resolve_context_dependencies(&[Context::Base])
		.unwrap();
	let second = auth_registry
		.resolve_context_dependencies(&[Context::Base])
		.unwrap();
	assert_eq!(first, second);
}

#[rstest]
fn test_combined_contexts_cover_each_context() {
	// Arrange
	let mut registry = FixtureRegistry::new();
	registry.register(roles);
	registry
		.fixture()
		.name("permissions")
		.contexts([Context::Production])
		.register(Vec::<Role>::new);
	registry
		.fixture()
		.name("dev_users")
		.depends_on(["roles"])
		.contexts([Context::Development])
		.register(users);
	registry
		.fixture()
		.name("demo_users")
		.depends_on(["dev_users", "permissions"])
		.contexts([Context::Testing, Context::Development])
		.register(Vec::<User>::new);

	// Act
	let testing = registry
		.resolve_context_dependencies(&[Context::Testing])
		.unwrap();
	let development = registry
		.resolve_context_dependencies(&[Context::Development])
		.unwrap();
	let combined = registry
		.resolve_context_dependencies(&[Context::Testing, Context::Development])
		.unwrap();

	// Assert
	let combined_set: HashSet<&String> = combined.iter().collect();
	for name in testing.iter().chain(development.iter()) {
		assert!(combined_set.contains(name), "{} missing from {:?}", name, combined);
	}
	assert_dependencies_first(&registry, &combined);
	assert_eq!(combined, ["roles", "dev_users", "permissions", "demo_users"]);
}

#[rstest]
#[case(&["users"])]
#[case(&["roles", "users"])]
#[case(&["users", "users"])]
fn test_every_order_respects_dependencies(
	auth_registry: FixtureRegistry,
	#[case] names: &[&str],
) {
	let order = auth_registry.resolve_dependencies(names).unwrap();
	assert_dependencies_first(&auth_registry, &order);
}

#[rstest]
fn test_unknown_request_fails_before_anything_else(auth_registry: FixtureRegistry) {
	let result = auth_registry.resolve_dependencies(&["users", "missing"]);
	assert!(matches!(result, Err(FixtureError::NotFound(ref name)) if name == "missing"));
}
