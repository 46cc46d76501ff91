//! `fixtures list` command implementation.
//!
//! This command shows the registered fixtures with their contexts and
//! dependencies.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use toolsets_fixtures::{Context, Fixture, FixtureRegistry};

use crate::error::CommandResult;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListFixturesOptions {
	/// Only list fixtures tagged with this context.
	pub context: Option<Context>,

	/// Verbosity level.
	pub verbosity: u8,
}

impl ListFixturesOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the context filter.
	pub fn with_context(mut self, context: impl Into<Context>) -> Self {
		self.context = Some(context.into());
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}
}

/// One row of the fixture listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow {
	/// Fixture name.
	pub name: String,
	/// Comma-separated contexts.
	pub contexts: String,
	/// Comma-separated dependencies, or `-` when there are none.
	pub dependencies: String,
}

impl From<&Fixture> for FixtureRow {
	fn from(fixture: &Fixture) -> Self {
		let contexts = fixture
			.contexts
			.iter()
			.map(Context::as_str)
			.collect::<Vec<_>>()
			.join(", ");
		let dependencies = if fixture.depends_on.is_empty() {
			"-".to_string()
		} else {
			fixture.depends_on.join(", ")
		};
		Self {
			name: fixture.name.clone(),
			contexts,
			dependencies,
		}
	}
}

/// Result of the list command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureListing {
	/// Listed fixtures in registration order.
	pub rows: Vec<FixtureRow>,
}

impl FixtureListing {
	/// Returns the number of listed fixtures.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if no fixtures were listed.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Renders the listing as a table followed by the total.
	pub fn render(&self) -> String {
		if self.rows.is_empty() {
			return "No fixtures found.".to_string();
		}

		let mut table = Table::new();
		table.load_preset(UTF8_FULL);
		table.set_header(vec!["Name", "Contexts", "Dependencies"]);
		for row in &self.rows {
			table.add_row(vec![&row.name, &row.contexts, &row.dependencies]);
		}

		format!("{}\n\nTotal: {} fixture(s)", table, self.rows.len())
	}
}

/// Lists registered fixtures.
///
/// # Example
///
/// ```ignore
/// let listing = ListFixturesCommand::new().execute(
///     &registry,
///     ListFixturesOptions::new().with_context("testing").with_verbosity(1),
/// )?;
/// ```
#[derive(Debug, Default)]
pub struct ListFixturesCommand;

impl ListFixturesCommand {
	/// Creates a new list command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"fixtures list"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"List all registered fixtures"
	}

	/// Returns the command help text.
	pub fn help(&self) -> &str {
		r#"
Usage: fixtures list [options]

List all registered fixtures.

Options:
  --context, -c CONTEXT  Filter by context (base, production, development, testing)
  --verbosity LEVEL      Verbosity level (0=silent, 1=normal)
"#
	}

	/// Executes the list command.
	pub fn execute(
		&self,
		registry: &FixtureRegistry,
		options: ListFixturesOptions,
	) -> CommandResult<FixtureListing> {
		let fixtures = match &options.context {
			Some(context) => registry.get_by_context(std::slice::from_ref(context)),
			None => registry.get_all(),
		};

		let listing = FixtureListing {
			rows: fixtures.into_iter().map(FixtureRow::from).collect(),
		};

		if options.verbosity > 0 {
			println!("{}", listing.render());
		}

		Ok(listing)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use toolsets_db::{Model, PrimaryKey};

	#[derive(Debug, Clone)]
	struct Role {
		id: i64,
	}

	impl Model for Role {
		const MODEL_ID: &'static str = "auth.Role";

		fn primary_key(&self) -> PrimaryKey {
			PrimaryKey::new(self.id)
		}
	}

	fn roles() -> Vec<Role> {
		vec![Role { id: 1 }]
	}

	#[rstest]
	fn test_command_metadata() {
		let cmd = ListFixturesCommand::new();
		assert_eq!(cmd.name(), "fixtures list");
		assert!(!cmd.description().is_empty());
		assert!(!cmd.help().is_empty());
	}

	#[rstest]
	fn test_row_from_fixture() {
		let fixture = Fixture::new("users", roles)
			.with_depends_on(["roles", "groups"])
			.with_contexts([Context::Base, Context::Testing]);

		let row = FixtureRow::from(&fixture);

		assert_eq!(row.name, "users");
		assert_eq!(row.contexts, "base, testing");
		assert_eq!(row.dependencies, "roles, groups");
	}

	#[rstest]
	fn test_row_without_dependencies_uses_dash() {
		let row = FixtureRow::from(&Fixture::new("roles", roles));
		assert_eq!(row.dependencies, "-");
	}

	#[rstest]
	fn test_render_empty_listing() {
		assert_eq!(FixtureListing::default().render(), "No fixtures found.");
	}

	#[rstest]
	fn test_render_includes_rows_and_total() {
		// Arrange
		let listing = FixtureListing {
			rows: vec![FixtureRow::from(&Fixture::new("roles", roles))],
		};

		// Act
		let rendered = listing.render();

		// Assert
		assert!(rendered.contains("Name"));
		assert!(rendered.contains("Dependencies"));
		assert!(rendered.contains("roles"));
		assert!(rendered.ends_with("Total: 1 fixture(s)"));
	}

	#[rstest]
	fn test_options_builder() {
		let options = ListFixturesOptions::new()
			.with_context("testing")
			.with_verbosity(1);

		assert_eq!(options.context, Some(Context::Testing));
		assert_eq!(options.verbosity, 1);
	}
}
