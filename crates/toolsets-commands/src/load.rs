//! `fixtures load` command implementation.
//!
//! This command resolves the fixtures of one or more contexts and loads them
//! into the database.

use toolsets_db::Session;
use toolsets_fixtures::{
	Context, FixtureLoader, FixtureRegistry, FixtureSettings, LoadOptions, LoadPlan, LoadResult,
	LoadStrategy,
};

use crate::error::{CommandError, CommandResult};

/// Arguments for the load command.
#[derive(Debug, Clone, Default)]
pub struct LoadFixturesArgs {
	/// Contexts to load. Empty means the configured default contexts.
	pub contexts: Vec<Context>,
}

/// Options for the load command.
#[derive(Debug, Clone, Default)]
pub struct LoadFixturesOptions {
	/// Strategy name (`merge`, `insert` or `skip_existing`). `None` uses the
	/// configured default.
	pub strategy: Option<String>,

	/// Only show what would be loaded.
	pub dry_run: bool,

	/// Wrap the whole load in one transaction.
	pub use_transaction: bool,

	/// Defaults for strategy and contexts.
	pub settings: FixtureSettings,

	/// Verbosity level.
	pub verbosity: u8,
}

impl LoadFixturesOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the strategy name.
	pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
		self.strategy = Some(strategy.into());
		self
	}

	/// Sets dry run flag.
	pub fn with_dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}

	/// Sets use transaction flag.
	pub fn with_transaction(mut self, use_tx: bool) -> Self {
		self.use_transaction = use_tx;
		self
	}

	/// Sets the fixture settings.
	pub fn with_settings(mut self, settings: FixtureSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}

	fn resolve_strategy(&self) -> CommandResult<LoadStrategy> {
		match &self.strategy {
			Some(name) => name
				.parse()
				.map_err(|_| CommandError::InvalidStrategy(name.clone())),
			None => Ok(self.settings.default_strategy),
		}
	}
}

/// Outcome of the load command.
#[derive(Debug)]
pub enum LoadOutcome {
	/// The requested contexts contain no fixtures.
	NothingToLoad,

	/// Dry run; nothing was written.
	DryRun(LoadPlan),

	/// Fixtures were loaded.
	Loaded {
		/// Total number of loaded records.
		total: usize,
		/// Loaded instances per fixture.
		result: LoadResult,
	},
}

/// Renders the plan as the list printed before loading.
pub fn render_plan(plan: &LoadPlan) -> String {
	let mut out = format!("Fixtures to load ({} strategy):", plan.strategy);
	for fixture in &plan.fixtures {
		out.push_str(&format!(
			"\n  - {}: {} {}(s)",
			fixture.name,
			fixture.count,
			fixture.model_id.unwrap_or("?")
		));
	}
	out
}

/// Loads fixtures for the given contexts.
///
/// # Example
///
/// ```ignore
/// let outcome = LoadFixturesCommand::new()
///     .execute(
///         &registry,
///         &mut session,
///         LoadFixturesArgs { contexts: vec![Context::Testing] },
///         LoadFixturesOptions::new().with_strategy("skip_existing").with_verbosity(1),
///     )
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct LoadFixturesCommand;

impl LoadFixturesCommand {
	/// Creates a new load command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"fixtures load"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Load fixtures into the database"
	}

	/// Returns the command help text.
	pub fn help(&self) -> &str {
		r#"
Usage: fixtures load [options] [context ...]

Load fixtures into the database.

Arguments:
  context                 Contexts to load (base, production, development, testing)

Options:
  --strategy, -s NAME     Load strategy: merge, insert, skip_existing
  --dry-run, -n           Show what would be loaded without loading
  --verbosity LEVEL       Verbosity level (0=silent, 1=normal)
"#
	}

	/// Executes the load command.
	///
	/// # Errors
	///
	/// Returns [`CommandError::InvalidStrategy`] for an unknown strategy name,
	/// and passes resolution and storage errors through.
	pub async fn execute<S>(
		&self,
		registry: &FixtureRegistry,
		session: &mut S,
		args: LoadFixturesArgs,
		options: LoadFixturesOptions,
	) -> CommandResult<LoadOutcome>
	where
		S: Session + ?Sized,
	{
		let strategy = options.resolve_strategy()?;
		let contexts = if args.contexts.is_empty() {
			options.settings.default_contexts.clone()
		} else {
			args.contexts
		};

		let loader = FixtureLoader::new(registry).with_options(
			LoadOptions::new()
				.with_strategy(strategy)
				.with_atomic(options.use_transaction),
		);

		let plan = loader.plan_by_context(&contexts)?;
		if plan.is_empty() {
			if options.verbosity > 0 {
				println!("No fixtures to load for the specified context(s).");
			}
			return Ok(LoadOutcome::NothingToLoad);
		}

		if options.verbosity > 0 {
			println!("\n{}", render_plan(&plan));
		}

		if options.dry_run {
			if options.verbosity > 0 {
				println!("\n[Dry run - no changes made]");
			}
			return Ok(LoadOutcome::DryRun(plan));
		}

		let result = loader.load_by_context(session, &contexts).await?;
		let total = result.total_records();
		tracing::debug!(total, fixtures = result.len(), "fixtures loaded");

		if options.verbosity > 0 {
			println!("\nLoaded {} record(s) successfully.", total);
		}

		Ok(LoadOutcome::Loaded { total, result })
	}
}
