//! # Toolsets
//!
//! Building blocks for services backed by an ORM session: a registry of
//! named, dependency-aware data fixtures, a resolver that orders them, and a
//! loader that writes them inside nested transactions.
//!
//! ## Feature Flags
//!
//! - `fixtures` (default) - Fixture registry, resolution and loading
//! - `commands` (default) - `fixtures list` and `fixtures load` commands
//! - `logging` (default) - Subscriber setup for binaries
//! - `full` - All features enabled
//!
//! The [`db`] module is always available.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "fixtures")]
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! use toolsets::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! struct Role {
//!     id: i64,
//!     name: String,
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
//!     vec![Role { id: 1, name: "admin".into() }]
//! }
//!
//! let mut registry = FixtureRegistry::new();
//! registry.register(roles);
//!
//! let db = MemoryDatabase::new();
//! let mut session = db.session();
//! load_fixtures(&mut session, &registry, &["roles"], LoadStrategy::Merge)
//!     .await
//!     .unwrap();
//! assert_eq!(db.count("auth.Role"), 1);
//! # });
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod db;
pub mod fixtures;
pub mod logging;

// Re-export the storage contract
pub use toolsets_db::{DbError, DbResult, Entity, Model, PrimaryKey, Session, TransactionScope};

// Re-export fixtures
#[cfg(feature = "fixtures")]
pub use toolsets_fixtures::{
	Context, Fixture, FixtureError, FixtureLoader, FixtureRegistry, FixtureResult, LoadResult,
	LoadStrategy, load_fixtures, load_fixtures_by_context,
};

// Re-export commands
#[cfg(feature = "commands")]
pub use toolsets_commands::{CommandError, ListFixturesCommand, LoadFixturesCommand};

// Re-export logging
#[cfg(feature = "logging")]
pub use toolsets_logging::{LogLevel, LoggingConfig, configure_logging};

/// Common imports.
pub mod prelude {
	pub use toolsets_db::{
		Entity, IntoEntity, MemoryDatabase, Model, PrimaryKey, Session, TransactionScope,
	};

	#[cfg(feature = "fixtures")]
	pub use toolsets_fixtures::prelude::*;

	#[cfg(feature = "commands")]
	pub use toolsets_commands::{
		ListFixturesCommand, ListFixturesOptions, LoadFixturesArgs, LoadFixturesCommand,
		LoadFixturesOptions, LoadOutcome,
	};

	#[cfg(feature = "logging")]
	pub use toolsets_logging::{LogLevel, LoggingConfig, configure_logging};
}
