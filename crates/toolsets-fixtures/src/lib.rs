//! Dependency-aware fixtures for toolsets applications.
//!
//! Fixtures are named producers of seed data. Each fixture may depend on other
//! fixtures and is tagged with one or more [`Context`]s (base, development,
//! testing, ...). This crate provides:
//!
//! - **Registry**: [`FixtureRegistry`] stores fixture definitions, registered
//!   with a bare call or through the [`FixtureBuilder`]
//! - **Resolution**: dependency-ordered load lists for names or contexts, with
//!   cycle detection
//! - **Loading**: [`load_fixtures`], [`load_fixtures_by_context`] and
//!   [`FixtureLoader`] write instances through a [`toolsets_db::Session`] using
//!   one of three [`LoadStrategy`] values, one transaction per fixture
//!
//! # Quick Start
//!
//! ```
//! use toolsets_db::{MemoryDatabase, Model, PrimaryKey};
//! use toolsets_fixtures::prelude::*;
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
//!     vec![
//!         Role { id: 1, name: "admin".into() },
//!         Role { id: 2, name: "user".into() },
//!     ]
//! }
//!
//! # async fn example() -> FixtureResult<()> {
//! let mut registry = FixtureRegistry::new();
//! registry.register(roles);
//!
//! let db = MemoryDatabase::new();
//! let mut session = db.session();
//! let result =
//!     load_fixtures_by_context(&mut session, &registry, &[Context::Base], LoadStrategy::Merge)
//!         .await?;
//!
//! assert_eq!(result.total_records(), 2);
//! assert_eq!(db.count(Role::MODEL_ID), 2);
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example()).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod context;
pub mod error;
pub mod fixture;
pub mod loader;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod settings;
pub mod utils;

// Re-export commonly used types at crate root
pub use context::{Context, LoadStrategy};
pub use error::{FixtureError, FixtureResult};
pub use fixture::{Fixture, Producer};
pub use loader::{
	FixtureLoader, LoadOptions, LoadPlan, LoadResult, PlannedFixture, load_fixtures,
	load_fixtures_by_context,
};
pub use registry::{FixtureBuilder, FixtureRegistry};
pub use settings::FixtureSettings;
pub use utils::find_instance;
