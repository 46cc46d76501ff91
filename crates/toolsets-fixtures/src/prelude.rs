//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use toolsets_fixtures::prelude::*;
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Definitions
pub use crate::context::{Context, LoadStrategy};
pub use crate::fixture::Fixture;
pub use crate::registry::{FixtureBuilder, FixtureRegistry};

// Loading
pub use crate::loader::{
	FixtureLoader, LoadOptions, LoadPlan, LoadResult, PlannedFixture, load_fixtures,
	load_fixtures_by_context,
};
pub use crate::settings::FixtureSettings;
pub use crate::utils::find_instance;

// Storage contract
pub use toolsets_db::{Entity, IntoEntity, Model, PrimaryKey, Session};
