//! Fixtures module.
//!
//! Registry, dependency resolution and transactional loading of reference
//! and test data.
//!
//! # Examples
//!
//! ```rust,no_run
//! use toolsets::fixtures::{Context, FixtureRegistry, LoadStrategy, load_fixtures};
//! ```

#[cfg(feature = "fixtures")]
pub use toolsets_fixtures::*;
