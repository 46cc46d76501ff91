//! Management commands for toolsets fixtures.
//!
//! - [`ListFixturesCommand`] - show registered fixtures with their contexts and
//!   dependencies
//! - [`LoadFixturesCommand`] - resolve and load the fixtures of one or more
//!   contexts, or preview them with a dry run
//!
//! Commands take already-parsed arguments and option structs; wiring them to a
//! command-line parser is left to the application.
//!
//! ```ignore
//! use toolsets_commands::{LoadFixturesArgs, LoadFixturesCommand, LoadFixturesOptions};
//!
//! let outcome = LoadFixturesCommand::new()
//!     .execute(&registry, &mut session, LoadFixturesArgs::default(), LoadFixturesOptions::new())
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod list;
pub mod load;

pub use error::{CommandError, CommandResult};
pub use list::{FixtureListing, FixtureRow, ListFixturesCommand, ListFixturesOptions};
pub use load::{
	LoadFixturesArgs, LoadFixturesCommand, LoadFixturesOptions, LoadOutcome, render_plan,
};
