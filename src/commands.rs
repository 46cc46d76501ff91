//! Management commands module.

#[cfg(feature = "commands")]
pub use toolsets_commands::*;
