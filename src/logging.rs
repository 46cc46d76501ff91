//! Logging setup module.

#[cfg(feature = "logging")]
pub use toolsets_logging::*;
