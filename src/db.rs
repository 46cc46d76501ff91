//! Database module.
//!
//! Storage contract used by the fixture loader: models, sessions and
//! transaction scopes, plus an in-memory backend.
//!
//! # Examples
//!
//! ```rust,no_run
//! use toolsets::db::{MemoryDatabase, Session, TransactionScope};
//! ```

pub use toolsets_db::*;
