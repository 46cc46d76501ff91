//! Storage session contract for toolsets fixtures.
//!
//! This crate defines what the fixture engine needs from a database:
//!
//! - **Entities**: [`Model`] for typed application models, [`Entity`] as their
//!   object-safe form, and [`PrimaryKey`] for single and composite keys
//! - **Sessions**: the async [`Session`] trait with staged inserts, upsert by
//!   primary key, lookup by primary key and nested transactions
//! - **Transaction scopes**: [`TransactionScope`], one transaction or savepoint
//!   level that is explicitly committed or rolled back
//! - **In-memory backend**: [`MemoryDatabase`] and [`MemorySession`], used by
//!   tests and tools that do not need a real database
//!
//! # Quick Start
//!
//! ```
//! use toolsets_db::{IntoEntity, MemoryDatabase, Model, PrimaryKey, Session};
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
//! # async fn example() -> toolsets_db::DbResult<()> {
//! let db = MemoryDatabase::new();
//! let mut session = db.session();
//!
//! session.add(Role { id: 1, name: "admin".into() }.into_entity());
//! session.flush().await?;
//!
//! assert_eq!(db.fetch::<Role>(&PrimaryKey::new(1)).map(|r| r.name), Some("admin".into()));
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example()).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entity;
pub mod error;
pub mod memory;
pub mod session;
pub mod transaction;

pub use entity::{Entity, IntoEntity, Model, PrimaryKey};
pub use error::{DbError, DbResult};
pub use memory::{MemoryDatabase, MemorySession};
pub use session::Session;
pub use transaction::TransactionScope;
