//! Models used by the integration tests.

#![allow(dead_code)]

use toolsets_db::{Model, PrimaryKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
	pub id: Option<i64>,
	pub name: String,
}

impl Role {
	pub fn new(id: i64, name: &str) -> Self {
		Self {
			id: Some(id),
			name: name.to_string(),
		}
	}
}

impl Model for Role {
	const MODEL_ID: &'static str = "auth.Role";

	fn primary_key(&self) -> PrimaryKey {
		PrimaryKey::new(self.id)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
	pub id: i64,
	pub username: String,
	pub role_id: i64,
}

impl User {
	pub fn new(id: i64, username: &str, role_id: i64) -> Self {
		Self {
			id,
			username: username.to_string(),
			role_id,
		}
	}
}

impl Model for User {
	const MODEL_ID: &'static str = "auth.User";

	fn primary_key(&self) -> PrimaryKey {
		PrimaryKey::new(self.id)
	}
}

/// Membership keyed by `(user_id, group_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
	pub user_id: Option<i64>,
	pub group_id: Option<i64>,
}

impl Model for Membership {
	const MODEL_ID: &'static str = "auth.Membership";

	fn primary_key(&self) -> PrimaryKey {
		PrimaryKey::composite([self.user_id, self.group_id])
	}
}

pub fn roles() -> Vec<Role> {
	vec![Role::new(1, "admin"), Role::new(2, "user")]
}

pub fn users() -> Vec<User> {
	vec![User::new(1, "alice", 1), User::new(2, "bob", 2)]
}
