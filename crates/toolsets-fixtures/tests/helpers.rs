//! Test helpers for toolsets-fixtures integration tests.
//!
//! This module provides the models and session wrappers shared by the
//! resolution and loading tests.

#[path = "helpers/models.rs"]
pub mod models;

#[path = "helpers/session.rs"]
pub mod session;
