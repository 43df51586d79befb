//! Data access layer repositories.
//!
//! One repository per table, each a thin struct over a connection. The
//! connection parameter is generic so the same repository works on the shared
//! [`sea_orm::DatabaseConnection`] and inside a
//! [`sea_orm::DatabaseTransaction`]; every multi-row workflow step runs under
//! the caller's transaction.

pub mod application;
pub mod document;
pub mod inspection;
pub mod inspector;
pub mod progress;
pub mod requirement;
pub mod stage;
