//! Aero relational store layer.
//!
//! SQLite access for source records (workflows, agents), data entities,
//! and the association tables written by the entity mapper.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use migrations::run_migrations;
pub use pool::{DbError, DbPool, DbResult};
