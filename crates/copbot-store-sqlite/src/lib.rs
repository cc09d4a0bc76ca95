//! SQLite backend for the CopBot record tables and interaction history.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every access goes through the
//! one connection, and bulk replaces run in a transaction, so readers never
//! observe a half-replaced table.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
