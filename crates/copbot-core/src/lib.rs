//! Core types and trait definitions for CopBot.
//!
//! This crate has no HTTP, database or ML dependencies.
//! It owns the intent corpus, the record tables' shapes, and the storage
//! traits every backend implements.

pub mod error;
pub mod history;
pub mod intent;
pub mod record;
pub mod store;

pub use error::{Error, Result};
