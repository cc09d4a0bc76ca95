//! Query routing for CopBot.
//!
//! [`Router::route`] is the chat entry point: the intent classifier labels
//! the text, and a matched intent answers with one of its canned responses.
//! Text whose label has no intent falls through to the [`Resolver`], which
//! probes the record tables in a fixed order. The resolver's per-table
//! lookups are also exposed directly for menu-driven access.

pub mod error;
pub mod import;
pub mod resolver;
pub mod router;

pub use error::{Error, ImportError, Result};
pub use import::{
  ImportReport, ImportSummary, TableImport, import_datasets, import_files, import_table,
};
pub use resolver::{DEFAULT_CASCADE, Fallback, NOT_FOUND, Probe, Resolver};
pub use router::{Routed, Router};
