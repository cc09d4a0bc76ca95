//! The `RecordStore` and `InteractionLog` traits.
//!
//! Both are implemented by storage backends (e.g. `copbot-store-sqlite`).
//! The resolver, router and API depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  history::{InteractionLogEntry, NewInteraction},
  record::{MatchPolicy, Record, RecordKind, RecordTable},
};

// ─── Record tables ───────────────────────────────────────────────────────────

/// Abstraction over the five lookup tables.
///
/// Reads are point or substring probes returning at most one row. Writes
/// replace a whole table at once; a replace is all-or-nothing, so readers
/// observe either the old or the new contents, never a mix.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the first row of `kind` whose key satisfies `policy` against
  /// `query`, in insertion order. `None` if nothing matches.
  fn find_first<'a>(
    &'a self,
    kind: RecordKind,
    policy: MatchPolicy,
    query: &'a str,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Replace every row of `table.kind()` with the rows of `table`.
  /// Returns the number of rows now in the table.
  fn replace_table(
    &self,
    table: RecordTable,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// All rows of `kind`, in insertion order.
  fn list(
    &self,
    kind: RecordKind,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;
}

// ─── Interaction history ─────────────────────────────────────────────────────

/// Append-only audit log of routed queries.
pub trait InteractionLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist an interaction, stamping it with the current UTC time.
  fn append(
    &self,
    entry: NewInteraction,
  ) -> impl Future<Output = Result<InteractionLogEntry, Self::Error>> + Send + '_;

  /// The newest `limit` entries, newest first.
  fn recent(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<InteractionLogEntry>, Self::Error>> + Send + '_;
}
