//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Record rows are stored as one
//! text column per field, in [`RecordKind::columns`] order.

use chrono::{DateTime, Utc};
use copbot_core::{
  history::InteractionLogEntry,
  record::{MatchPolicy, Record, RecordKind},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SQL text ────────────────────────────────────────────────────────────────

/// `SELECT` of every column of `kind`, in insertion order.
pub fn select_sql(kind: RecordKind) -> String {
  format!(
    "SELECT {} FROM {} ORDER BY rowid",
    kind.columns().join(", "),
    kind.table()
  )
}

/// First row of `kind` whose key satisfies `policy` against `?1`.
///
/// Substring matching folds ASCII case on both sides, the same way
/// SQLite's `lower()` does.
pub fn find_first_sql(kind: RecordKind, policy: MatchPolicy) -> String {
  let predicate = match policy {
    MatchPolicy::Exact => format!("{} = ?1", kind.key_column()),
    MatchPolicy::Substring => {
      format!("instr(lower({}), lower(?1)) > 0", kind.key_column())
    }
  };
  format!(
    "SELECT {} FROM {} WHERE {predicate} ORDER BY rowid LIMIT 1",
    kind.columns().join(", "),
    kind.table()
  )
}

pub fn insert_sql(kind: RecordKind) -> String {
  let placeholders = (1..=kind.columns().len())
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "INSERT INTO {} ({}) VALUES ({placeholders})",
    kind.table(),
    kind.columns().join(", ")
  )
}

/// Read every column of a record row as text.
pub fn row_values(row: &rusqlite::Row<'_>, width: usize) -> rusqlite::Result<Vec<String>> {
  (0..width).map(|i| row.get(i)).collect()
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub fn decode_record(kind: RecordKind, values: Vec<String>) -> Result<Record> {
  Ok(Record::from_values(kind, values)?)
}

/// Column values as read from `chat_history`, before timestamp parsing.
pub struct RawInteraction {
  pub id:           i64,
  pub user_input:   String,
  pub bot_response: String,
  pub timestamp:    String,
}

impl RawInteraction {
  pub fn into_entry(self) -> Result<InteractionLogEntry> {
    Ok(InteractionLogEntry {
      id:           self.id,
      user_input:   self.user_input,
      bot_response: self.bot_response,
      timestamp:    decode_dt(&self.timestamp)?,
    })
  }
}
