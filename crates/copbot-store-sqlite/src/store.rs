//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`] and
//! [`InteractionLog`].

use std::path::Path;

use chrono::Utc;
use copbot_core::{
  history::{InteractionLogEntry, NewInteraction},
  record::{MatchPolicy, Record, RecordKind, RecordTable},
  store::{InteractionLog, RecordStore},
};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use crate::{
  Result,
  encode::{
    RawInteraction, decode_record, encode_dt, find_first_sql, insert_sql,
    row_values, select_sql,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// CopBot tables backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn find_first(
    &self,
    kind: RecordKind,
    policy: MatchPolicy,
    query: &str,
  ) -> Result<Option<Record>> {
    let sql   = find_first_sql(kind, policy);
    let query = query.to_owned();
    let width = kind.columns().len();

    let values: Option<Vec<String>> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(&sql, rusqlite::params![query], |row| row_values(row, width))
          .optional()?)
      })
      .await?;

    values.map(|v| decode_record(kind, v)).transpose()
  }

  async fn replace_table(&self, table: RecordTable) -> Result<usize> {
    let kind = table.kind();
    let rows: Vec<Vec<String>> = table
      .rows()
      .iter()
      .map(|r| r.values().into_iter().map(str::to_owned).collect())
      .collect();
    let delete = format!("DELETE FROM {}", kind.table());
    let insert = insert_sql(kind);

    let count = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(&delete, [])?;
        {
          let mut stmt = tx.prepare(&insert)?;
          for row in &rows {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
          }
        }
        tx.commit()?;
        Ok(rows.len())
      })
      .await?;

    info!(table = kind.table(), rows = count, "replaced table");
    Ok(count)
  }

  async fn list(&self, kind: RecordKind) -> Result<Vec<Record>> {
    let sql   = select_sql(kind);
    let width = kind.columns().len();

    let raws: Vec<Vec<String>> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| row_values(row, width))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|v| decode_record(kind, v)).collect()
  }
}

// ─── InteractionLog impl ─────────────────────────────────────────────────────

impl InteractionLog for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, entry: NewInteraction) -> Result<InteractionLogEntry> {
    let timestamp = Utc::now();
    let at_str    = encode_dt(timestamp);
    let input     = entry.user_input.clone();
    let response  = entry.bot_response.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO chat_history (user_input, bot_response, timestamp)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![input, response, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(id, "appended interaction");
    Ok(InteractionLogEntry {
      id,
      user_input: entry.user_input,
      bot_response: entry.bot_response,
      timestamp,
    })
  }

  async fn recent(&self, limit: usize) -> Result<Vec<InteractionLogEntry>> {
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawInteraction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user_input, bot_response, timestamp
           FROM chat_history
           ORDER BY id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawInteraction {
              id:           row.get(0)?,
              user_input:   row.get(1)?,
              bot_response: row.get(2)?,
              timestamp:    row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInteraction::into_entry).collect()
  }
}
