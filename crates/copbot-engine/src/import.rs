//! Dataset import: CSV files replace whole record tables.
//!
//! Each table is imported independently. A table whose file fails to read or
//! parse is reported and left untouched; the others still load.

use std::{
  fs::File,
  io::{self, Read},
  path::PathBuf,
};

use copbot_core::{record::RecordKind, store::RecordStore};
use serde::Serialize;
use tracing::{info, warn};

use crate::ImportError;

/// The outcome for one table.
#[derive(Debug)]
pub struct TableImport {
  pub kind:    RecordKind,
  /// Rows now in the table, or why the table was left as it was.
  pub outcome: Result<usize, ImportError>,
}

/// Per-table outcomes of one import run, in the order the sources were given.
#[derive(Debug, Default)]
pub struct ImportReport {
  pub tables: Vec<TableImport>,
}

impl ImportReport {
  /// `(kind, rows)` for every table that was replaced.
  pub fn succeeded(&self) -> impl Iterator<Item = (RecordKind, usize)> + '_ {
    self
      .tables
      .iter()
      .filter_map(|t| t.outcome.as_ref().ok().map(|n| (t.kind, *n)))
  }

  /// `(kind, error)` for every table that was left unchanged.
  pub fn failed(&self) -> impl Iterator<Item = (RecordKind, &ImportError)> + '_ {
    self
      .tables
      .iter()
      .filter_map(|t| t.outcome.as_ref().err().map(|e| (t.kind, e)))
  }

  pub fn is_success(&self) -> bool { self.tables.iter().all(|t| t.outcome.is_ok()) }

  pub fn summary(&self) -> Vec<ImportSummary> {
    self
      .tables
      .iter()
      .map(|t| match &t.outcome {
        Ok(rows) => ImportSummary { kind: t.kind, rows: Some(*rows), error: None },
        Err(e) => ImportSummary { kind: t.kind, rows: None, error: Some(e.to_string()) },
      })
      .collect()
  }
}

/// Serializable view of one [`TableImport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub kind:  RecordKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rows:  Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Parse `reader` as a `kind` dataset and replace that table with it.
///
/// The file is parsed completely before the store is touched.
pub async fn import_table<S: RecordStore>(
  store: &S,
  kind: RecordKind,
  reader: impl Read,
) -> Result<usize, ImportError> {
  let table = copbot_csv::parse_table(kind, reader)?;
  store
    .replace_table(table)
    .await
    .map_err(|e| ImportError::Store(Box::new(e)))
}

/// Import several datasets, one table each.
pub async fn import_datasets<S, R, I>(store: &S, sources: I) -> ImportReport
where
  S: RecordStore,
  R: Read,
  I: IntoIterator<Item = (RecordKind, R)>,
{
  import_each(store, sources.into_iter().map(|(kind, reader)| (kind, Ok(reader)))).await
}

/// Import datasets from files on disk. A file that cannot be opened fails
/// only its own table.
pub async fn import_files<S: RecordStore>(
  store: &S,
  files: Vec<(RecordKind, PathBuf)>,
) -> ImportReport {
  let sources = files.into_iter().map(|(kind, path)| {
    let file = File::open(&path)
      .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())));
    (kind, file)
  });
  import_each(store, sources).await
}

async fn import_each<S, R, I>(store: &S, sources: I) -> ImportReport
where
  S: RecordStore,
  R: Read,
  I: IntoIterator<Item = (RecordKind, io::Result<R>)>,
{
  let mut report = ImportReport::default();
  for (kind, source) in sources {
    let outcome = match source {
      Ok(reader) => import_table(store, kind, reader).await,
      Err(e) => Err(ImportError::Io(e)),
    };
    match &outcome {
      Ok(rows) => info!(table = kind.table(), rows, "imported dataset"),
      Err(e) => warn!(table = kind.table(), error = %e, "dataset rejected"),
    }
    report.tables.push(TableImport { kind, outcome });
  }
  report
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use copbot_store_sqlite::SqliteStore;

  use super::*;

  const STATUTES: &str = "law,description,punishment\n\
                          IPC 420,Cheating,Up to 7 years\n\
                          IPC 302,Murder,Death or life imprisonment\n";

  const VIOLATIONS: &str = "violation,fine_amount,points\nSpeeding,1000,3\n";

  async fn store() -> SqliteStore { SqliteStore::open_in_memory().await.unwrap() }

  #[tokio::test]
  async fn import_replaces_table() {
    let s = store().await;
    let rows = import_table(&s, RecordKind::Statute, STATUTES.as_bytes()).await.unwrap();
    assert_eq!(rows, 2);
    assert_eq!(s.list(RecordKind::Statute).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn importing_twice_does_not_duplicate() {
    let s = store().await;
    import_table(&s, RecordKind::Statute, STATUTES.as_bytes()).await.unwrap();
    import_table(&s, RecordKind::Statute, STATUTES.as_bytes()).await.unwrap();
    assert_eq!(s.list(RecordKind::Statute).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn failed_table_is_left_unchanged() {
    let s = store().await;
    import_table(&s, RecordKind::Statute, STATUTES.as_bytes()).await.unwrap();

    let err = import_table(&s, RecordKind::Statute, "law,description\nX,Y\n".as_bytes())
      .await
      .unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)), "{err}");
    assert_eq!(s.list(RecordKind::Statute).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn one_bad_dataset_does_not_block_the_others() {
    let s = store().await;
    let report = import_datasets(
      &s,
      [
        (RecordKind::Case, "fir_number,crime_type\nA1,Theft\n".as_bytes()),
        (RecordKind::Violation, VIOLATIONS.as_bytes()),
        (RecordKind::Statute, STATUTES.as_bytes()),
      ],
    )
    .await;

    assert!(!report.is_success());
    let ok: Vec<_> = report.succeeded().collect();
    assert_eq!(ok, vec![(RecordKind::Violation, 1), (RecordKind::Statute, 2)]);
    let failed: Vec<_> = report.failed().map(|(k, _)| k).collect();
    assert_eq!(failed, vec![RecordKind::Case]);
    assert!(s.list(RecordKind::Case).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unreadable_file_is_reported() {
    let s = store().await;
    let dir = std::env::temp_dir().join(format!("copbot-import-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("violations.csv");
    std::fs::File::create(&good)
      .unwrap()
      .write_all(VIOLATIONS.as_bytes())
      .unwrap();

    let report = import_files(
      &s,
      vec![
        (RecordKind::Violation, good),
        (RecordKind::Statute, dir.join("does-not-exist.csv")),
      ],
    )
    .await;

    let summary = report.summary();
    assert_eq!(summary[0].rows, Some(1));
    let error = summary[1].error.as_deref().unwrap();
    assert!(error.starts_with("cannot read dataset"), "{error}");
    assert!(error.contains("does-not-exist.csv"), "{error}");
    assert!(matches!(report.tables[1].outcome, Err(ImportError::Io(_))));

    std::fs::remove_dir_all(&dir).ok();
  }
}
