//! CSV codec for CopBot dataset uploads.
//!
//! Turns one uploaded CSV file into a typed [`RecordTable`]. Pure
//! synchronous; no database dependencies. A file is accepted or rejected as
//! a whole: one bad row rejects the entire dataset, so a failed import can
//! never leave a table half-replaced.
//!
//! # Quick start
//!
//! ```no_run
//! use copbot_core::record::RecordKind;
//!
//! let csv = "fir_number,crime_type,status,police_station\nA123,Theft,Open,Central\n";
//! let table = copbot_csv::parse_str(RecordKind::Case, csv).unwrap();
//! assert_eq!(table.len(), 1);
//! ```

pub mod error;

use std::io::Read;

use copbot_core::record::{Record, RecordKind, RecordTable};

pub use error::{Error, Result};

/// Parse a dataset of `kind` from `reader`.
///
/// The header row must name every column of `kind`. Matching ignores case
/// and surrounding whitespace, columns may appear in any order, and extra
/// columns are ignored. Every row needs a non-blank key.
pub fn parse_table(kind: RecordKind, reader: impl Read) -> Result<RecordTable> {
  let mut csv_reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::All)
    .from_reader(reader);

  let headers = csv_reader.headers()?.clone();
  if headers.is_empty() {
    return Err(Error::MissingHeader { kind });
  }

  let positions = kind
    .columns()
    .iter()
    .map(|&column| {
      headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or(Error::MissingColumn { kind, column })
    })
    .collect::<Result<Vec<_>>>()?;

  let mut rows = Vec::new();
  for (idx, record) in csv_reader.records().enumerate() {
    let record = record?;
    let values: Vec<String> = positions
      .iter()
      .map(|&p| record.get(p).unwrap_or_default().to_owned())
      .collect();

    if values[0].trim().is_empty() {
      let row = record.position().map_or(idx + 2, |p| p.line() as usize);
      return Err(Error::EmptyKey { kind, row, column: kind.key_column() });
    }

    rows.push(Record::from_values(kind, values)?);
  }

  Ok(RecordTable::new(kind, rows)?)
}

/// Parse a dataset of `kind` held in memory.
pub fn parse_str(kind: RecordKind, input: &str) -> Result<RecordTable> {
  parse_table(kind, input.as_bytes())
}
