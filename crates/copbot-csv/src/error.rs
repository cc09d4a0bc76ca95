//! Error types for the copbot-csv codec.

use copbot_core::record::RecordKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} dataset is missing the {column:?} column")]
  MissingColumn {
    kind:   RecordKind,
    column: &'static str,
  },

  #[error("{kind} dataset has no header row")]
  MissingHeader { kind: RecordKind },

  #[error("{kind} dataset row {row} has an empty {column:?}")]
  EmptyKey {
    kind:   RecordKind,
    row:    usize,
    column: &'static str,
  },

  #[error("malformed CSV: {0}")]
  Csv(#[from] csv::Error),

  #[error("core error: {0}")]
  Core(#[from] copbot_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
