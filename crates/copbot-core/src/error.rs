//! Error types for `copbot-core`.

use thiserror::Error;

use crate::record::RecordKind;

#[derive(Debug, Error)]
pub enum Error {
  /// The intent corpus is malformed or incomplete. Fatal at start-up.
  #[error("intent corpus is malformed: {0}")]
  CorpusFormat(String),

  #[error("unknown record kind: {0:?}")]
  UnknownKind(String),

  #[error("{kind} record expects {expected} fields, got {found}")]
  FieldCount {
    kind:     RecordKind,
    expected: usize,
    found:    usize,
  },

  #[error("{found} record cannot be placed in the {expected} table")]
  KindMismatch {
    expected: RecordKind,
    found:    RecordKind,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
