//! Error types for `copbot-engine`.
//!
//! Lookup misses are never errors; they come back as not-found replies.
//! Only storage faults surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("fallback lookup failed: {0}")]
  Fallback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why one table's dataset could not be imported. The table is left as it
/// was.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("invalid dataset: {0}")]
  Parse(#[from] copbot_csv::Error),

  #[error("cannot read dataset: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
