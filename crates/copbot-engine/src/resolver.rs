//! Fallback resolution against the record tables.
//!
//! The cascade is an ordered list of [`Probe`]s. Each probe names a table
//! and how keys are compared; the first probe with a hit wins and its row is
//! rendered with that table's labels.
//!
//! The default order checks case numbers by exact match but the other
//! name-like tables by substring. The asymmetry is preserved as-is: case
//! numbers are identifiers, while names and statute titles are searched.

use std::{future::Future, sync::Arc};

use copbot_core::{
  record::{MatchPolicy, RecordKind},
  store::RecordStore,
};
use tracing::debug;

/// Reply when no probe in the cascade matches.
pub const NOT_FOUND: &str = "🤖 No matching records found.";

/// One step of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
  pub kind:   RecordKind,
  pub policy: MatchPolicy,
}

impl Probe {
  pub const fn new(kind: RecordKind, policy: MatchPolicy) -> Self { Self { kind, policy } }
}

/// Case → missing person → stolen vehicle → violation → statute.
pub const DEFAULT_CASCADE: [Probe; 5] = [
  Probe::new(RecordKind::Case, MatchPolicy::Exact),
  Probe::new(RecordKind::MissingPerson, MatchPolicy::Substring),
  Probe::new(RecordKind::StolenProperty, MatchPolicy::Exact),
  Probe::new(RecordKind::Violation, MatchPolicy::Substring),
  Probe::new(RecordKind::Statute, MatchPolicy::Substring),
];

// ─── Trait ───────────────────────────────────────────────────────────────────

/// What the router calls when the classifier's label has no intent.
pub trait Fallback: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce a reply for `query`. Misses are replies too, never errors.
  fn resolve<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Structured lookups over a [`RecordStore`].
pub struct Resolver<S> {
  store:   Arc<S>,
  cascade: Vec<Probe>,
}

impl<S: RecordStore> Resolver<S> {
  /// A resolver using [`DEFAULT_CASCADE`].
  pub fn new(store: Arc<S>) -> Self { Self::with_cascade(store, DEFAULT_CASCADE.to_vec()) }

  pub fn with_cascade(store: Arc<S>, cascade: Vec<Probe>) -> Self { Self { store, cascade } }

  /// Query one table directly, bypassing the cascade. Returns the formatted
  /// row, or the table's own not-found reply.
  pub async fn lookup(&self, kind: RecordKind, key: &str) -> Result<String, S::Error> {
    let key = key.trim();
    if key.is_empty() {
      return Ok(kind.not_found().to_owned());
    }

    let hit = self.store.find_first(kind, kind.match_policy(), key).await?;
    Ok(match hit {
      Some(record) => record.format(),
      None => kind.not_found().to_owned(),
    })
  }

  pub async fn resolve_case(&self, fir_number: &str) -> Result<String, S::Error> {
    self.lookup(RecordKind::Case, fir_number).await
  }

  pub async fn resolve_vehicle(&self, vehicle_no: &str) -> Result<String, S::Error> {
    self.lookup(RecordKind::StolenProperty, vehicle_no).await
  }

  pub async fn resolve_missing_person(&self, name: &str) -> Result<String, S::Error> {
    self.lookup(RecordKind::MissingPerson, name).await
  }

  pub async fn resolve_violation(&self, violation: &str) -> Result<String, S::Error> {
    self.lookup(RecordKind::Violation, violation).await
  }

  pub async fn resolve_statute(&self, law: &str) -> Result<String, S::Error> {
    self.lookup(RecordKind::Statute, law).await
  }
}

impl<S: RecordStore> Fallback for Resolver<S> {
  type Error = S::Error;

  async fn resolve(&self, query: &str) -> Result<String, S::Error> {
    let query = query.trim();
    if query.is_empty() {
      return Ok(NOT_FOUND.to_owned());
    }

    for probe in &self.cascade {
      if let Some(record) = self.store.find_first(probe.kind, probe.policy, query).await? {
        debug!(table = probe.kind.table(), "cascade hit");
        return Ok(record.format());
      }
    }

    debug!("cascade exhausted");
    Ok(NOT_FOUND.to_owned())
  }
}
