//! JSON REST API for CopBot.
//!
//! Exposes an axum [`Router`] over a query router and the record tables of
//! any backend implementing both [`RecordStore`] and [`InteractionLog`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", copbot_api::api_router(state))
//! ```

pub mod chat;
pub mod error;
pub mod history;
pub mod lookup;
pub mod tables;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use copbot_core::{
  record::RecordKind,
  store::{InteractionLog, RecordStore},
};
use copbot_engine::Resolver;

pub use error::ApiError;

/// A storage backend usable by the API: record tables plus the interaction
/// log, typically one SQLite file.
pub trait Backend: RecordStore + InteractionLog + 'static {}

impl<T: RecordStore + InteractionLog + 'static> Backend for T {}

/// The query router as wired by the API: table cascade as fallback, the
/// backend as log.
pub type QueryRouter<S> = copbot_engine::Router<Resolver<S>, S>;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub router:        Arc<QueryRouter<S>>,
  pub resolver:      Arc<Resolver<S>>,
  pub store:         Arc<S>,
  /// Entries returned by `GET /history` without `?limit`.
  pub history_limit: usize,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      router:        self.router.clone(),
      resolver:      self.resolver.clone(),
      store:         self.store.clone(),
      history_limit: self.history_limit,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S: Backend>(state: AppState<S>) -> Router<()> {
  Router::new()
    .route("/chat", post(chat::handler::<S>))
    .route("/lookup/{kind}", get(lookup::handler::<S>))
    .route("/tables/{kind}", get(tables::list::<S>).put(tables::replace::<S>))
    .route("/history", get(history::handler::<S>))
    .with_state(state)
}

/// Resolve a `{kind}` path segment; unknown kinds are 404s.
pub(crate) fn parse_kind(raw: &str) -> Result<RecordKind, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::NotFound(format!("no table named {raw:?}")))
}

// ─── Integration tests ────────────────────────────────────────────────────────
