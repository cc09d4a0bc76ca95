//! Handlers for `/tables/{kind}` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tables/{kind}` | Every row, in insertion order |
//! | `PUT`  | `/tables/{kind}` | Body: CSV text; replaces the whole table |

use axum::{
  Json,
  extract::{Path, State},
};
use copbot_core::{
  record::{Record, RecordKind},
  store::RecordStore,
};
use copbot_engine::import_table;
use serde::Serialize;
use tracing::info;

use crate::{AppState, Backend, error::ApiError, parse_kind};

#[derive(Debug, Serialize)]
pub struct Replaced {
  pub kind: RecordKind,
  pub rows: usize,
}

/// `GET /tables/{kind}`
pub async fn list<S: Backend>(
  State(state): State<AppState<S>>,
  Path(kind): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
  let kind = parse_kind(&kind)?;
  let rows = RecordStore::list(state.store.as_ref(), kind)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `PUT /tables/{kind}`: a malformed upload is a 400 and leaves the table
/// as it was.
pub async fn replace<S: Backend>(
  State(state): State<AppState<S>>,
  Path(kind): Path<String>,
  body: String,
) -> Result<Json<Replaced>, ApiError> {
  let kind = parse_kind(&kind)?;
  let rows = import_table(state.store.as_ref(), kind, body.as_bytes()).await?;
  info!(table = kind.table(), rows, "table uploaded");
  Ok(Json(Replaced { kind, rows }))
}
