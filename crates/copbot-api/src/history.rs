//! Handler for `GET /history`.

use axum::{
  Json,
  extract::{Query, State},
};
use copbot_core::{history::InteractionLogEntry, store::InteractionLog};
use serde::Deserialize;

use crate::{AppState, Backend, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct HistoryParams {
  pub limit: Option<usize>,
}

/// `GET /history[?limit=n]`: newest first.
pub async fn handler<S: Backend>(
  State(state): State<AppState<S>>,
  Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<InteractionLogEntry>>, ApiError> {
  let limit   = params.limit.unwrap_or(state.history_limit);
  let entries = InteractionLog::recent(state.store.as_ref(), limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(entries))
}
