//! Handler for `GET /lookup/{kind}`: one table, no classifier, no cascade.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Backend, error::ApiError, parse_kind};

#[derive(Debug, Deserialize)]
pub struct LookupParams {
  #[serde(default)]
  pub q: String,
}

#[derive(Debug, Serialize)]
pub struct LookupReply {
  pub response: String,
}

/// `GET /lookup/{kind}?q=<key>`
///
/// A miss is still a 200 carrying the table's not-found reply.
pub async fn handler<S: Backend>(
  State(state): State<AppState<S>>,
  Path(kind): Path<String>,
  Query(params): Query<LookupParams>,
) -> Result<Json<LookupReply>, ApiError> {
  let kind     = parse_kind(&kind)?;
  let response = state
    .resolver
    .lookup(kind, &params.q)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(LookupReply { response }))
}
