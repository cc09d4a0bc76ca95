//! Handler for `POST /chat`.

use axum::{
  Json,
  extract::State,
};
use copbot_engine::Routed;
use serde::Deserialize;

use crate::{AppState, Backend, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  pub text: String,
}

/// `POST /chat`: body: `{"text":"..."}`. Returns the reply and the intent
/// tag it came from (`null` for table lookups).
pub async fn handler<S: Backend>(
  State(state): State<AppState<S>>,
  Json(body): Json<ChatBody>,
) -> Result<Json<Routed>, ApiError> {
  if body.text.trim().is_empty() {
    return Err(ApiError::BadRequest("text must not be empty".to_owned()));
  }
  let routed = state.router.route(&body.text).await?;
  Ok(Json(routed))
}
