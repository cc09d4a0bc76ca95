//! Interaction log entries.
//!
//! Every routed query is appended to an append-only log of
//! `(user input, bot response, timestamp)` rows. The log grows without
//! bound; there is no retention policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An interaction before it is persisted; the log assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInteraction {
  pub user_input:   String,
  pub bot_response: String,
}

impl NewInteraction {
  pub fn new(user_input: impl Into<String>, bot_response: impl Into<String>) -> Self {
    Self { user_input: user_input.into(), bot_response: bot_response.into() }
  }
}

/// A persisted interaction. Ids increase with insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionLogEntry {
  pub id:           i64,
  pub user_input:   String,
  pub bot_response: String,
  pub timestamp:    DateTime<Utc>,
}
