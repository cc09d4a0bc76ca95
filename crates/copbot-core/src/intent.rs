//! Intent corpus: labelled example utterances and canned replies.
//!
//! The corpus is read once at start-up from a JSON document shaped like
//!
//! ```json
//! { "intents": [ { "tag": "greeting", "patterns": ["hi"], "responses": ["Hello!"] } ] }
//! ```
//!
//! and is immutable afterwards. Loading is all-or-nothing: one malformed
//! entry rejects the whole document.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

// ─── Definitions ─────────────────────────────────────────────────────────────

/// A labelled conversational category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDefinition {
  pub tag:       String,
  /// Example utterances the classifier is fitted on. Never empty.
  pub patterns:  Vec<String>,
  /// Candidate replies; one is sampled per matched query. Never empty.
  pub responses: Vec<String>,
}

impl IntentDefinition {
  fn validate(&self) -> Result<()> {
    if self.tag.trim().is_empty() {
      return Err(Error::CorpusFormat("intent has an empty tag".into()));
    }
    if self.patterns.is_empty() {
      return Err(Error::CorpusFormat(format!(
        "intent {:?} has no patterns",
        self.tag
      )));
    }
    if self.responses.is_empty() {
      return Err(Error::CorpusFormat(format!(
        "intent {:?} has no responses",
        self.tag
      )));
    }
    if self.responses.iter().any(|r| r.trim().is_empty()) {
      return Err(Error::CorpusFormat(format!(
        "intent {:?} has a blank response",
        self.tag
      )));
    }
    Ok(())
  }
}

/// One `(utterance, tag)` pair, flattened out of the corpus for fitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
  pub utterance: String,
  pub tag:       String,
}

// ─── Corpus ──────────────────────────────────────────────────────────────────

/// The validated set of intents, keyed by tag.
#[derive(Debug, Clone)]
pub struct IntentCorpus {
  intents: Vec<IntentDefinition>,
  by_tag:  HashMap<String, usize>,
}

impl IntentCorpus {
  /// Build a corpus from already-parsed definitions, enforcing that every
  /// entry is complete and that tags are unique.
  pub fn new(intents: Vec<IntentDefinition>) -> Result<Self> {
    if intents.is_empty() {
      return Err(Error::CorpusFormat("corpus defines no intents".into()));
    }

    let mut by_tag = HashMap::with_capacity(intents.len());
    for (idx, intent) in intents.iter().enumerate() {
      intent.validate()?;
      if by_tag.insert(intent.tag.clone(), idx).is_some() {
        return Err(Error::CorpusFormat(format!(
          "duplicate intent tag {:?}",
          intent.tag
        )));
      }
    }

    Ok(Self { intents, by_tag })
  }

  /// Parse a corpus from its JSON text.
  pub fn from_json(input: &str) -> Result<Self> {
    let doc: Value = serde_json::from_str(input)?;

    let entries = doc
      .get("intents")
      .and_then(Value::as_array)
      .ok_or_else(|| {
        Error::CorpusFormat("missing top-level `intents` list".into())
      })?;

    let intents = entries
      .iter()
      .enumerate()
      .map(|(i, entry)| {
        serde_json::from_value::<IntentDefinition>(entry.clone())
          .map_err(|e| Error::CorpusFormat(format!("intent #{i}: {e}")))
      })
      .collect::<Result<Vec<_>>>()?;

    Self::new(intents)
  }

  /// Read and parse the corpus file at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json(&raw)
  }

  pub fn lookup(&self, tag: &str) -> Option<&IntentDefinition> {
    self.by_tag.get(tag).map(|&idx| &self.intents[idx])
  }

  pub fn len(&self) -> usize { self.intents.len() }

  pub fn is_empty(&self) -> bool { self.intents.is_empty() }

  /// Flatten every `(pattern, tag)` pair, in corpus order.
  pub fn training_examples(&self) -> Vec<TrainingExample> {
    self
      .intents
      .iter()
      .flat_map(|intent| {
        intent.patterns.iter().map(|p| TrainingExample {
          utterance: p.clone(),
          tag:       intent.tag.clone(),
        })
      })
      .collect()
  }
}
