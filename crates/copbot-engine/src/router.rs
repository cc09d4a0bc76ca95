//! [`Router`]: the chat entry point.

use std::sync::{Arc, Mutex, PoisonError};

use copbot_classifier::IntentClassifier;
use copbot_core::{
  history::NewInteraction,
  intent::IntentCorpus,
  store::InteractionLog,
};
use rand::{rngs::StdRng, seq::SliceRandom};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Error, Result, resolver::Fallback};

/// A reply and the intent it came from; `tag` is `None` when the reply came
/// from the fallback resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routed {
  pub response: String,
  pub tag:      Option<String>,
}

/// Classify first; answer from the intent corpus on a hit, otherwise
/// delegate to the fallback. Every call is appended to the interaction log.
pub struct Router<F, L> {
  corpus:     Arc<IntentCorpus>,
  classifier: Arc<IntentClassifier>,
  fallback:   Arc<F>,
  log:        Arc<L>,
  /// Response sampler. Seed it for reproducible replies.
  rng:        Mutex<StdRng>,
}

impl<F, L> Router<F, L>
where
  F: Fallback,
  L: InteractionLog,
{
  pub fn new(
    corpus: Arc<IntentCorpus>,
    classifier: Arc<IntentClassifier>,
    fallback: Arc<F>,
    log: Arc<L>,
    rng: StdRng,
  ) -> Self {
    Self { corpus, classifier, fallback, log, rng: Mutex::new(rng) }
  }

  /// Route one line of user text to exactly one reply.
  pub async fn route(&self, text: &str) -> Result<Routed> {
    let tag = self.classifier.predict(text);

    let routed = match self.corpus.lookup(tag) {
      Some(intent) => Routed {
        response: self.sample(&intent.responses),
        tag:      Some(tag.to_owned()),
      },
      None => {
        debug!(tag, "predicted tag has no intent; using fallback");
        let response = self
          .fallback
          .resolve(text)
          .await
          .map_err(|e| Error::Fallback(Box::new(e)))?;
        Routed { response, tag: None }
      }
    };

    if let Err(e) = self
      .log
      .append(NewInteraction::new(text, routed.response.clone()))
      .await
    {
      warn!(error = %e, "failed to record interaction");
    }

    Ok(routed)
  }

  pub fn corpus(&self) -> &IntentCorpus { &self.corpus }

  fn sample(&self, responses: &[String]) -> String {
    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
    responses.choose(&mut *rng).cloned().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashSet,
    io,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use copbot_classifier::TrainingConfig;
  use copbot_core::history::InteractionLogEntry;
  use rand::SeedableRng;

  use super::*;

  // ─── Test doubles ────────────────────────────────────────────────────────

  #[derive(Default)]
  struct SpyFallback {
    calls: AtomicUsize,
  }

  impl Fallback for SpyFallback {
    type Error = io::Error;

    async fn resolve(&self, query: &str) -> std::result::Result<String, io::Error> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(format!("fallback:{query}"))
    }
  }

  #[derive(Default)]
  struct MemoryLog {
    entries: Mutex<Vec<NewInteraction>>,
  }

  impl InteractionLog for MemoryLog {
    type Error = io::Error;

    async fn append(
      &self,
      entry: NewInteraction,
    ) -> std::result::Result<InteractionLogEntry, io::Error> {
      let mut entries = self.entries.lock().unwrap();
      entries.push(entry.clone());
      Ok(InteractionLogEntry {
        id:           entries.len() as i64,
        user_input:   entry.user_input,
        bot_response: entry.bot_response,
        timestamp:    Default::default(),
      })
    }

    async fn recent(
      &self,
      _limit: usize,
    ) -> std::result::Result<Vec<InteractionLogEntry>, io::Error> {
      Ok(Vec::new())
    }
  }

  struct BrokenLog;

  impl InteractionLog for BrokenLog {
    type Error = io::Error;

    async fn append(
      &self,
      _entry: NewInteraction,
    ) -> std::result::Result<InteractionLogEntry, io::Error> {
      Err(io::Error::other("disk full"))
    }

    async fn recent(
      &self,
      _limit: usize,
    ) -> std::result::Result<Vec<InteractionLogEntry>, io::Error> {
      Err(io::Error::other("disk full"))
    }
  }

  const CORPUS: &str = r#"{
    "intents": [
      { "tag": "greeting", "patterns": ["hello", "hi"], "responses": ["Hello, officer here."] },
      { "tag": "goodbye", "patterns": ["bye", "see you later"],
        "responses": ["Stay safe.", "Goodbye.", "Take care.", "See you."] },
      { "tag": "help", "patterns": ["help", "what can you do"], "responses": ["Ask me about FIRs."] }
    ]
  }"#;

  fn corpus() -> Arc<IntentCorpus> { Arc::new(IntentCorpus::from_json(CORPUS).unwrap()) }

  fn classifier_for(corpus: &IntentCorpus) -> Arc<IntentClassifier> {
    Arc::new(
      IntentClassifier::fit(&corpus.training_examples(), &TrainingConfig::default())
        .unwrap(),
    )
  }

  fn router<L: InteractionLog>(
    fallback: Arc<SpyFallback>,
    log: Arc<L>,
    seed: u64,
  ) -> Router<SpyFallback, L> {
    let corpus = corpus();
    let classifier = classifier_for(&corpus);
    Router::new(corpus, classifier, fallback, log, StdRng::seed_from_u64(seed))
  }

  #[tokio::test]
  async fn matched_intent_answers_without_fallback() {
    let spy = Arc::new(SpyFallback::default());
    let r = router(spy.clone(), Arc::new(MemoryLog::default()), 7);

    let routed = r.route("hello").await.unwrap();
    assert_eq!(routed.response, "Hello, officer here.");
    assert_eq!(routed.tag.as_deref(), Some("greeting"));
    assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn unknown_label_falls_back() {
    // The classifier knows a tag the router's corpus does not define.
    let wider = IntentCorpus::from_json(
      r#"{"intents": [
        {"tag": "greeting", "patterns": ["hello"], "responses": ["Hi"]},
        {"tag": "fir_status", "patterns": ["A123 fir status"], "responses": ["unused"]}
      ]}"#,
    )
    .unwrap();
    let narrow = Arc::new(
      IntentCorpus::from_json(
        r#"{"intents": [{"tag": "greeting", "patterns": ["hello"], "responses": ["Hi"]}]}"#,
      )
      .unwrap(),
    );

    let spy = Arc::new(SpyFallback::default());
    let r = Router::new(
      narrow,
      classifier_for(&wider),
      spy.clone(),
      Arc::new(MemoryLog::default()),
      StdRng::seed_from_u64(1),
    );

    let routed = r.route("A123 fir status").await.unwrap();
    assert_eq!(routed.response, "fallback:A123 fir status");
    assert_eq!(routed.tag, None);
    assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn seeded_sampling_is_reproducible() {
    let log = Arc::new(MemoryLog::default());
    let a = router(Arc::new(SpyFallback::default()), log.clone(), 42);
    let b = router(Arc::new(SpyFallback::default()), log, 42);

    for _ in 0..10 {
      assert_eq!(
        a.route("bye").await.unwrap(),
        b.route("bye").await.unwrap()
      );
    }
  }

  #[tokio::test]
  async fn sampling_covers_the_response_set() {
    let r = router(Arc::new(SpyFallback::default()), Arc::new(MemoryLog::default()), 3);
    let goodbye = r.corpus().lookup("goodbye").unwrap().responses.clone();

    let mut seen = HashSet::new();
    for _ in 0..200 {
      let routed = r.route("bye").await.unwrap();
      assert!(goodbye.contains(&routed.response));
      seen.insert(routed.response);
    }
    assert_eq!(seen.len(), goodbye.len());
  }

  #[tokio::test]
  async fn every_route_is_logged() {
    let log = Arc::new(MemoryLog::default());
    let r = router(Arc::new(SpyFallback::default()), log.clone(), 0);

    r.route("hello").await.unwrap();
    r.route("what can you do").await.unwrap();

    let entries = log.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], NewInteraction::new("hello", "Hello, officer here."));
    assert_eq!(entries[1].bot_response, "Ask me about FIRs.");
  }

  #[tokio::test]
  async fn log_failure_does_not_fail_the_route() {
    let r = router(Arc::new(SpyFallback::default()), Arc::new(BrokenLog), 0);
    let routed = r.route("hello").await.unwrap();
    assert_eq!(routed.response, "Hello, officer here.");
  }

  #[tokio::test]
  async fn any_non_empty_input_gets_a_non_empty_reply() {
    let r = router(Arc::new(SpyFallback::default()), Arc::new(MemoryLog::default()), 9);
    for text in ["hello", "?", "zzzz qqqq", "help me please", "A123"] {
      let routed = r.route(text).await.unwrap();
      assert!(!routed.response.is_empty(), "{text}");
    }
  }
}
