//! [`IntentClassifier`]: fitted vector space plus linear model.

use std::collections::BTreeSet;

use copbot_core::intent::TrainingExample;
use ndarray::Array1;
use tracing::{Level, debug, enabled, info};

use crate::{
  Error, Result,
  featurizer::TfIdfVectorizer,
  logreg::{MulticlassLogisticRegression, TrainingConfig, argmax},
};

/// A fitted intent classifier. Immutable once built; refitting means
/// building a new one.
pub struct IntentClassifier {
  vectorizer: TfIdfVectorizer,
  logreg:     MulticlassLogisticRegression,
  /// Class labels, sorted; index `i` is the model's class `i`.
  labels:     Vec<String>,
}

impl IntentClassifier {
  /// Fit the vector space and the model on `examples`.
  pub fn fit(examples: &[TrainingExample], config: &TrainingConfig) -> Result<Self> {
    if examples.is_empty() {
      return Err(Error::EmptyTrainingSet);
    }
    config.validate()?;

    let labels: Vec<String> = examples
      .iter()
      .map(|e| e.tag.clone())
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect();

    let vectorizer = TfIdfVectorizer::fit(examples.iter().map(|e| e.utterance.as_str()));
    let samples: Vec<_> = examples
      .iter()
      .map(|e| vectorizer.transform(&e.utterance))
      .collect();
    let targets: Vec<usize> = examples
      .iter()
      .map(|e| labels.binary_search(&e.tag).unwrap_or_default())
      .collect();

    let logreg = MulticlassLogisticRegression::fit(
      &samples,
      &targets,
      vectorizer.vocabulary_len(),
      labels.len(),
      config,
    );

    info!(
      examples = examples.len(),
      classes = labels.len(),
      vocabulary = vectorizer.vocabulary_len(),
      "fitted intent classifier"
    );

    Ok(Self { vectorizer, logreg, labels })
  }

  /// The single highest-scoring tag for `text`. Always returns a tag.
  pub fn predict(&self, text: &str) -> &str {
    let probabilities = self.logreg.probabilities(&self.vectorizer.transform(text));
    let best = argmax(&probabilities);
    if enabled!(Level::DEBUG) {
      debug!(
        tag = %self.labels[best],
        scores = ?self.ranked(&probabilities),
        "classified input"
      );
    }
    &self.labels[best]
  }

  /// Every tag with its probability for `text`, most likely first.
  pub fn scores(&self, text: &str) -> Vec<(&str, f64)> {
    self.ranked(&self.logreg.probabilities(&self.vectorizer.transform(text)))
  }

  fn ranked(&self, probabilities: &Array1<f64>) -> Vec<(&str, f64)> {
    let mut scored: Vec<(&str, f64)> = self
      .labels
      .iter()
      .map(String::as_str)
      .zip(probabilities.iter().copied())
      .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
  }

  pub fn labels(&self) -> &[String] { &self.labels }
}
