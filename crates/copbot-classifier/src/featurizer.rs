//! Tokenisation and TF-IDF vectorisation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse feature vector: `(feature index, weight)` pairs sorted by index.
pub(crate) type SparseVec = Vec<(usize, f64)>;

/// Lowercase `text` and split it into word tokens.
///
/// A token is a maximal run of alphanumeric or `_` characters; tokens
/// shorter than two characters are dropped.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
  text
    .split(|c: char| !(c.is_alphanumeric() || c == '_'))
    .filter(|t| t.chars().count() >= 2)
    .map(str::to_lowercase)
    .collect()
}

/// Term-frequency / inverse-document-frequency vector space.
///
/// The vocabulary is fixed at fit time. Tokens not seen during fitting are
/// ignored by [`transform`](Self::transform).
#[derive(Debug, Clone)]
pub(crate) struct TfIdfVectorizer {
  vocabulary: HashMap<String, usize>,
  idf_diag:   Vec<f64>,
}

impl TfIdfVectorizer {
  /// Build the vocabulary and smoothed idf weights from `documents`.
  ///
  /// Feature indices follow the lexicographic order of the terms.
  pub fn fit<'a>(documents: impl IntoIterator<Item = &'a str>) -> Self {
    let tokenized: Vec<BTreeSet<String>> = documents
      .into_iter()
      .map(|doc| tokenize(doc).into_iter().collect())
      .collect();

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for terms in &tokenized {
      for term in terms {
        *doc_freq.entry(term.as_str()).or_default() += 1;
      }
    }

    let n_docs = tokenized.len() as f64;
    let mut vocabulary = HashMap::with_capacity(doc_freq.len());
    let mut idf_diag = Vec::with_capacity(doc_freq.len());
    for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
      vocabulary.insert(term.to_owned(), idx);
      idf_diag.push(((1. + n_docs) / (1. + df as f64)).ln() + 1.);
    }

    Self { vocabulary, idf_diag }
  }

  pub fn vocabulary_len(&self) -> usize { self.idf_diag.len() }

  /// L2-normalised tf-idf weights for `input`.
  pub(crate) fn transform(&self, input: &str) -> SparseVec {
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
    for token in tokenize(input) {
      if let Some(&idx) = self.vocabulary.get(&token) {
        *counts.entry(idx).or_default() += 1.;
      }
    }

    let mut tfidf: SparseVec = counts
      .into_iter()
      .map(|(idx, tf)| (idx, tf * self.idf_diag[idx]))
      .collect();

    let l2_norm = tfidf.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
    if l2_norm > 0. {
      for (_, v) in &mut tfidf {
        *v /= l2_norm;
      }
    }
    tfidf
  }
}
