use ndarray::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result, featurizer::SparseVec};

/// Optimiser settings for [`MulticlassLogisticRegression::fit`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
  /// Upper bound on full-batch gradient steps.
  pub max_iter:      usize,
  pub learning_rate: f64,
  /// L2 penalty on the weights (the intercept is not penalised).
  pub l2_penalty:    f64,
  /// Stop once the largest gradient component falls below this.
  pub tolerance:     f64,
}

impl Default for TrainingConfig {
  fn default() -> Self {
    Self {
      max_iter:      1000,
      learning_rate: 1.0,
      l2_penalty:    1e-4,
      tolerance:     1e-6,
    }
  }
}

impl TrainingConfig {
  pub(crate) fn validate(&self) -> Result<()> {
    if !(self.learning_rate > 0. && self.learning_rate.is_finite()) {
      return Err(Error::InvalidConfig(format!(
        "learning_rate must be positive, got {}",
        self.learning_rate
      )));
    }
    if !(self.l2_penalty >= 0. && self.l2_penalty.is_finite()) {
      return Err(Error::InvalidConfig(format!(
        "l2_penalty must be non-negative, got {}",
        self.l2_penalty
      )));
    }
    Ok(())
  }
}

/// Softmax regression over sparse features.
pub(crate) struct MulticlassLogisticRegression {
  /// matrix with shape (f, c)
  ///
  /// - f = number of features
  /// - c = number of classes
  weights:   Array2<f64>,
  intercept: Array1<f64>,
}

impl MulticlassLogisticRegression {
  /// Fit by full-batch gradient descent on the mean cross-entropy, starting
  /// from zero weights. `labels[i]` is the class index of `samples[i]`.
  pub(crate) fn fit(
    samples: &[SparseVec],
    labels: &[usize],
    nb_features: usize,
    nb_classes: usize,
    config: &TrainingConfig,
  ) -> Self {
    let mut model = Self {
      weights:   Array2::zeros((nb_features, nb_classes)),
      intercept: Array1::zeros(nb_classes),
    };
    let scale = 1. / samples.len().max(1) as f64;

    for iteration in 0..config.max_iter {
      let mut grad_w = &model.weights * config.l2_penalty;
      let mut grad_b = Array1::<f64>::zeros(nb_classes);

      for (x, &y) in samples.iter().zip(labels) {
        let mut residual = model.probabilities(x);
        residual[y] -= 1.;
        for &(j, v) in x {
          grad_w.row_mut(j).scaled_add(v * scale, &residual);
        }
        grad_b.scaled_add(scale, &residual);
      }

      let max_grad = grad_w
        .iter()
        .chain(grad_b.iter())
        .fold(0f64, |m, g| m.max(g.abs()));

      model.weights.scaled_add(-config.learning_rate, &grad_w);
      model.intercept.scaled_add(-config.learning_rate, &grad_b);

      if max_grad < config.tolerance {
        debug!(iteration, max_grad, "logistic regression converged");
        break;
      }
    }

    model
  }

  /// Class probabilities for one sample.
  pub(crate) fn probabilities(&self, x: &SparseVec) -> Array1<f64> {
    let mut logits = self.intercept.clone();
    for &(j, v) in x {
      logits.scaled_add(v, &self.weights.row(j));
    }
    softmax(&mut logits);
    logits
  }
}

fn softmax(logits: &mut Array1<f64>) {
  let max = logits.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
  logits.mapv_inplace(|v| (v - max).exp());
  let sum = logits.sum();
  *logits /= sum;
}

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: &Array1<f64>) -> usize {
  let mut best = 0;
  for (idx, &v) in values.iter().enumerate() {
    if v > values[best] {
      best = idx;
    }
  }
  best
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn softmax_sums_to_one() {
    let mut logits = array![1.0, 2.0, 3.0];
    softmax(&mut logits);
    assert!((logits.sum() - 1.).abs() < 1e-12);
    assert!(logits[2] > logits[1] && logits[1] > logits[0]);
  }

  #[test]
  fn argmax_prefers_first_on_ties() {
    assert_eq!(argmax(&array![0.25, 0.5, 0.5]), 1);
    assert_eq!(argmax(&array![0.5, 0.5]), 0);
  }

  #[test]
  fn fit_separates_disjoint_features() {
    let samples = vec![vec![(0, 1.)], vec![(1, 1.)], vec![(2, 1.)]];
    let labels = [0, 1, 2];
    let model = MulticlassLogisticRegression::fit(
      &samples,
      &labels,
      3,
      3,
      &TrainingConfig::default(),
    );
    for (x, &y) in samples.iter().zip(&labels) {
      assert_eq!(argmax(&model.probabilities(x)), y);
    }
  }

  #[test]
  fn untrained_model_is_uniform() {
    let model = MulticlassLogisticRegression::fit(
      &[vec![(0, 1.)]],
      &[0],
      1,
      4,
      &TrainingConfig { max_iter: 0, ..TrainingConfig::default() },
    );
    let p = model.probabilities(&vec![(0, 1.)]);
    assert!(p.iter().all(|&v| (v - 0.25).abs() < 1e-12));
  }

  #[test]
  fn rejects_non_positive_learning_rate() {
    let config = TrainingConfig { learning_rate: 0., ..TrainingConfig::default() };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
  }
}
