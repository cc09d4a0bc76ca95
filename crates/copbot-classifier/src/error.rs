//! Error type for `copbot-classifier`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot fit a classifier without training examples")]
  EmptyTrainingSet,

  #[error("invalid training configuration: {0}")]
  InvalidConfig(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
