//! Intent classification for CopBot.
//!
//! A TF-IDF vector space is built from the corpus patterns, and a
//! multinomial logistic regression maps vectors to intent tags. Fitting is
//! deterministic: the same examples and configuration always yield the same
//! model. There is no confidence threshold; every input gets a tag.
//!
//! ```no_run
//! use copbot_classifier::{IntentClassifier, TrainingConfig};
//! use copbot_core::intent::IntentCorpus;
//!
//! let corpus = IntentCorpus::load("copbot_intents.json").unwrap();
//! let clf = IntentClassifier::fit(&corpus.training_examples(), &TrainingConfig::default()).unwrap();
//! println!("{}", clf.predict("hello there"));
//! ```

mod classifier;
mod featurizer;
mod logreg;

pub mod error;

pub use classifier::IntentClassifier;
pub use error::{Error, Result};
pub use logreg::TrainingConfig;
