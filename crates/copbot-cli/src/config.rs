//! Runtime configuration: an optional TOML file layered under `COPBOT_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use copbot_classifier::TrainingConfig;
use serde::Deserialize;

/// Everything the `copbot` binary needs to wire itself up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub store_path:    PathBuf,
  pub intents_path:  PathBuf,
  pub host:          String,
  pub port:          u16,
  /// Seeds the response sampler. Replies are entropy-seeded when unset.
  pub response_seed: Option<u64>,
  pub history_limit: usize,
  pub classifier:    TrainingConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path:    PathBuf::from("copbot.db"),
      intents_path:  PathBuf::from("copbot_intents.json"),
      host:          "127.0.0.1".to_string(),
      port:          8080,
      response_seed: None,
      history_limit: 20,
      classifier:    TrainingConfig::default(),
    }
  }
}

impl AppConfig {
  /// Read `path` (if it exists) and the environment. Nested keys use a
  /// double underscore, e.g. `COPBOT_CLASSIFIER__MAX_ITER`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("COPBOT")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.intents_path = expand_tilde(&cfg.intents_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
