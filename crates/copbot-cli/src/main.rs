//! `copbot`: police-station query assistant.
//!
//! # Usage
//!
//! ```text
//! copbot import --cases fir.csv --statutes laws.csv
//! copbot chat
//! copbot lookup vehicle KA01AB1234
//! copbot serve --config ~/.config/copbot/copbot.toml
//! ```

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use copbot_api::{AppState, QueryRouter};
use copbot_classifier::IntentClassifier;
use copbot_core::{intent::IntentCorpus, record::RecordKind, store::InteractionLog};
use copbot_engine::{Resolver, import_files};
use copbot_store_sqlite::SqliteStore;
use rand::{SeedableRng, rngs::StdRng};
use tokio::{
  io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
  net::TcpListener,
};
use tower_http::trace::TraceLayer;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "copbot", version, about = "Police-station query assistant")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "copbot.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Serve the JSON API over HTTP.
  Serve,
  /// Read questions from stdin, one per line, and print each reply.
  Chat,
  /// Look up one key in one table.
  Lookup {
    /// case, vehicle, missing_person, violation or statute.
    kind: RecordKind,
    /// The key to look up; several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    key:  Vec<String>,
  },
  /// Replace record tables from CSV files. Tables not named are untouched.
  Import {
    #[arg(long, value_name = "FILE")]
    cases:      Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    vehicles:   Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    missing:    Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    violations: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    statutes:   Option<PathBuf>,
  },
  /// Print recent interactions, newest first.
  History {
    #[arg(short, long)]
    limit: Option<usize>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let store = Arc::new(
    SqliteStore::open(&cfg.store_path)
      .await
      .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?,
  );

  match cli.command {
    Command::Serve => serve(&cfg, store).await,
    Command::Chat => chat(&cfg, store).await,
    Command::Lookup { kind, key } => {
      let reply = Resolver::new(store)
        .lookup(kind, &key.join(" "))
        .await
        .context("lookup failed")?;
      println!("{reply}");
      Ok(())
    }
    Command::Import { cases, vehicles, missing, violations, statutes } => {
      let files: Vec<(RecordKind, PathBuf)> = [
        (RecordKind::Case, cases),
        (RecordKind::StolenProperty, vehicles),
        (RecordKind::MissingPerson, missing),
        (RecordKind::Violation, violations),
        (RecordKind::Statute, statutes),
      ]
      .into_iter()
      .filter_map(|(kind, path)| path.map(|p| (kind, p)))
      .collect();
      import(store, files).await
    }
    Command::History { limit } => {
      let entries = store
        .recent(limit.unwrap_or(cfg.history_limit))
        .await
        .context("failed to read history")?;
      for e in entries {
        println!("[{}] you: {}", e.timestamp.format("%Y-%m-%d %H:%M:%S"), e.user_input);
        println!("  bot: {}", e.bot_response.replace('\n', "\n       "));
      }
      Ok(())
    }
  }
}

// ─── Wiring ───────────────────────────────────────────────────────────────────

/// Load the intent corpus, fit the classifier and assemble the router.
fn build_state(cfg: &AppConfig, store: Arc<SqliteStore>) -> Result<AppState<SqliteStore>> {
  let corpus = IntentCorpus::load(&cfg.intents_path)
    .with_context(|| format!("failed to load intents from {:?}", cfg.intents_path))?;
  let classifier = IntentClassifier::fit(&corpus.training_examples(), &cfg.classifier)
    .context("failed to train intent classifier")?;
  info!(intents = corpus.len(), "intent classifier ready");

  let rng = match cfg.response_seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let resolver = Arc::new(Resolver::new(store.clone()));
  let router = Arc::new(QueryRouter::new(
    Arc::new(corpus),
    Arc::new(classifier),
    resolver.clone(),
    store.clone(),
    rng,
  ));

  Ok(AppState { router, resolver, store, history_limit: cfg.history_limit })
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

async fn serve(cfg: &AppConfig, store: Arc<SqliteStore>) -> Result<()> {
  let state = build_state(cfg, store)?;
  let app = copbot_api::api_router(state).layer(TraceLayer::new_for_http());
  let address = cfg.address();

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

async fn chat(cfg: &AppConfig, store: Arc<SqliteStore>) -> Result<()> {
  let state = build_state(cfg, store)?;
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut stdout = tokio::io::stdout();

  loop {
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    let Some(line) = lines.next_line().await? else { break };
    let text = line.trim();
    if text.is_empty() {
      continue;
    }

    let routed = state.router.route(text).await.context("failed to route query")?;
    stdout.write_all(format!("{}\n", routed.response).as_bytes()).await?;
  }

  Ok(())
}

async fn import(store: Arc<SqliteStore>, files: Vec<(RecordKind, PathBuf)>) -> Result<()> {
  if files.is_empty() {
    bail!("nothing to import; pass at least one of --cases, --vehicles, --missing, --violations, --statutes");
  }

  let report = import_files(store.as_ref(), files).await;
  for t in &report.tables {
    match &t.outcome {
      Ok(rows) => println!("{:<15} {rows} rows", t.kind.to_string()),
      Err(e) => println!("{:<15} failed: {e}", t.kind.to_string()),
    }
  }

  if report.succeeded().next().is_none() {
    bail!("every dataset was rejected");
  }
  Ok(())
}
