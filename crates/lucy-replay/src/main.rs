//! `lucy-replay`: feeds a recorded solver event log through the view models
//! and prints the resulting snapshot as JSON.
//!
//! # Usage
//!
//! ```text
//! lucy-replay --input events.jsonl --pretty
//! solver --emit-events | lucy-replay --config lucy.toml
//! ```
//!
//! Settings come from the TOML file named by `--config` (optional), then from
//! `LUCY_*` environment variables, e.g. `LUCY_ON_ERROR=fail` or
//! `LUCY_POLICY__AGGREGATE=max`.

use std::{
  fs::File,
  io::{self, BufReader, Write as _},
  path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use lucy_replay::{ReplayConfig, Views, replay};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Replay solver events into the Lucy views")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lucy.toml")]
  config: PathBuf,

  /// JSON-lines event log. Reads stdin when omitted.
  #[arg(short, long, value_name = "FILE")]
  input: Option<PathBuf>,

  /// Pretty-print the snapshot.
  #[arg(long)]
  pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries the snapshot.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let replay_cfg = ReplayConfig::load(&cli.config)
    .with_context(|| format!("failed to load {}", cli.config.display()))?;
  tracing::debug!(?replay_cfg, "configuration loaded");

  let views = Views::new(replay_cfg);

  let summary = match &cli.input {
    Some(path) => {
      let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
      replay(&views, BufReader::new(file))
    }
    None => replay(&views, io::stdin().lock()),
  }
  .context("replay failed")?;

  if summary.rejected > 0 {
    tracing::warn!(rejected = summary.rejected, "some events were rejected");
  }

  let snapshot = views.snapshot();
  let json = if cli.pretty {
    serde_json::to_string_pretty(&snapshot)
  } else {
    serde_json::to_string(&snapshot)
  }
  .context("failed to serialise snapshot")?;

  let mut stdout = io::stdout().lock();
  writeln!(stdout, "{json}").context("failed to write snapshot")?;
  Ok(())
}
