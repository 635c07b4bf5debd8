//! Replay configuration, deserialised from `lucy.toml` and `LUCY_*`
//! environment variables.

use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};

use lucy_core::policy::CostPolicy;
use lucy_model::DEFAULT_CHANNEL_CAPACITY;
use serde::Deserialize;

/// What to do with an event the models reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
  /// Log the event and carry on.
  #[default]
  Skip,
  /// Stop at the first rejected event.
  Fail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
  pub policy:            CostPolicy,
  pub on_error:          ErrorPolicy,
  /// Notification buffer per subscriber.
  pub channel_capacity:  usize,
  /// When set, `current_flaw` / `current_resolver` highlights clear
  /// themselves after this many milliseconds.
  pub highlight_hold_ms: Option<u64>,
}

impl Default for ReplayConfig {
  fn default() -> Self {
    Self {
      policy:            CostPolicy::default(),
      on_error:          ErrorPolicy::default(),
      channel_capacity:  DEFAULT_CHANNEL_CAPACITY,
      highlight_hold_ms: None,
    }
  }
}

impl ReplayConfig {
  /// Read the optional TOML file at `path`, then apply `LUCY_*` overrides.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::load_from(path, environment())
  }

  fn load_from(path: &Path, env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn highlight_hold(&self) -> Option<Duration> {
    self.highlight_hold_ms.map(Duration::from_millis)
  }
}

/// `LUCY_ON_ERROR=fail`, `LUCY_POLICY__AGGREGATE=max`: one underscore after
/// the prefix, two between nested keys.
fn environment() -> Environment {
  Environment::with_prefix("LUCY")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}
