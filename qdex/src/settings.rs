//! Layered configuration.
//!
//! Settings are read, lowest precedence first, from built-in defaults, the
//! default configuration files, any `--config` files, `QDEX__*` environment
//! variables, and finally command-line flags.

use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use quran::api::DEFAULT_BASE_URL;

use crate::chapters::OVERLAY_BREAKPOINT;
use crate::cli::Cli;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Where the Quran API lives.
  pub base_url: String,
  /// The widest viewport, in pixels, that still gets the verse overlay.
  pub overlay_breakpoint: u32,
  /// Where the terminal browser logs to; see [`default_log_file()`].
  pub log_file: Option<PathBuf>,
  /// `error`, `warn`, `info`, `debug`, or `trace`.
  pub log_level: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      overlay_breakpoint: OVERLAY_BREAKPOINT,
      log_file: None,
      log_level: "info".to_string(),
    }
  }
}

impl Settings {
  /// Loads settings for `cli`.
  pub fn load(cli: &Cli) -> Result<Self> {
    let defaults = if cli.no_config {
      Vec::new()
    } else {
      default_config_files()
    };
    let env = Environment::with_prefix("qdex")
      .separator("__")
      .try_parsing(true);

    let mut settings = layered(&defaults, &cli.config, env)?;
    settings.apply_cli_overrides(cli);
    Ok(settings)
  }

  fn apply_cli_overrides(&mut self, cli: &Cli) {
    if let Some(url) = &cli.base_url {
      self.base_url = url.clone();
    }
    if let Some(path) = &cli.log_file {
      self.log_file = Some(path.clone());
    }
  }
}

/// Merges optional `defaults`, required `extra` files and `env`, in that
/// order.
fn layered(
  defaults: &[PathBuf],
  extra: &[PathBuf],
  env: Environment,
) -> Result<Settings> {
  let mut builder = Config::builder();
  for path in defaults {
    builder = builder.add_source(File::from(path.clone()).required(false));
  }
  for path in extra {
    builder = builder.add_source(File::from(path.clone()).required(true));
  }
  builder = builder.add_source(env);

  builder
    .build()?
    .try_deserialize()
    .map_err(|e| anyhow!("failed to deserialize configuration: {}", e))
}

/// The configuration files consulted unless `--no-config` is passed.
pub fn default_config_files() -> Vec<PathBuf> {
  let mut files = Vec::new();
  if let Some(dir) = dirs::config_dir() {
    files.push(dir.join("qdex").join("config.toml"));
  }
  if let Ok(dir) = env::current_dir() {
    files.push(dir.join("qdex.toml"));
  }
  files
}

/// Where the terminal browser logs when no log file is configured.
pub fn default_log_file() -> Option<PathBuf> {
  dirs::data_local_dir().map(|dir| dir.join("qdex").join("qdex.log"))
}
