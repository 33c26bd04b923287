//! Logging through `tracing`.
//!
//! The terminal browser owns the screen, so while it runs, events go to a log
//! file instead. `RUST_LOG` overrides the configured level.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context as _;
use anyhow::Result;
use clap_verbosity_flag::InfoLevel;
use clap_verbosity_flag::Verbosity;
use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Where log events are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
  Stderr,
  File(PathBuf),
}

const LEVELS: [Level; 5] = [
  Level::ERROR,
  Level::WARN,
  Level::INFO,
  Level::DEBUG,
  Level::TRACE,
];

fn rank(level: Option<Level>) -> isize {
  level
    .and_then(|l| LEVELS.iter().position(|&x| x == l))
    .map_or(-1, |i| i as isize)
}

/// Picks a level from the configured one, shifted by however far the
/// command-line flags move away from `info`.
///
/// An unrecognized configured level counts as `info`. Lowering past `error`
/// turns logging off.
pub fn level(
  configured: &str,
  verbosity: &Verbosity<InfoLevel>,
) -> Option<Level> {
  let base = match configured.parse::<Level>() {
    Ok(level) => rank(Some(level)),
    Err(_) => rank(Some(Level::INFO)),
  };
  let shift = rank(verbosity.tracing_level()) - rank(Some(Level::INFO));
  let index = base + shift;
  if index < 0 {
    return None;
  }
  Some(LEVELS[(index as usize).min(LEVELS.len() - 1)])
}

fn filter(level: Option<Level>) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
    Some(level) => {
      let level = level.as_str().to_lowercase();
      EnvFilter::new(format!("warn,quran={0},qdex={0}", level))
    }
    None => EnvFilter::new("off"),
  })
}

/// Installs the global subscriber.
pub fn init(level: Option<Level>, destination: &Destination) -> Result<()> {
  let layer = fmt::layer().with_target(true);
  let registry = tracing_subscriber::registry().with(filter(level));

  match destination {
    Destination::Stderr => registry
      .with(layer.with_writer(io::stderr).without_time())
      .try_init()?,
    Destination::File(path) => {
      let file = open(path)?;
      registry
        .with(layer.with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?
    }
  }
  Ok(())
}

fn open(path: &Path) -> Result<File> {
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir)
      .with_context(|| format!("creating {}", dir.display()))?;
  }
  OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))
}
