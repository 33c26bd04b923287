//! Command-line arguments.

use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::InfoLevel;
use clap_verbosity_flag::Verbosity;

/// Browse the Quran from a terminal.
#[derive(Parser, Debug)]
#[command(name = "qdex", version)]
pub struct Cli {
  #[arg(
    short,
    long = "config",
    value_name = "FILE",
    env = "QDEX_CONFIG",
    action = ArgAction::Append,
    global = true,
    help = "Additional configuration file to merge"
  )]
  pub config: Vec<PathBuf>,
  #[arg(
    long = "no-config",
    global = true,
    help = "Skip loading the default configuration files"
  )]
  pub no_config: bool,
  #[arg(
    long,
    value_name = "URL",
    global = true,
    help = "Base URL of the Quran API"
  )]
  pub base_url: Option<String>,
  #[arg(
    long,
    value_name = "FILE",
    global = true,
    help = "Where the terminal browser writes its log"
  )]
  pub log_file: Option<PathBuf>,
  /// Log more with -v, less with -q; shifts the configured level.
  #[command(flatten)]
  pub verbosity: Verbosity<InfoLevel>,

  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
  /// Print the chapter index, optionally filtered by name.
  List {
    /// Only chapters whose name contains this, ignoring case.
    query: Option<String>,
  },
  /// Print every verse of one chapter.
  Read {
    /// The chapter number, starting at 1.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    number: u32,
  },
}
