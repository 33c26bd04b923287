//! `qdex`, a terminal browser for the Quran.

use std::io;
use std::io::Stdout;
use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser as _;

use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;

use tui::backend::CrosstermBackend;
use tui::Terminal;

use quran::Api;

use crate::chapters::ChapterBrowser;
use crate::chapters::Viewport;
use crate::cli::Cli;
use crate::cli::Command;
use crate::logging::Destination;
use crate::settings::Settings;
use crate::ui::Outcome;
use crate::ui::Ui;

mod chapters;
mod cli;
mod fetch;
mod headless;
mod logging;
mod settings;
mod ui;
mod util;

#[cfg(test)]
mod testing;

/// How long to wait for input before checking on downloads again.
const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
  let cli = Cli::parse();
  let settings = Settings::load(&cli)?;

  let level = logging::level(&settings.log_level, &cli.verbosity);
  let destination = match &cli.command {
    Some(_) => Some(Destination::Stderr),
    None => settings
      .log_file
      .clone()
      .or_else(crate::settings::default_log_file)
      .map(Destination::File),
  };
  if let Some(destination) = &destination {
    logging::init(level, destination)?;
  }
  tracing::debug!(?settings, "loaded settings");

  let api = Arc::new(Api::with_base_url(settings.base_url.as_str()));
  let mut browser =
    ChapterBrowser::new(api).with_breakpoint(settings.overlay_breakpoint);

  let stdout = io::stdout();
  match cli.command {
    Some(Command::List { query }) => {
      headless::list(&mut browser, query.as_deref(), &mut stdout.lock())
    }
    Some(Command::Read { number }) => {
      headless::read(&mut browser, number, &mut stdout.lock())
    }
    None => run_browser(&mut browser),
  }
}

/// Puts the terminal back the way it was when dropped.
struct RawScreen;

impl RawScreen {
  fn enter(stdout: &mut Stdout) -> Result<Self> {
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(RawScreen)
  }
}

impl Drop for RawScreen {
  fn drop(&mut self) {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
  }
}

fn run_browser(browser: &mut ChapterBrowser<Api>) -> Result<()> {
  let mut stdout = io::stdout();
  let _screen = RawScreen::enter(&mut stdout)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

  let (columns, _) = terminal::size()?;
  browser.set_viewport(Viewport::from_columns(columns));
  browser.load_index();

  let mut ui = Ui::new();
  loop {
    browser.poll();
    terminal.draw(|f| ui.render(browser, f))?;

    if !event::poll(TICK)? {
      continue;
    }
    if ui.process_event(event::read()?, browser) == Outcome::Quit {
      tracing::debug!("quitting");
      return Ok(());
    }
  }
}
