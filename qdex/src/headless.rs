//! Subcommands that print to stdout instead of running the browser.

use std::io::Write;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;

use crate::chapters::ChapterBrowser;
use crate::fetch::Source;

/// Prints the chapter index, filtered by `query`.
pub fn list<S: Source>(
  browser: &mut ChapterBrowser<S>,
  query: Option<&str>,
  out: &mut dyn Write,
) -> Result<()> {
  browser.load_index();
  browser.wait();
  if let Some(diagnostic) = &browser.state().diagnostic {
    bail!("{}", diagnostic);
  }

  if let Some(query) = query {
    browser.set_search_query(query);
  }
  for chapter in browser.filtered() {
    writeln!(out, "{} ({})", chapter.label(), chapter.translated_name)?;
  }
  Ok(())
}

/// Prints every verse of chapter `number`.
pub fn read<S: Source>(
  browser: &mut ChapterBrowser<S>,
  number: u32,
  out: &mut dyn Write,
) -> Result<()> {
  browser.select_chapter(number);
  browser.wait();
  let state = browser.state();
  if let Some(diagnostic) = &state.diagnostic {
    bail!("{}", diagnostic);
  }
  let detail = state
    .detail
    .as_ref()
    .ok_or_else(|| anyhow!("chapter {} did not load", number))?;

  writeln!(out, "{}", detail.heading())?;
  for verse in &detail.verses {
    writeln!(out)?;
    writeln!(out, "{}. {}", verse.index_in_chapter, verse.arabic_text)?;
    writeln!(out, "{}", verse.translated_text)?;
  }
  Ok(())
}
