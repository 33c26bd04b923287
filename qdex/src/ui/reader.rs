//! The verse pane.

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Modifier;
use tui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use quran::model::ChapterDetail;

use crate::ui::widgets::ScrollBar;
use crate::ui::StyleSheet;
use crate::util;

/// Shown in place of verses before any chapter is chosen.
pub const PLACEHOLDER: &str = "Pilih Surat untuk melihat isinya";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Align {
  Left,
  Right,
}

/// A scrolling view of every verse in a chapter.
#[derive(Clone, Debug, Default)]
pub struct VerseReader {
  scroll: usize,
  // The chapter that `scroll` refers to.
  shown: Option<u32>,
  last_rect: Rect,
}

impl VerseReader {
  /// Scrolls by `delta` rows; clamped when next drawn.
  pub fn scroll_by(&mut self, delta: isize) {
    self.scroll = (self.scroll as isize).saturating_add(delta).max(0) as usize;
  }

  /// Returns the number of rows visible at once.
  pub fn page(&self) -> isize {
    self.last_rect.height.max(1) as isize
  }

  pub fn contains(&self, x: u16, y: u16) -> bool {
    util::rect_contains(self.last_rect, x, y)
  }

  pub fn render(
    &mut self,
    detail: Option<&ChapterDetail>,
    style_sheet: &StyleSheet,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    self.last_rect = rect;
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    let detail = match detail {
      Some(d) => d,
      None => {
        self.shown = None;
        self.scroll = 0;
        let width = PLACEHOLDER.width() as u16;
        let x = rect.x + rect.width.saturating_sub(width) / 2;
        let y = rect.y + rect.height / 2;
        buf.set_stringn(
          x,
          y,
          PLACEHOLDER,
          (rect.x + rect.width - x) as usize,
          style_sheet.unfocused,
        );
        return;
      }
    };

    if self.shown != Some(detail.number) {
      self.shown = Some(detail.number);
      self.scroll = 0;
    }

    // Leave the rightmost column for the scroll bar.
    let text_width = rect.width.saturating_sub(2) as usize;
    let lines = layout(detail, text_width.max(1));

    let height = rect.height as usize;
    self.scroll = self.scroll.min(lines.len().saturating_sub(height));

    for (y, (align, is_arabic, line)) in
      lines.iter().skip(self.scroll).take(height).enumerate()
    {
      let x = match align {
        Align::Left => rect.x,
        Align::Right => {
          rect.x + text_width.saturating_sub(line.width()) as u16
        }
      };
      let style = if *is_arabic {
        style_sheet.focused.add_modifier(Modifier::BOLD)
      } else {
        style_sheet.focused
      };
      buf.set_stringn(x, rect.y + y as u16, line, text_width, style);
    }

    if lines.len() > height {
      ScrollBar::new(self.scroll, height, lines.len())
        .style(style_sheet.unfocused)
        .thumb_style(style_sheet.focused)
        .render(rect, buf);
    }
  }
}

/// Lays out a chapter's verses into rows: each verse's Arabic text aligned
/// right, then its translation aligned left, then a blank row.
fn layout(detail: &ChapterDetail, width: usize) -> Vec<(Align, bool, String)> {
  let mut lines = Vec::new();
  for (i, verse) in detail.verses.iter().enumerate() {
    if i > 0 {
      lines.push((Align::Left, false, String::new()));
    }

    let arabic = format!("{}. {}", verse.index_in_chapter, verse.arabic_text);
    for line in util::wrap(&arabic, width) {
      lines.push((Align::Right, true, line));
    }
    for line in util::wrap(&verse.translated_text, width) {
      lines.push((Align::Left, false, line));
    }
  }
  lines
}
