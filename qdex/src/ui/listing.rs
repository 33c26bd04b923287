//! The chapter index pane.

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::text::Span;
use tui::widgets::Widget;

use quran::model::ChapterSummary;

use crate::ui::widgets::ScrollBar;
use crate::ui::widgets::Spinner;
use crate::ui::StyleSheet;
use crate::util;

/// A scrolling, selectable list of chapters.
///
/// The list does not own the chapters; it is handed the currently filtered
/// index on every call, and only remembers positions within it.
#[derive(Clone, Debug, Default)]
pub struct ChapterList {
  index: usize,
  offset: usize,
  // Which item was drawn at each row, relative to the top.
  rendered_items_by_y: Vec<usize>,
  last_rect: Rect,
}

impl ChapterList {
  /// Moves the selection back to the top.
  pub fn reset(&mut self) {
    self.index = 0;
    self.offset = 0;
  }

  /// Returns the chapter under the selection.
  pub fn selected<'a>(
    &self,
    items: &[&'a ChapterSummary],
  ) -> Option<&'a ChapterSummary> {
    items.get(self.index).copied()
  }

  /// Moves the selection by `delta` rows.
  pub fn shift(&mut self, delta: isize, len: usize) {
    self.index = util::shifted(self.index, delta, len);
  }

  /// Returns the number of rows visible at once.
  pub fn page(&self) -> isize {
    self.last_rect.height.max(1) as isize
  }

  pub fn contains(&self, x: u16, y: u16) -> bool {
    util::rect_contains(self.last_rect, x, y)
  }

  /// Selects whichever chapter was drawn at `x` and `y`, and returns it.
  pub fn click<'a>(
    &mut self,
    x: u16,
    y: u16,
    items: &[&'a ChapterSummary],
  ) -> Option<&'a ChapterSummary> {
    if !self.contains(x, y) {
      return None;
    }

    let relative_y = (y - self.last_rect.y) as usize;
    let index = *self.rendered_items_by_y.get(relative_y)?;
    let item = items.get(index).copied()?;
    self.index = index;
    Some(item)
  }

  pub fn render(
    &mut self,
    items: &[&ChapterSummary],
    loading: bool,
    frame_number: usize,
    style_sheet: &StyleSheet,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    self.last_rect = rect;
    self.rendered_items_by_y.clear();
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    if items.is_empty() {
      if loading {
        Spinner::new(frame_number)
          .style(style_sheet.unfocused)
          .label("Memuat...")
          .render(rect, buf);
      }
      return;
    }

    let height = rect.height as usize;
    self.index = self.index.min(items.len() - 1);
    if self.index < self.offset {
      self.offset = self.index;
    }
    if self.index >= self.offset + height {
      self.offset = self.index + 1 - height;
    }
    self.offset = self.offset.min(items.len().saturating_sub(height));

    let has_scroll_bar = items.len() > height;
    let width = if has_scroll_bar {
      rect.width.saturating_sub(1)
    } else {
      rect.width
    };

    for (y, i) in (self.offset..items.len()).take(height).enumerate() {
      self.rendered_items_by_y.push(i);

      let is_selected = i == self.index;
      let (symbol, style) = if is_selected {
        ("➤ ", style_sheet.focused.patch(style_sheet.selected))
      } else {
        ("  ", style_sheet.unfocused)
      };

      let label = format!("{}{}", symbol, items[i].label());
      buf.set_span(
        rect.x,
        rect.y + y as u16,
        &Span::styled(label, style),
        width,
      );
    }

    if has_scroll_bar {
      ScrollBar::new(self.offset, height, items.len())
        .style(style_sheet.unfocused)
        .thumb_style(style_sheet.focused)
        .render(rect, buf);
    }
  }
}
