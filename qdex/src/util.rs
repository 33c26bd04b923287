//! Miscellaneous layout and text helpers.

use tui::layout::Rect;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Returns true if `rect` contains the point at `x` and `y`.
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
  rect.x <= x
    && x < rect.x.saturating_add(rect.width)
    && rect.y <= y
    && y < rect.y.saturating_add(rect.height)
}

/// Shifts `index` by `delta`, clamping to `0..len`.
///
/// Returns zero when `len` is zero.
pub fn shifted(index: usize, delta: isize, len: usize) -> usize {
  (index as isize)
    .saturating_add(delta)
    .clamp(0, len.saturating_sub(1) as isize) as usize
}

/// Returns a rectangle of at most `width` by `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect::new(
    area.x + (area.width - width) / 2,
    area.y + (area.height - height) / 2,
    width,
    height,
  )
}

/// Greedily wraps `text` into lines at most `width` columns wide.
///
/// Words longer than a line are broken mid-word. Empty text yields one empty
/// line, so that every paragraph occupies at least one row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut line = String::new();
  let mut line_width = 0;

  if width == 0 {
    return vec![String::new()];
  }

  for word in text.split_whitespace() {
    let word_width = word.width();
    if line_width > 0 && line_width + 1 + word_width <= width {
      line.push(' ');
      line.push_str(word);
      line_width += 1 + word_width;
      continue;
    }

    if line_width > 0 {
      lines.push(std::mem::take(&mut line));
      line_width = 0;
    }

    if word_width <= width {
      line.push_str(word);
      line_width = word_width;
      continue;
    }

    for c in word.chars() {
      let w = c.width().unwrap_or(0);
      if line_width + w > width && line_width > 0 {
        lines.push(std::mem::take(&mut line));
        line_width = 0;
      }
      line.push(c);
      line_width += w;
    }
  }

  if line_width > 0 || lines.is_empty() {
    lines.push(line);
  }
  lines
}
