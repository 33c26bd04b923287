//! `tui` widgets shared by the panes.

use std::iter;
use std::ops::Range;

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Modifier;
use tui::style::Style;
use tui::symbols;
use tui::text::Span;
use tui::text::Spans;
use tui::widgets::Widget;

/// Braille frames of the busy indicator, in order.
const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// How many UI frames each spinner frame is held for.
const FRAMES_PER_STEP: usize = 3;

/// A busy indicator drawn as a rotating glyph, optionally followed by a
/// label.
#[derive(Clone, Debug)]
pub struct Spinner<'a> {
  frame_number: usize,
  label: &'a str,
  style: Style,
}

impl<'a> Spinner<'a> {
  pub fn new(frame_number: usize) -> Self {
    Self {
      frame_number,
      label: "",
      style: Style::default(),
    }
  }

  pub fn label(mut self, label: &'a str) -> Self {
    self.label = label;
    self
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  /// Returns the glyph for the current frame.
  pub fn glyph(&self) -> &'static str {
    let step = self.frame_number / FRAMES_PER_STEP;
    SPINNER_FRAMES[step % SPINNER_FRAMES.len()]
  }

  /// Returns everything the spinner draws, e.g. `"⣾ Memuat"`.
  pub fn text(&self) -> String {
    if self.label.is_empty() {
      self.glyph().to_string()
    } else {
      format!("{} {}", self.glyph(), self.label)
    }
  }
}

impl Widget for Spinner<'_> {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height == 0 {
      return;
    }
    buf.set_stringn(
      rect.x,
      rect.y,
      self.text(),
      rect.width as usize,
      self.style,
    );
  }
}

/// A frame drawn as a title bar above a rectangle and a footer bar below it.
#[derive(Clone, Debug)]
pub struct Chrome<'a> {
  title: Option<Spans<'a>>,
  footer: Option<Spans<'a>>,
  is_focused: bool,
  style: Style,
  focused_style: Style,
  pipe: &'a str,
}

impl<'a> Chrome<'a> {
  pub fn new() -> Self {
    Self {
      title: None,
      footer: None,
      is_focused: false,
      style: Style::default(),
      focused_style: Style::default(),
      pipe: symbols::block::ONE_QUARTER,
    }
  }

  pub fn title(mut self, title: impl Into<Spans<'a>>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn footer(mut self, footer: impl Into<Spans<'a>>) -> Self {
    self.footer = Some(footer.into());
    self
  }

  pub fn focus(mut self, focused: bool) -> Self {
    self.is_focused = focused;
    self
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn focused_style(mut self, style: Style) -> Self {
    self.focused_style = style;
    self
  }

  /// Returns the area left for content once the bars are drawn.
  pub fn inner(&self, rect: Rect) -> Rect {
    Rect::new(
      rect.x + 1,
      rect.y + 1,
      rect.width.saturating_sub(2),
      rect.height.saturating_sub(2),
    )
  }
}

impl Widget for Chrome<'_> {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height < 2 {
      return;
    }

    let Chrome {
      title,
      footer,
      is_focused,
      style,
      focused_style,
      pipe,
    } = self;

    let label_style = if is_focused {
      style.patch(focused_style)
    } else {
      style
    }
    .add_modifier(Modifier::REVERSED);

    let title = bar(title, pipe, style, label_style, rect.width);
    let footer = bar(footer, pipe, style, label_style, rect.width);
    buf.set_spans(rect.x, rect.y, &title, rect.width);
    buf.set_spans(rect.x, rect.y + rect.height - 1, &footer, rect.width);
  }
}

/// Builds one bar of a [`Chrome`], with `label` near its left end.
fn bar<'a>(
  label: Option<Spans<'a>>,
  pipe: &'a str,
  style: Style,
  label_style: Style,
  width: u16,
) -> Spans<'a> {
  let mut bar = Spans::default();
  bar.0.push(Span::styled(pipe, style));
  bar.0.push(Span::styled(pipe, style));

  if let Some(Spans(spans)) = label {
    bar.0.push(Span::styled(" ", label_style));
    for mut span in spans {
      span.style = label_style.patch(span.style);
      bar.0.push(span);
    }
    bar.0.push(Span::styled(" ", label_style));
  }

  let rest_len = (width as usize).saturating_sub(bar.width());
  bar.0.push(Span::styled(
    iter::repeat(pipe).take(rest_len).collect::<String>(),
    style,
  ));
  bar
}

/// A vertical scroll bar in the rightmost column of its area.
///
/// The thumb's length is proportional to how much of the content is
/// visible, and its position to how far down the view is scrolled.
#[derive(Clone, Debug)]
pub struct ScrollBar {
  offset: usize,
  visible: usize,
  total: usize,
  style: Style,
  thumb_style: Style,
}

impl ScrollBar {
  /// Creates a bar for `visible` rows of `total`, starting at row `offset`.
  pub fn new(offset: usize, visible: usize, total: usize) -> Self {
    Self {
      offset,
      visible,
      total,
      style: Style::default(),
      thumb_style: Style::default(),
    }
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn thumb_style(mut self, style: Style) -> Self {
    self.thumb_style = style;
    self
  }

  /// Returns the rows, relative to the top of a bar `height` rows tall, that
  /// the thumb covers.
  fn thumb(&self, height: usize) -> Range<usize> {
    if self.total <= self.visible {
      return 0..height;
    }

    let len = (height * self.visible / self.total).clamp(1, height);
    let max_offset = self.total - self.visible;
    let start = (height - len) * self.offset.min(max_offset) / max_offset;
    start..start + len
  }
}

impl Widget for ScrollBar {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    let thumb = self.thumb(rect.height as usize);
    let x = rect.x + rect.width - 1;
    for i in 0..rect.height {
      let cell = buf.get_mut(x, rect.y + i);
      if thumb.contains(&(i as usize)) {
        cell.set_symbol("┃");
        cell.set_style(self.style.patch(self.thumb_style));
      } else {
        cell.set_symbol("│");
        cell.set_style(self.style);
      }
    }
  }
}
