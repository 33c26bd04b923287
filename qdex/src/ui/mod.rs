//! The qdex UI.
//!
//! The screen is a single page: a header holding the search input, a list of
//! chapters on one side, the verses of the resident chapter on the other, and
//! a footer. On narrow terminals the panes are stacked, and a freshly loaded
//! chapter pops up over everything in an overlay until dismissed.
//!
//! All state that outlives a frame and is not purely visual (the index, the
//! query, the resident chapter) lives in the [`ChapterBrowser`]; the [`Ui`]
//! only remembers selections and scroll offsets.

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use tui::backend::Backend;
use tui::buffer::Buffer;
use tui::layout::Constraint;
use tui::layout::Direction;
use tui::layout::Layout;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;
use tui::text::Span;
use tui::widgets::Clear;
use tui::widgets::Widget;
use tui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::chapters::ChapterBrowser;
use crate::chapters::Viewport;
use crate::fetch::Source;
use crate::util;

pub mod listing;
pub mod reader;
pub mod widgets;

use listing::ChapterList;
use reader::VerseReader;
use widgets::Chrome;
use widgets::Spinner;

pub const TITLE: &str = "Al-Quran Digital";
pub const SEARCH_PLACEHOLDER: &str = "Cari surat...";
pub const LIST_TITLE: &str = "Daftar Surat";
pub const OVERLAY_TITLE: &str = "Ayat Al-Quran";
pub const ATTRIBUTION: &str = "Sumber API dari Gading Dev";

const SEARCH_WIDTH: u16 = 32;
const MIN_WIDTH: u16 = 2;
const MIN_HEIGHT: u16 = 3;
const WHEEL_ROWS: isize = 3;

#[derive(Copy, Clone, Debug)]
pub struct StyleSheet {
  pub focused: Style,
  pub unfocused: Style,
  pub selected: Style,
  pub header: Style,
  pub input: Style,
  pub placeholder: Style,
}

impl Default for StyleSheet {
  fn default() -> Self {
    StyleSheet {
      focused: Style::default().fg(Color::White),
      unfocused: Style::default().fg(Color::Gray),
      selected: Style::default().add_modifier(Modifier::BOLD),
      header: Style::default().fg(Color::White).bg(Color::Green),
      input: Style::default().fg(Color::Black).bg(Color::White),
      placeholder: Style::default().fg(Color::DarkGray).bg(Color::White),
    }
  }
}

/// What the event loop should do after an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
  Continue,
  Quit,
}

/// The root UI type.
#[derive(Debug, Default)]
pub struct Ui {
  list: ChapterList,
  reader: VerseReader,
  overlay_reader: VerseReader,
  overlay_rect: Option<Rect>,
  frame_number: usize,
  style_sheet: StyleSheet,
}

impl Ui {
  pub fn new() -> Self {
    Self::default()
  }

  /// Processes a terminal event, forwarding whatever it asks for to
  /// `browser`.
  pub fn process_event<S: Source>(
    &mut self,
    e: Event,
    browser: &mut ChapterBrowser<S>,
  ) -> Outcome {
    match e {
      Event::Key(k) => return self.process_key(k, browser),
      Event::Mouse(m) => self.process_mouse(m, browser),
      Event::Resize(columns, _) => {
        browser.set_viewport(Viewport::from_columns(columns))
      }
    }
    Outcome::Continue
  }

  fn process_key<S: Source>(
    &mut self,
    k: KeyEvent,
    browser: &mut ChapterBrowser<S>,
  ) -> Outcome {
    let m = k.modifiers;
    if k.code == KeyCode::Char('c') && m.contains(KeyModifiers::CONTROL) {
      return Outcome::Quit;
    }

    if browser.state().overlay_visible {
      let page = self.overlay_reader.page();
      match k.code {
        KeyCode::Esc => browser.close_overlay(),
        KeyCode::Up => self.overlay_reader.scroll_by(-1),
        KeyCode::Down => self.overlay_reader.scroll_by(1),
        KeyCode::PageUp => self.overlay_reader.scroll_by(-page),
        KeyCode::PageDown => self.overlay_reader.scroll_by(page),
        _ => {}
      }
      return Outcome::Continue;
    }

    let len = browser.filtered().len();
    let page = self.list.page();
    match k.code {
      KeyCode::Esc => return Outcome::Quit,
      KeyCode::Enter => {
        let number = self.list.selected(&browser.filtered()).map(|c| c.number);
        if let Some(number) = number {
          browser.select_chapter(number);
        }
      }

      KeyCode::Up if m.contains(KeyModifiers::SHIFT) => {
        self.reader.scroll_by(-1)
      }
      KeyCode::Down if m.contains(KeyModifiers::SHIFT) => {
        self.reader.scroll_by(1)
      }
      KeyCode::Up => self.list.shift(-1, len),
      KeyCode::Down => self.list.shift(1, len),
      KeyCode::PageUp => self.list.shift(-page, len),
      KeyCode::PageDown => self.list.shift(page, len),
      KeyCode::Home => self.list.shift(-(len as isize), len),
      KeyCode::End => self.list.shift(len as isize, len),

      KeyCode::Backspace => {
        let mut query = browser.state().query.clone();
        if query.pop().is_some() {
          self.set_query(query, browser);
        }
      }
      KeyCode::Char('u') if m.contains(KeyModifiers::CONTROL) => {
        self.set_query(String::new(), browser)
      }
      KeyCode::Char(c)
        if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
      {
        let mut query = browser.state().query.clone();
        query.push(c);
        self.set_query(query, browser);
      }
      _ => {}
    }
    Outcome::Continue
  }

  fn process_mouse<S: Source>(
    &mut self,
    m: MouseEvent,
    browser: &mut ChapterBrowser<S>,
  ) {
    let MouseEvent {
      kind, column, row, ..
    } = m;

    if browser.state().overlay_visible {
      match kind {
        MouseEventKind::ScrollUp => self.overlay_reader.scroll_by(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => self.overlay_reader.scroll_by(WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
          let inside = self
            .overlay_rect
            .map(|r| util::rect_contains(r, column, row))
            .unwrap_or(false);
          if !inside {
            browser.close_overlay();
          }
        }
        _ => {}
      }
      return;
    }

    let len = browser.filtered().len();
    match kind {
      MouseEventKind::ScrollUp if self.reader.contains(column, row) => {
        self.reader.scroll_by(-WHEEL_ROWS)
      }
      MouseEventKind::ScrollDown if self.reader.contains(column, row) => {
        self.reader.scroll_by(WHEEL_ROWS)
      }
      MouseEventKind::ScrollUp if self.list.contains(column, row) => {
        self.list.shift(-1, len)
      }
      MouseEventKind::ScrollDown if self.list.contains(column, row) => {
        self.list.shift(1, len)
      }
      MouseEventKind::Down(MouseButton::Left) => {
        let number = self
          .list
          .click(column, row, &browser.filtered())
          .map(|c| c.number);
        if let Some(number) = number {
          browser.select_chapter(number);
        }
      }
      _ => {}
    }
  }

  fn set_query<S: Source>(
    &mut self,
    query: String,
    browser: &mut ChapterBrowser<S>,
  ) {
    browser.set_search_query(query);
    self.list.reset();
  }

  /// Renders the UI onto a `Frame`.
  pub fn render<S: Source, B: Backend>(
    &mut self,
    browser: &ChapterBrowser<S>,
    f: &mut Frame<B>,
  ) {
    let size = f.size();
    f.render_widget(UiAsWidget { ui: self, browser }, size);
    self.frame_number += 1;
  }

  fn draw<S: Source>(
    &mut self,
    browser: &ChapterBrowser<S>,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    self.overlay_rect = None;
    // The header, the panes and the footer each need a row.
    if rect.width < MIN_WIDTH || rect.height < MIN_HEIGHT {
      return;
    }

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints(vec![
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(rect);

    self.draw_header(browser, rows[0], buf);
    self.draw_panes(browser, rows[1], buf);
    self.draw_footer(browser, rows[2], buf);

    if browser.state().overlay_visible {
      self.draw_overlay(browser, rows[1], buf);
    }
  }

  fn draw_header<S: Source>(
    &mut self,
    browser: &ChapterBrowser<S>,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    let style = self.style_sheet.header;
    buf.set_style(rect, style);
    let title = Span::styled(TITLE, style.add_modifier(Modifier::BOLD));
    let (x, _) = buf.set_span(rect.x + 1, rect.y, &title, rect.width - 1);

    let input_x = x + 2;
    let right = rect.x + rect.width;
    if input_x + 2 >= right {
      return;
    }
    let width = SEARCH_WIDTH.min(right - input_x - 1);
    let input = Rect::new(input_x, rect.y, width, 1);

    let query = &browser.state().query;
    buf.set_style(input, self.style_sheet.input);
    if query.is_empty() {
      buf.set_stringn(
        input.x + 1,
        input.y,
        SEARCH_PLACEHOLDER,
        width.saturating_sub(1) as usize,
        self.style_sheet.placeholder,
      );
    } else {
      // Keep the tail of a long query in view.
      let room = width.saturating_sub(2) as usize;
      let mut shown = query.as_str();
      while shown.width() > room {
        let mut chars = shown.chars();
        chars.next();
        shown = chars.as_str();
      }
      buf.set_stringn(
        input.x + 1,
        input.y,
        shown,
        room,
        self.style_sheet.input,
      );
    }
  }

  fn draw_panes<S: Source>(
    &mut self,
    browser: &ChapterBrowser<S>,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    let (list_rect, reader_rect) = if browser.is_narrow() {
      let rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Percentage(40), Constraint::Min(0)])
        .split(rect);
      (rects[0], rects[1])
    } else {
      let rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
          Constraint::Percentage(25),
          Constraint::Length(1),
          Constraint::Min(0),
        ])
        .split(rect);
      (rects[0], rects[2])
    };

    let state = browser.state();
    let items = browser.filtered();
    let is_focused = !state.overlay_visible;

    let count = format!("{}/{}", items.len(), state.chapters.len());
    let chrome = Chrome::new()
      .title(LIST_TITLE)
      .footer(count)
      .focus(is_focused)
      .style(self.style_sheet.unfocused)
      .focused_style(self.style_sheet.focused);
    let inner = chrome.inner(list_rect);
    chrome.render(list_rect, buf);
    self.list.render(
      &items,
      state.loading,
      self.frame_number,
      &self.style_sheet,
      inner,
      buf,
    );

    let mut chrome = Chrome::new()
      .style(self.style_sheet.unfocused)
      .focused_style(self.style_sheet.focused);
    if let Some(detail) = &state.detail {
      chrome = chrome
        .title(detail.heading())
        .footer(format!("{} ayat", detail.verses.len()));
    }
    let inner = chrome.inner(reader_rect);
    chrome.render(reader_rect, buf);
    self
      .reader
      .render(state.detail.as_ref(), &self.style_sheet, inner, buf);
  }

  fn draw_footer<S: Source>(
    &mut self,
    browser: &ChapterBrowser<S>,
    rect: Rect,
    buf: &mut Buffer,
  ) {
    buf.set_stringn(
      rect.x + 1,
      rect.y,
      ATTRIBUTION,
      rect.width.saturating_sub(1) as usize,
      self.style_sheet.unfocused,
    );

    if browser.state().loading {
      let spinner = Spinner::new(self.frame_number)
        .label("Memuat")
        .style(self.style_sheet.focused);
      let width = spinner.text().width() as u16;
      if width + 1 < rect.width {
        let at = Rect::new(rect.x + rect.width - width - 1, rect.y, width, 1);
        spinner.render(at, buf);
      }
    }
  }

  fn draw_overlay<S: Source>(
    &mut self,
    browser: &ChapterBrowser<S>,
    area: Rect,
    buf: &mut Buffer,
  ) {
    let rect = util::centered(
      area,
      area.width.saturating_sub(4),
      area.height.saturating_sub(2),
    );
    self.overlay_rect = Some(rect);
    Clear.render(rect, buf);

    let chrome = Chrome::new()
      .title(OVERLAY_TITLE)
      .footer("Esc ×")
      .focus(true)
      .style(self.style_sheet.unfocused)
      .focused_style(self.style_sheet.focused);
    let inner = chrome.inner(rect);
    chrome.render(rect, buf);
    if inner.width == 0 || inner.height == 0 {
      return;
    }

    let detail = browser.state().detail.as_ref();
    if let Some(detail) = detail {
      buf.set_stringn(
        inner.x,
        inner.y,
        detail.heading(),
        inner.width as usize,
        self.style_sheet.focused.add_modifier(Modifier::BOLD),
      );
    }
    let verses = Rect::new(
      inner.x,
      inner.y + 2,
      inner.width,
      inner.height.saturating_sub(2),
    );
    self
      .overlay_reader
      .render(detail, &self.style_sheet, verses, buf);
  }
}

struct UiAsWidget<'a, S> {
  ui: &'a mut Ui,
  browser: &'a ChapterBrowser<S>,
}

impl<S: Source> Widget for UiAsWidget<'_, S> {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    self.ui.draw(self.browser, rect, buf)
  }
}
