//! The chapter browser: everything the UI knows, and every way it can change.
//!
//! [`ChapterBrowser`] owns a [`State`] and updates it only through its
//! operations. The two network operations, [`ChapterBrowser::load_index()`]
//! and [`ChapterBrowser::select_chapter()`], return immediately; their
//! results are applied later, on the caller's thread, by
//! [`ChapterBrowser::poll()`] or [`ChapterBrowser::wait()`].
//!
//! Results are applied in the order they arrive. There is no cancellation:
//! if two chapters are selected in quick succession, whichever download
//! finishes last is the one left on screen.

use std::sync::Arc;

use quran::model::ChapterDetail;
use quran::model::ChapterSummary;

use crate::fetch::Completion;
use crate::fetch::Fetcher;
use crate::fetch::Request;
use crate::fetch::Source;

/// Viewports at most this wide, in logical pixels, show a chapter in an
/// overlay rather than next to the index.
pub const OVERLAY_BREAKPOINT: u32 = 768;

/// How many logical pixels one terminal column counts as.
pub const PIXELS_PER_COLUMN: u32 = 8;

/// The size of the area the browser is drawn into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
  /// Width in logical pixels.
  pub width: u32,
}

impl Viewport {
  pub fn new(width: u32) -> Self {
    Self { width }
  }

  /// Converts a terminal width into a viewport.
  pub fn from_columns(columns: u16) -> Self {
    Self::new(columns as u32 * PIXELS_PER_COLUMN)
  }
}

impl Default for Viewport {
  fn default() -> Self {
    Self::new(OVERLAY_BREAKPOINT + 1)
  }
}

/// Browser state.
#[derive(Clone, Debug, Default)]
pub struct State {
  /// The chapter index, ordered by number.
  pub chapters: Vec<ChapterSummary>,
  /// The chapter currently being read, if any.
  pub detail: Option<ChapterDetail>,
  /// The search text typed so far.
  pub query: String,
  /// Whether the chapter is being shown in an overlay.
  pub overlay_visible: bool,
  /// Whether a download is running.
  ///
  /// Both kinds of download share this flag, and any completion clears it.
  pub loading: bool,
  /// A description of the last failed download.
  ///
  /// This is for the operator; it is logged and never shown in the UI.
  pub diagnostic: Option<String>,
}

/// Keeps only the chapters whose name contains `query`, ignoring case.
///
/// Either name may match. Order is preserved, and an empty query keeps
/// everything.
pub fn filter_chapters<'a>(
  chapters: &'a [ChapterSummary],
  query: &str,
) -> Vec<&'a ChapterSummary> {
  let needle = query.to_lowercase();
  chapters
    .iter()
    .filter(|c| c.matches_lowercase(&needle))
    .collect()
}

/// The controller behind the UI.
pub struct ChapterBrowser<S> {
  state: State,
  fetcher: Fetcher<S>,
  viewport: Viewport,
  breakpoint: u32,
}

impl<S: Source> ChapterBrowser<S> {
  /// Creates a browser with nothing loaded.
  pub fn new(source: Arc<S>) -> Self {
    Self {
      state: State::default(),
      fetcher: Fetcher::new(source),
      viewport: Viewport::default(),
      breakpoint: OVERLAY_BREAKPOINT,
    }
  }

  /// Overrides [`OVERLAY_BREAKPOINT`].
  pub fn with_breakpoint(mut self, breakpoint: u32) -> Self {
    self.breakpoint = breakpoint;
    self
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  /// Returns whether the current viewport is narrow enough for the overlay.
  pub fn is_narrow(&self) -> bool {
    self.viewport.width <= self.breakpoint
  }

  /// Returns the chapters matching the current search.
  pub fn filtered(&self) -> Vec<&ChapterSummary> {
    filter_chapters(&self.state.chapters, &self.state.query)
  }

  /// Starts downloading the chapter index.
  pub fn load_index(&mut self) {
    tracing::debug!("loading chapter index");
    self.state.loading = true;
    self.fetcher.spawn(Request::Index);
  }

  /// Starts downloading chapter `number`.
  ///
  /// `number` is not checked against the index.
  pub fn select_chapter(&mut self, number: u32) {
    tracing::debug!(number, "loading chapter");
    self.state.loading = true;
    self.fetcher.spawn(Request::Chapter(number));
  }

  pub fn set_search_query(&mut self, text: impl Into<String>) {
    self.state.query = text.into();
  }

  pub fn close_overlay(&mut self) {
    self.state.overlay_visible = false;
  }

  /// Records the size of the area being drawn into.
  ///
  /// This is consulted when a chapter finishes downloading, not when it is
  /// selected.
  pub fn set_viewport(&mut self, viewport: Viewport) {
    self.viewport = viewport;
  }

  /// Applies every download that has finished so far, without blocking.
  ///
  /// Returns whether anything was applied.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Some(completion) = self.fetcher.try_next() {
      self.apply(completion);
      changed = true;
    }
    changed
  }

  /// Blocks until one download finishes, and applies it.
  ///
  /// Returns `false` if nothing was in flight.
  pub fn step(&mut self) -> bool {
    match self.fetcher.next_blocking() {
      Some(completion) => {
        self.apply(completion);
        true
      }
      None => false,
    }
  }

  /// Blocks until every download has finished, applying each.
  pub fn wait(&mut self) {
    while self.step() {}
  }

  fn apply(&mut self, completion: Completion) {
    self.state.loading = false;

    match completion {
      Completion::Index(Ok(chapters)) => {
        tracing::info!(count = chapters.len(), "loaded chapter index");
        self.state.chapters = chapters;
        self.state.diagnostic = None;
      }
      Completion::Index(Err(e)) => {
        tracing::error!(error = %e, "failed to load chapter index");
        self.state.diagnostic =
          Some(format!("failed to load chapter index: {}", e));
      }
      Completion::Chapter {
        result: Ok(detail),
        ..
      } => {
        tracing::info!(
          number = detail.number,
          verses = detail.verses.len(),
          "loaded chapter"
        );
        self.state.detail = Some(detail);
        self.state.diagnostic = None;
        if self.is_narrow() {
          self.state.overlay_visible = true;
        }
      }
      Completion::Chapter {
        number,
        result: Err(e),
      } => {
        tracing::error!(number, error = %e, "failed to load chapter");
        self.state.diagnostic =
          Some(format!("failed to load chapter {}: {}", number, e));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::sync::Mutex;

  use crossbeam::channel;
  use proptest::prelude::*;

  use crate::testing::*;

  #[test]
  fn load_index() {
    let mut b = browser(online());
    b.load_index();
    assert!(b.state().loading);

    b.wait();
    assert!(!b.state().loading);
    assert_eq!(b.state().chapters, index());
    assert!(b.state().diagnostic.is_none());
  }

  #[test]
  fn failed_first_load_leaves_index_empty() {
    let mut b = browser(Fake {
      index: Box::new(|| Err(offline())),
      chapter: Box::new(|_| Err(offline())),
    });
    b.load_index();
    b.wait();

    assert!(!b.state().loading);
    assert!(b.state().chapters.is_empty());
    assert!(b
      .state()
      .diagnostic
      .as_deref()
      .unwrap()
      .contains("connection refused"));
  }

  #[test]
  fn failed_reload_keeps_previous_index() {
    let attempts = Mutex::new(0);
    let mut b = browser(Fake {
      index: Box::new(move || {
        let mut attempts = attempts.lock().unwrap();
        *attempts += 1;
        if *attempts == 1 {
          Ok(index())
        } else {
          Err(not_found(0))
        }
      }),
      chapter: Box::new(|_| Err(offline())),
    });

    b.load_index();
    b.wait();
    b.load_index();
    b.wait();

    assert!(!b.state().loading);
    assert_eq!(b.state().chapters, index());
    assert!(b.state().diagnostic.is_some());
  }

  #[test]
  fn panicking_source_clears_loading() {
    let mut b = browser(Fake {
      index: Box::new(|| -> Result<Vec<ChapterSummary>, quran::Error> {
        panic!("index unavailable")
      }),
      chapter: Box::new(|_| Err(offline())),
    });
    b.load_index();
    b.wait();

    assert!(!b.state().loading);
    assert!(b.state().chapters.is_empty());
    assert!(b
      .state()
      .diagnostic
      .as_deref()
      .unwrap()
      .contains("download panicked: index unavailable"));
  }

  #[test]
  fn successful_load_clears_diagnostic() {
    let mut b = browser(online());
    b.select_chapter(200);
    b.wait();
    assert!(b.state().diagnostic.is_some());

    b.load_index();
    b.wait();
    assert!(b.state().diagnostic.is_none());
  }

  #[test]
  fn select_chapter_on_narrow_viewport_opens_overlay() {
    let mut b = browser(online());
    b.set_viewport(Viewport::new(768));
    b.select_chapter(1);
    b.wait();

    let state = b.state();
    assert!(!state.loading);
    assert!(state.overlay_visible);
    let detail = state.detail.as_ref().unwrap();
    assert_eq!(detail.verses.len(), 1);
    assert_eq!(
      detail
        .verses
        .iter()
        .filter(|v| v.index_in_chapter == 1)
        .count(),
      1
    );
  }

  #[test]
  fn select_chapter_on_wide_viewport_leaves_overlay_alone() {
    let mut b = browser(online());
    b.set_viewport(Viewport::new(769));
    b.select_chapter(1);
    b.wait();
    assert!(!b.state().overlay_visible);
    assert_eq!(b.state().detail, Some(fatihah()));

    // An overlay opened while narrow stays open after widening.
    b.set_viewport(Viewport::new(400));
    b.select_chapter(2);
    b.wait();
    assert!(b.state().overlay_visible);

    b.set_viewport(Viewport::new(1200));
    b.select_chapter(3);
    b.wait();
    assert!(b.state().overlay_visible);
    assert_eq!(b.state().detail.as_ref().unwrap().number, 3);
  }

  #[test]
  fn breakpoint_is_configurable() {
    let mut b = browser(online()).with_breakpoint(400);
    b.set_viewport(Viewport::from_columns(80));
    assert!(!b.is_narrow());

    b.set_viewport(Viewport::from_columns(50));
    assert!(b.is_narrow());
  }

  #[test]
  fn viewport_is_read_when_the_chapter_arrives() {
    let (release, gate) = channel::bounded::<()>(0);
    let mut b = browser(gated(gate));
    b.set_viewport(Viewport::new(1024));
    b.select_chapter(1);
    b.set_viewport(Viewport::new(320));

    release.send(()).unwrap();
    b.wait();
    assert!(b.state().overlay_visible);
  }

  #[test]
  fn failed_selection_keeps_previous_chapter() {
    let mut b = browser(online());
    b.set_viewport(Viewport::new(1024));
    b.select_chapter(1);
    b.wait();

    b.select_chapter(115);
    b.wait();

    assert!(!b.state().loading);
    assert_eq!(b.state().detail, Some(fatihah()));
    assert!(b
      .state()
      .diagnostic
      .as_deref()
      .unwrap()
      .contains("chapter 115"));
  }

  #[test]
  fn last_completion_wins() {
    let (release, gate) = channel::bounded::<()>(0);
    let mut b = browser(gated(gate));

    b.select_chapter(1);
    b.select_chapter(2);

    // Chapter 2 is the only one able to finish.
    assert!(b.step());
    assert_eq!(b.state().detail.as_ref().unwrap().number, 2);

    release.send(()).unwrap();
    b.wait();
    assert_eq!(b.state().detail.as_ref().unwrap().number, 1);
    assert!(!b.state().loading);
  }

  #[test]
  fn close_overlay() {
    let mut b = browser(online());
    b.close_overlay();
    assert!(!b.state().overlay_visible);

    b.set_viewport(Viewport::new(300));
    b.select_chapter(1);
    b.wait();
    assert!(b.state().overlay_visible);

    b.close_overlay();
    assert!(!b.state().overlay_visible);
    assert_eq!(b.state().detail, Some(fatihah()));
  }

  #[test]
  fn poll_does_not_block() {
    let (release, gate) = channel::bounded::<()>(0);
    let mut b = browser(gated(gate));
    b.select_chapter(1);
    assert!(!b.poll());
    assert!(b.state().loading);

    release.send(()).unwrap();
    b.wait();
    assert!(!b.poll());
    assert!(!b.state().loading);
  }

  #[test]
  fn search_by_either_name() {
    let mut b = browser(online());
    b.load_index();
    b.wait();

    b.set_search_query("fatihah");
    let numbers = b.filtered().iter().map(|c| c.number).collect::<Vec<_>>();
    assert_eq!(numbers, vec![1]);

    b.set_search_query("SAPI");
    let numbers = b.filtered().iter().map(|c| c.number).collect::<Vec<_>>();
    assert_eq!(numbers, vec![2]);

    b.set_search_query("xyz");
    assert!(b.filtered().is_empty());

    b.set_search_query("");
    assert_eq!(b.filtered().len(), 3);
  }

  #[test]
  fn search_is_idempotent() {
    let mut b = browser(online());
    b.load_index();
    b.wait();

    b.set_search_query("al");
    let once = b.filtered().into_iter().cloned().collect::<Vec<_>>();
    b.set_search_query("al");
    let twice = b.filtered().into_iter().cloned().collect::<Vec<_>>();
    assert_eq!(once, twice);
  }

  #[test]
  fn single_chapter_scenario() {
    let chapters = vec![summary(1, "Al-Fatihah", "Pembukaan")];
    assert_eq!(filter_chapters(&chapters, "fatihah"), vec![&chapters[0]]);
    assert!(filter_chapters(&chapters, "xyz").is_empty());
  }

  fn arb_chapters() -> impl Strategy<Value = Vec<ChapterSummary>> {
    prop::collection::vec(("[a-zA-Z' -]{0,12}", "[a-zA-Z ]{0,12}"), 0..20)
      .prop_map(|names| {
        names
          .into_iter()
          .enumerate()
          .map(|(i, (t, tr))| summary(i as u32 + 1, &t, &tr))
          .collect()
      })
  }

  proptest! {
    #[test]
    fn filter_is_an_ordered_exact_subset(
      chapters in arb_chapters(),
      query in "[a-zA-Z]{0,3}",
    ) {
      let kept = filter_chapters(&chapters, &query);
      let needle = query.to_lowercase();
      let matches = |c: &ChapterSummary| {
        c.transliterated_name.to_lowercase().contains(&needle)
          || c.translated_name.to_lowercase().contains(&needle)
      };

      // Every kept chapter matches, in source order.
      let numbers = kept.iter().map(|c| c.number).collect::<Vec<_>>();
      let mut sorted = numbers.clone();
      sorted.sort_unstable();
      prop_assert_eq!(&numbers, &sorted);
      for &c in &kept {
        prop_assert!(matches(c));
      }

      // Every dropped chapter matches neither name.
      for c in &chapters {
        if !numbers.contains(&c.number) {
          prop_assert!(!matches(c));
        }
      }
    }

    #[test]
    fn filter_ignores_case(
      chapters in arb_chapters(),
      query in "[a-zA-Z]{0,3}",
    ) {
      prop_assert_eq!(
        filter_chapters(&chapters, &query.to_uppercase()),
        filter_chapters(&chapters, &query.to_lowercase()),
      );
    }
  }
}
