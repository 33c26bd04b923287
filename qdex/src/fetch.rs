//! Background fetching of chapters.
//!
//! Every request runs on its own thread against a blocking [`Source`] and
//! reports a [`Completion`] back over a channel. Nothing is applied off the
//! UI thread; the owner of the [`Fetcher`] drains completions and decides
//! what to do with them.

use std::io;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread;

use crossbeam::channel;
use crossbeam::channel::Receiver;
use crossbeam::channel::Sender;

use quran::api;
use quran::model::ChapterDetail;
use quran::model::ChapterSummary;
use quran::Api;

/// Somewhere chapters can be downloaded from.
///
/// This is implemented by [`Api`]; tests substitute their own.
pub trait Source: Send + Sync + 'static {
  /// Downloads the chapter index.
  fn chapters(&self) -> Result<Vec<ChapterSummary>, api::Error>;

  /// Downloads one chapter with its verses.
  fn chapter(&self, number: u32) -> Result<ChapterDetail, api::Error>;
}

impl Source for Api {
  fn chapters(&self) -> Result<Vec<ChapterSummary>, api::Error> {
    Api::chapters(self)
  }

  fn chapter(&self, number: u32) -> Result<ChapterDetail, api::Error> {
    Api::chapter(self, number)
  }
}

/// A request to run in the background.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
  Index,
  Chapter(u32),
}

/// The outcome of a [`Request`].
#[derive(Debug)]
pub enum Completion {
  Index(Result<Vec<ChapterSummary>, api::Error>),
  Chapter {
    number: u32,
    result: Result<ChapterDetail, api::Error>,
  },
}

/// Spawns requests and collects their completions.
pub struct Fetcher<S> {
  source: Arc<S>,
  sink: Sender<Completion>,
  completions: Receiver<Completion>,
  in_flight: usize,
}

impl<S: Source> Fetcher<S> {
  pub fn new(source: Arc<S>) -> Self {
    let (sink, completions) = channel::unbounded();
    Self {
      source,
      sink,
      completions,
      in_flight: 0,
    }
  }

  /// Starts `request` on a new thread.
  ///
  /// Requests are never cancelled or deduplicated; each one runs to
  /// completion and produces exactly one [`Completion`], even if the
  /// [`Source`] panics.
  pub fn spawn(&mut self, request: Request) {
    self.in_flight += 1;

    let source = Arc::clone(&self.source);
    let sink = self.sink.clone();
    thread::spawn(move || {
      let completion = match request {
        Request::Index => Completion::Index(unwinding(|| source.chapters())),
        Request::Chapter(number) => Completion::Chapter {
          number,
          result: unwinding(|| source.chapter(number)),
        },
      };
      // The receiver only goes away when the fetcher is dropped, at which
      // point nobody cares about the result.
      let _ = sink.send(completion);
    });
  }

  /// Returns a finished completion, if there is one, without blocking.
  pub fn try_next(&mut self) -> Option<Completion> {
    let completion = self.completions.try_recv().ok()?;
    self.in_flight -= 1;
    Some(completion)
  }

  /// Blocks until a request finishes.
  ///
  /// Returns `None` immediately if nothing is in flight.
  pub fn next_blocking(&mut self) -> Option<Completion> {
    if self.in_flight == 0 {
      return None;
    }

    let completion = self.completions.recv().ok()?;
    self.in_flight -= 1;
    Some(completion)
  }
}

/// Runs `download`, turning a panic into an error.
fn unwinding<T>(
  download: impl FnOnce() -> Result<T, api::Error>,
) -> Result<T, api::Error> {
  panic::catch_unwind(AssertUnwindSafe(download)).unwrap_or_else(|payload| {
    let reason = payload
      .downcast_ref::<&str>()
      .map(|s| s.to_string())
      .or_else(|| payload.downcast_ref::<String>().cloned())
      .unwrap_or_else(|| "no message".to_string());
    tracing::error!(%reason, "download panicked");
    Err(api::Error::Io(io::Error::new(
      io::ErrorKind::Other,
      format!("download panicked: {}", reason),
    )))
  })
}
