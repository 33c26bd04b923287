//! Sources and fixtures intended for testing.

use std::io;
use std::sync::Arc;

use crossbeam::channel::Receiver;

use quran::api;
use quran::model::ChapterDetail;
use quran::model::ChapterSummary;
use quran::model::Verse;

use crate::chapters::ChapterBrowser;
use crate::fetch::Source;

type IndexFn =
  Box<dyn Fn() -> Result<Vec<ChapterSummary>, api::Error> + Send + Sync>;
type ChapterFn =
  Box<dyn Fn(u32) -> Result<ChapterDetail, api::Error> + Send + Sync>;

/// A [`Source`] that answers with whatever its closures return.
pub struct Fake {
  pub index: IndexFn,
  pub chapter: ChapterFn,
}

impl Source for Fake {
  fn chapters(&self) -> Result<Vec<ChapterSummary>, api::Error> {
    (self.index)()
  }

  fn chapter(&self, number: u32) -> Result<ChapterDetail, api::Error> {
    (self.chapter)(number)
  }
}

/// A transport failure.
pub fn offline() -> api::Error {
  api::Error::Io(io::Error::new(
    io::ErrorKind::ConnectionRefused,
    "connection refused",
  ))
}

/// The failure the API reports for an out-of-range chapter.
pub fn not_found(number: u32) -> api::Error {
  api::Error::Status {
    code: 404,
    status: "Not Found.".to_string(),
    message: Some(format!("Surah \"{}\" is not found.", number)),
  }
}

pub fn summary(
  number: u32,
  transliterated: &str,
  translated: &str,
) -> ChapterSummary {
  ChapterSummary {
    number,
    transliterated_name: transliterated.to_string(),
    translated_name: translated.to_string(),
  }
}

/// Chapter 1, cut down to a single verse.
pub fn fatihah() -> ChapterDetail {
  ChapterDetail {
    number: 1,
    transliterated_name: "Al-Fatihah".to_string(),
    translated_name: "Pembukaan".to_string(),
    verses: vec![Verse {
      index_in_chapter: 1,
      arabic_text: "...".to_string(),
      translated_text: "Dengan nama Allah...".to_string(),
    }],
  }
}

/// A chapter with no verses.
pub fn detail(number: u32) -> ChapterDetail {
  ChapterDetail {
    number,
    transliterated_name: format!("Surah {}", number),
    translated_name: String::new(),
    verses: Vec::new(),
  }
}

pub fn index() -> Vec<ChapterSummary> {
  vec![
    summary(1, "Al-Fatihah", "Pembukaan"),
    summary(2, "Al-Baqarah", "Sapi"),
    summary(3, "Ali 'Imran", "Keluarga Imran"),
  ]
}

/// A source serving [`index()`], [`fatihah()`], and chapters 2 and 3.
///
/// Every other chapter is not found.
pub fn online() -> Fake {
  Fake {
    index: Box::new(|| Ok(index())),
    chapter: Box::new(|n| match n {
      1 => Ok(fatihah()),
      2 | 3 => Ok(detail(n)),
      n => Err(not_found(n)),
    }),
  }
}

/// A source whose chapter 1 blocks until `gate` yields.
pub fn gated(gate: Receiver<()>) -> Fake {
  Fake {
    index: Box::new(|| Ok(index())),
    chapter: Box::new(move |n| {
      if n == 1 {
        let _ = gate.recv();
        Ok(fatihah())
      } else {
        Ok(detail(n))
      }
    }),
  }
}

pub fn browser(fake: Fake) -> ChapterBrowser<Fake> {
  ChapterBrowser::new(Arc::new(fake))
}
