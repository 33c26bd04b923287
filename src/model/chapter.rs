//! Chapters (surah) and their verses (ayah).

use serde::Deserialize;

use crate::api::Error;
use crate::model::text::Localized;
use crate::model::text::Name;

/// An entry in the chapter index.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "WireSummary")]
pub struct ChapterSummary {
  /// This chapter's number, starting at 1.
  pub number: u32,
  /// The chapter name in Latin script.
  pub transliterated_name: String,
  /// The chapter name, translated.
  pub translated_name: String,
}

impl ChapterSummary {
  /// Returns how this chapter is listed in the index, e.g.
  /// `"1. Al-Fatihah"`.
  pub fn label(&self) -> String {
    format!("{}. {}", self.number, self.transliterated_name)
  }

  /// Returns whether either name contains `needle`.
  ///
  /// `needle` must already be lowercased; the names are lowercased here.
  pub fn matches_lowercase(&self, needle: &str) -> bool {
    self.transliterated_name.to_lowercase().contains(needle)
      || self.translated_name.to_lowercase().contains(needle)
  }
}

/// A chapter along with every verse in it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "WireDetail")]
pub struct ChapterDetail {
  /// This chapter's number, starting at 1.
  pub number: u32,
  /// The chapter name in Latin script.
  pub transliterated_name: String,
  /// The chapter name, translated.
  pub translated_name: String,
  /// The verses of this chapter, in order.
  pub verses: Vec<Verse>,
}

impl ChapterDetail {
  /// Returns the heading shown above the verses, e.g.
  /// `"Al-Fatihah - Pembukaan"`.
  pub fn heading(&self) -> String {
    format!("{} - {}", self.transliterated_name, self.translated_name)
  }
}

/// A single verse.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "WireVerse")]
pub struct Verse {
  /// The position of this verse within its chapter, starting at 1.
  pub index_in_chapter: u32,
  /// The verse in Arabic script.
  pub arabic_text: String,
  /// The verse, translated.
  pub translated_text: String,
}

/// Puts a freshly downloaded index into canonical order.
///
/// The index is sorted by chapter number; a number appearing twice means the
/// payload is malformed.
pub(crate) fn canonicalize_index(
  mut chapters: Vec<ChapterSummary>,
) -> Result<Vec<ChapterSummary>, Error> {
  chapters.sort_by_key(|c| c.number);
  if let Some(pair) = chapters.windows(2).find(|w| w[0].number == w[1].number)
  {
    return Err(Error::Malformed(format!(
      "chapter {} appears more than once in the index",
      pair[0].number
    )));
  }
  Ok(chapters)
}

/// Checks that a chapter's verses are numbered `1, 2, ..., n`.
pub(crate) fn check_verses(detail: &ChapterDetail) -> Result<(), Error> {
  for (i, verse) in detail.verses.iter().enumerate() {
    let expected = i as u32 + 1;
    if verse.index_in_chapter != expected {
      return Err(Error::Malformed(format!(
        "chapter {}: expected verse {} but found verse {}",
        detail.number, expected, verse.index_in_chapter
      )));
    }
  }
  Ok(())
}

#[derive(Deserialize)]
struct WireSummary {
  number: u32,
  name: Name,
}

impl From<WireSummary> for ChapterSummary {
  fn from(wire: WireSummary) -> Self {
    Self {
      number: wire.number,
      transliterated_name: wire.name.transliteration.text,
      translated_name: wire.name.translation.text,
    }
  }
}

#[derive(Deserialize)]
struct WireDetail {
  number: u32,
  name: Name,
  verses: Vec<Verse>,
}

impl From<WireDetail> for ChapterDetail {
  fn from(wire: WireDetail) -> Self {
    Self {
      number: wire.number,
      transliterated_name: wire.name.transliteration.text,
      translated_name: wire.name.translation.text,
      verses: wire.verses,
    }
  }
}

#[derive(Deserialize)]
struct WireVerse {
  number: VerseNumber,
  text: VerseText,
  translation: Localized,
}

#[derive(Deserialize)]
struct VerseNumber {
  #[serde(rename = "inSurah")]
  in_surah: u32,
}

#[derive(Deserialize)]
struct VerseText {
  arab: String,
}

impl From<WireVerse> for Verse {
  fn from(wire: WireVerse) -> Self {
    Self {
      index_in_chapter: wire.number.in_surah,
      arabic_text: wire.text.arab,
      translated_text: wire.translation.text,
    }
  }
}
