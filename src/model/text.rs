//! Localization structures.
//!
//! The Quran API nests every localized string inside an object keyed by
//! language code. Only the Indonesian (`id`) rendering is bundled, so these
//! types keep that one field and ignore the rest.

use serde::Deserialize;

/// Text localized into the bundled language.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Localized {
  /// The Indonesian rendering.
  #[serde(rename = "id")]
  pub text: String,
}

/// The pair of display names every chapter carries.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Name {
  /// The chapter name written in Latin script, e.g. "Al-Fatihah".
  pub transliteration: Localized,
  /// The chapter name translated, e.g. "Pembukaan".
  pub translation: Localized,
}
