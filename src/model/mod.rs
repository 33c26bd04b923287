//! Structs describing the Quran API data model.

pub mod chapter;
mod text;

pub use chapter::ChapterDetail;
pub use chapter::ChapterSummary;
pub use chapter::Verse;
