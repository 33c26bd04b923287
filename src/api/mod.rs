//! A Quran API client.

use std::io;
use std::io::Read;

use reqwest::blocking::Client;

use crate::model::chapter;
use crate::model::ChapterDetail;
use crate::model::ChapterSummary;

pub mod envelope;

/// The public instance of the Quran API.
pub const DEFAULT_BASE_URL: &str = "https://api.quran.gading.dev";

/// An API client.
///
/// This type is the entrypoint for downloading chapters from the Quran API.
/// Nothing is cached; every call performs a request.
pub struct Api {
  base_url: String,
  client: Client,
}

/// Options for constructing an [`Api`].
pub struct Options {
  /// The base URL to point the client at.
  pub base_url: String,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
    }
  }
}

/// An [`Api`] client error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Http(#[from] reqwest::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("API returned {code} {status:?}{}", message_suffix(.message))]
  Status {
    code: u16,
    status: String,
    message: Option<String>,
  },

  #[error("malformed payload: {0}")]
  Malformed(String),
}

fn message_suffix(message: &Option<String>) -> String {
  match message {
    Some(m) => format!(": {}", m),
    None => String::new(),
  }
}

impl Api {
  /// Creates a new [`Api`] pointed at [`DEFAULT_BASE_URL`].
  pub fn new() -> Self {
    Self::with_options(Options::default())
  }

  /// Creates a new [`Api`] pointed at `base_url`.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self::with_options(Options {
      base_url: base_url.into(),
    })
  }

  /// Creates a new [`Api`] with the given options.
  pub fn with_options(opts: Options) -> Self {
    Self {
      base_url: opts.base_url.trim_end_matches('/').to_string(),
      client: Client::new(),
    }
  }

  /// Returns the base URL requests are made against.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Base request-generating function.
  fn request(&self, path: &str) -> Result<Vec<u8>, Error> {
    let url = format!("{}/{}", self.base_url, path);
    tracing::debug!(%url, "GET");

    let mut buf = Vec::new();
    self.client.get(&url).send()?.read_to_end(&mut buf)?;
    Ok(buf)
  }

  /// Downloads the index of every chapter, ordered by chapter number.
  pub fn chapters(&self) -> Result<Vec<ChapterSummary>, Error> {
    decode_index(&self.request("surah")?)
  }

  /// Downloads the chapter numbered `number`, with all of its verses.
  ///
  /// `number` is not checked locally; an out-of-range number fails however
  /// the server chooses to fail it.
  pub fn chapter(&self, number: u32) -> Result<ChapterDetail, Error> {
    decode_chapter(&self.request(&format!("surah/{}", number))?)
  }
}

impl Default for Api {
  fn default() -> Self {
    Self::new()
  }
}

/// Decodes the body of a `GET /surah` response.
pub fn decode_index(body: &[u8]) -> Result<Vec<ChapterSummary>, Error> {
  chapter::canonicalize_index(envelope::unwrap(body)?)
}

/// Decodes the body of a `GET /surah/{number}` response.
pub fn decode_chapter(body: &[u8]) -> Result<ChapterDetail, Error> {
  let detail = envelope::unwrap(body)?;
  chapter::check_verses(&detail)?;
  Ok(detail)
}
