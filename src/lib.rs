//! `quran` is a client library for the Quran API.

#![deny(warnings, missing_docs, unused)]

pub mod api;
pub mod model;

pub use api::Api;
pub use api::Error;
