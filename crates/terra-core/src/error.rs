//! The closed error set for Terra.
//!
//! Every fallible operation in the pipeline and the store resolves to one of
//! these variants; the API layer matches on them exhaustively to pick a
//! status code.

use std::fmt;

use thiserror::Error;

/// Which upstream API a fetch failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
  Countries,
  ExchangeRate,
}

impl FetchSource {
  pub fn as_str(self) -> &'static str {
    match self {
      FetchSource::Countries => "countries",
      FetchSource::ExchangeRate => "exchange-rate",
    }
  }
}

impl fmt::Display for FetchSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::error::Error for FetchSource {}

#[derive(Debug, Error)]
pub enum Error {
  /// An upstream source was unreachable, timed out, or answered non-2xx.
  /// A refresh aborts on the first one of these it hits.
  #[error("{source} source unavailable: {reason}")]
  ExternalFetch { source: FetchSource, reason: String },

  /// A caller-supplied search or delete term was missing or empty.
  #[error("invalid request: {0}")]
  Validation(String),

  /// A search or delete matched zero rows.
  #[error("no countries matched {0:?}")]
  NotFound(String),

  /// A store write or read failed. Rows written before the failure stay
  /// committed; nothing is rolled back.
  #[error("persistence error: {0}")]
  Persistence(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
  /// Wrap an underlying store failure.
  pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Persistence(Box::new(err))
  }

  pub fn fetch(source: FetchSource, reason: impl Into<String>) -> Self {
    Error::ExternalFetch { source, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
