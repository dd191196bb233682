//! Traits for the two upstream data sources.
//!
//! Concrete HTTP implementations live in `terra-fetch`; the refresh pipeline
//! and its tests depend only on these.

use std::future::Future;

use crate::{country::{RateTable, RawCountry}, error::Result};

/// The reference API that lists country metadata.
///
/// Implementations report failures (transport, timeout, non-2xx, bad body)
/// as [`Error::ExternalFetch`](crate::Error::ExternalFetch) with
/// [`FetchSource::Countries`](crate::FetchSource::Countries).
pub trait CountrySource: Send + Sync {
  fn fetch_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<RawCountry>>> + Send + '_;
}

/// The exchange-rate API, mapping currency codes to rates against a fixed
/// base currency. Failure reporting mirrors [`CountrySource`] with
/// [`FetchSource::ExchangeRate`](crate::FetchSource::ExchangeRate).
pub trait RateSource: Send + Sync {
  fn fetch_rates(&self) -> impl Future<Output = Result<RateTable>> + Send + '_;
}
