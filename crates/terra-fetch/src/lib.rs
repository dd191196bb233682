//! HTTP clients for the two upstream data sources.
//!
//! [`RestCountriesSource`] speaks the REST Countries v2 response shape;
//! [`ExchangeRateSource`] speaks the open.er-api.com shape. Both hold a
//! shared [`reqwest::Client`] and map every failure — transport, timeout,
//! non-2xx status, undecodable body — to
//! [`Error::ExternalFetch`](terra_core::Error::ExternalFetch) tagged with
//! their source.

mod countries;
mod rates;

use std::time::Duration;

pub use countries::RestCountriesSource;
pub use rates::ExchangeRateSource;

/// Default country list endpoint, used when configuration leaves it unset.
pub const DEFAULT_COUNTRIES_URL: &str =
  "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

/// Default exchange-rate endpoint (USD base), used when configuration leaves
/// it unset.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

/// Build the HTTP client both sources share. `timeout` bounds each whole
/// request, connect included.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
  reqwest::Client::builder().timeout(timeout).build()
}
