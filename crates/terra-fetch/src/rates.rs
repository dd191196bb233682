//! The exchange-rate client.

use serde::Deserialize;
use terra_core::{country::RateTable, source::RateSource, Error, FetchSource, Result};

/// Fetches the rate table from an open.er-api-shaped endpoint.
#[derive(Clone)]
pub struct ExchangeRateSource {
  client: reqwest::Client,
  url:    String,
}

impl ExchangeRateSource {
  pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

/// Envelope around the rate table; the endpoint wraps it in metadata we
/// otherwise ignore.
#[derive(Debug, Deserialize)]
struct RatesResponse {
  rates: RateTable,
}

fn fetch_err(err: reqwest::Error) -> Error {
  Error::fetch(FetchSource::ExchangeRate, err.to_string())
}

impl RateSource for ExchangeRateSource {
  async fn fetch_rates(&self) -> Result<RateTable> {
    let response = self
      .client
      .get(&self.url)
      .send()
      .await
      .map_err(fetch_err)?
      .error_for_status()
      .map_err(fetch_err)?;

    let body = response.json::<RatesResponse>().await.map_err(fetch_err)?;
    Ok(body.rates)
  }
}

#[cfg(test)]
mod tests {
  use super::RatesResponse;

  #[test]
  fn decodes_rate_envelope() {
    let body = r#"{
      "result": "success",
      "base_code": "USD",
      "rates": {"USD": 1.0, "GBP": 0.79, "NGN": 1530.5}
    }"#;

    let parsed: RatesResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.rates.len(), 3);
    assert_eq!(parsed.rates["GBP"], 0.79);
  }
}
