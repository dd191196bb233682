//! The country-list client.

use terra_core::{country::RawCountry, source::CountrySource, Error, FetchSource, Result};

/// Fetches the full country list from a REST Countries-shaped endpoint.
#[derive(Clone)]
pub struct RestCountriesSource {
  client: reqwest::Client,
  url:    String,
}

impl RestCountriesSource {
  pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
    Self { client, url: url.into() }
  }
}

fn fetch_err(err: reqwest::Error) -> Error {
  Error::fetch(FetchSource::Countries, err.to_string())
}

impl CountrySource for RestCountriesSource {
  async fn fetch_countries(&self) -> Result<Vec<RawCountry>> {
    let response = self
      .client
      .get(&self.url)
      .send()
      .await
      .map_err(fetch_err)?
      .error_for_status()
      .map_err(fetch_err)?;

    response.json::<Vec<RawCountry>>().await.map_err(fetch_err)
  }
}
