//! End-to-end pipeline tests with stub sources and an in-memory store.

use std::collections::HashMap;

use terra_core::{
  country::{RateTable, RawCountry, RawCurrency},
  source::{CountrySource, RateSource},
  store::CountryStore,
  Error, FetchSource,
};
use terra_store_sqlite::SqliteStore;
use terra_summary::SummaryRenderer;

use crate::RefreshPipeline;

// ─── Stub sources ────────────────────────────────────────────────────────────

struct StaticCountries(Vec<RawCountry>);

impl CountrySource for StaticCountries {
  async fn fetch_countries(&self) -> terra_core::Result<Vec<RawCountry>> {
    Ok(self.0.clone())
  }
}

struct FailingCountries;

impl CountrySource for FailingCountries {
  async fn fetch_countries(&self) -> terra_core::Result<Vec<RawCountry>> {
    Err(Error::fetch(FetchSource::Countries, "connection refused"))
  }
}

struct StaticRates(RateTable);

impl RateSource for StaticRates {
  async fn fetch_rates(&self) -> terra_core::Result<RateTable> {
    Ok(self.0.clone())
  }
}

struct FailingRates;

impl RateSource for FailingRates {
  async fn fetch_rates(&self) -> terra_core::Result<RateTable> {
    Err(Error::fetch(FetchSource::ExchangeRate, "timed out"))
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn raw(name: &str, population: u64, codes: &[&str]) -> RawCountry {
  RawCountry {
    name:       name.to_owned(),
    capital:    Some("Capital".to_owned()),
    region:     Some("Testing".to_owned()),
    population,
    flag_url:   None,
    currencies: codes
      .iter()
      .map(|c| RawCurrency { code: (*c).to_owned(), name: None, symbol: None })
      .collect(),
  }
}

fn usd_rates() -> RateTable {
  HashMap::from([("USD".to_owned(), 1.0)])
}

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.unwrap()
}

fn summary_in(dir: &tempfile::TempDir) -> SummaryRenderer {
  SummaryRenderer::new(dir.path().join("summary.png"))
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn currencyless_country_stores_nulls_and_zero_estimate() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![raw("Wakanda", 1_000_000, &[])]),
    StaticRates(usd_rates()),
    store.clone(),
    summary_in(&dir),
  );

  let outcome = pipeline.refresh().await.unwrap();
  assert_eq!(outcome.countries_refreshed, 1);

  let rows = store.find_all().await.unwrap();
  assert_eq!(rows.len(), 1);
  let wakanda = &rows[0];
  assert_eq!(wakanda.currency_code, None);
  assert_eq!(wakanda.exchange_rate, None);
  assert_eq!(wakanda.estimated_value, 0.0);
}

#[tokio::test]
async fn estimate_lands_within_multiplier_bounds() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![raw("Testland", 100, &["USD"])]),
    StaticRates(HashMap::from([("USD".to_owned(), 2.0)])),
    store.clone(),
    summary_in(&dir),
  );

  pipeline.refresh().await.unwrap();

  let rows = store.find_all().await.unwrap();
  let testland = &rows[0];
  assert_eq!(testland.exchange_rate, Some(2.0));
  // 100 * [1000, 2000) / 2.0
  assert!(testland.estimated_value >= 50_000.0);
  assert!(testland.estimated_value <= 100_000.0);
}

#[tokio::test]
async fn country_fetch_failure_aborts_before_any_write() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let pipeline = RefreshPipeline::new(
    FailingCountries,
    StaticRates(usd_rates()),
    store.clone(),
    summary_in(&dir),
  );

  let err = pipeline.refresh().await.unwrap_err();
  assert!(matches!(
    err,
    Error::ExternalFetch { source: FetchSource::Countries, .. }
  ));
  assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn rate_fetch_failure_discards_fetched_countries() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![raw("Testland", 100, &["USD"])]),
    FailingRates,
    store.clone(),
    summary_in(&dir),
  );

  let err = pipeline.refresh().await.unwrap_err();
  assert!(matches!(
    err,
    Error::ExternalFetch { source: FetchSource::ExchangeRate, .. }
  ));
  assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn refresh_twice_keeps_row_count_and_advances_timestamp() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![
      raw("Testland", 100, &["USD"]),
      raw("Wakanda", 1_000_000, &[]),
    ]),
    StaticRates(usd_rates()),
    store.clone(),
    summary_in(&dir),
  );

  pipeline.refresh().await.unwrap();
  let first = store.last_refreshed_at().await.unwrap().unwrap();
  let first_ids: Vec<_> = store.find_all().await.unwrap().iter().map(|r| r.id).collect();

  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  pipeline.refresh().await.unwrap();

  let rows = store.find_all().await.unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| first_ids.contains(&r.id)));

  let second = store.last_refreshed_at().await.unwrap().unwrap();
  assert!(second > first);
}

#[tokio::test]
async fn successful_refresh_writes_summary_artifact() {
  let dir = tempfile::tempdir().unwrap();
  let store = store().await;
  let summary = summary_in(&dir);
  let artifact = summary.output_path().to_path_buf();

  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![raw("Testland", 100, &["USD"])]),
    StaticRates(usd_rates()),
    store,
    summary,
  );

  let outcome = pipeline.refresh().await.unwrap();
  assert!(outcome.summary_written);
  assert!(artifact.exists());
}

#[tokio::test]
async fn summary_failure_is_swallowed() {
  let store = store().await;
  // Parent "directory" is a regular file, so the artifact write must fail.
  let blocker = tempfile::NamedTempFile::new().unwrap();
  let summary = SummaryRenderer::new(blocker.path().join("summary.png"));

  let pipeline = RefreshPipeline::new(
    StaticCountries(vec![raw("Testland", 100, &["USD"])]),
    StaticRates(usd_rates()),
    store.clone(),
    summary,
  );

  let outcome = pipeline.refresh().await.unwrap();
  assert_eq!(outcome.countries_refreshed, 1);
  assert!(!outcome.summary_written);
  assert_eq!(store.count().await.unwrap(), 1);
}
