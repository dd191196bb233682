//! The refresh pipeline: fetch → transform → upsert → summary.
//!
//! [`RefreshPipeline`] pulls the country list and the rate table from the
//! two upstream sources, runs every raw record through the transformer,
//! writes the results through the store one record at a time, and finally
//! regenerates the summary artifact.
//!
//! Failure policy, in order:
//! - either fetch failing aborts the whole refresh before any write;
//! - a write failing aborts the refresh, leaving earlier writes committed
//!   (no transaction spans the batch);
//! - a summary failure is logged and swallowed — the refresh still counts
//!   as successful.
//!
//! There is deliberately no guard against overlapping refreshes; callers
//! that need mutual exclusion must provide their own.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use terra_core::{
  source::{CountrySource, RateSource},
  store::CountryStore,
  transform::transform,
  Result,
};
use terra_summary::SummaryRenderer;

/// What a successful refresh accomplished.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
  /// Rows written (inserted or updated), equal to the upstream list length.
  pub countries_refreshed: usize,
  /// Whether the summary artifact was regenerated. `false` means the
  /// previous artifact (if any) is still being served.
  pub summary_written:     bool,
  pub finished_at:         DateTime<Utc>,
}

/// Orchestrates one full refresh. Generic over both sources and the store so
/// tests can substitute stubs for the network.
pub struct RefreshPipeline<C, R, S> {
  countries: C,
  rates:     R,
  store:     S,
  summary:   SummaryRenderer,
}

impl<C, R, S> RefreshPipeline<C, R, S>
where
  C: CountrySource,
  R: RateSource,
  S: CountryStore,
{
  pub fn new(countries: C, rates: R, store: S, summary: SummaryRenderer) -> Self {
    Self { countries, rates, store, summary }
  }

  /// Run one refresh to completion.
  ///
  /// The per-record loop is strictly sequential: each upsert depends only on
  /// its own existence check and the upstream list is a few hundred entries,
  /// so there is nothing to gain from fan-out.
  pub async fn refresh(&self) -> Result<RefreshOutcome> {
    let raw_countries = self.countries.fetch_countries().await?;
    info!(count = raw_countries.len(), "fetched country list");

    let rate_table = self.rates.fetch_rates().await?;
    info!(count = rate_table.len(), "fetched exchange rates");

    let mut written = 0usize;
    for raw in raw_countries {
      let record = transform(raw, &rate_table, &mut rand::thread_rng());
      self.store.upsert_by_name(record).await?;
      written += 1;
    }
    info!(countries = written, "refresh writes complete");

    let summary_written = match self.summary.generate(&self.store).await {
      Ok(path) => {
        info!(path = %path.display(), "summary artifact written");
        true
      }
      Err(e) => {
        warn!(error = %e, "summary generation failed; keeping previous artifact");
        false
      }
    };

    Ok(RefreshOutcome {
      countries_refreshed: written,
      summary_written,
      finished_at: Utc::now(),
    })
  }
}

#[cfg(test)]
mod tests;
