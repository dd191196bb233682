//! Handler for `POST /countries/refresh`.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use terra_core::{
  source::{CountrySource, RateSource},
  store::CountryStore,
};

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
  pub success:   bool,
  pub message:   String,
  pub timestamp: DateTime<Utc>,
}

/// Runs the full refresh pipeline. Upstream failures come back as 503 via
/// [`ApiError`]; a failed summary render does not fail the request.
pub async fn handler<C, R, S>(
  State(state): State<AppState<C, R, S>>,
) -> Result<Json<RefreshResponse>, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  let outcome = state.pipeline.refresh().await?;

  Ok(Json(RefreshResponse {
    success:   true,
    message:   format!("refreshed {} countries", outcome.countries_refreshed),
    timestamp: outcome.finished_at,
  }))
}
