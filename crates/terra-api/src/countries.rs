//! Handlers for the read/search/delete/status endpoints.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use terra_core::{
  country::CountryRecord,
  source::{CountrySource, RateSource},
  store::CountryStore,
};

use crate::{error::ApiError, AppState};

/// `GET /countries`
pub async fn list<C, R, S>(
  State(state): State<AppState<C, R, S>>,
) -> Result<Json<Vec<CountryRecord>>, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  Ok(Json(state.store.find_all().await?))
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NameParam {
  /// A missing parameter is treated as the empty string, which the store
  /// rejects as a validation error.
  #[serde(default)]
  pub name: String,
}

/// `GET /countries/search?name=<substring>`
pub async fn search<C, R, S>(
  State(state): State<AppState<C, R, S>>,
  Query(params): Query<NameParam>,
) -> Result<Json<Vec<CountryRecord>>, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  Ok(Json(state.store.find_by_name_contains(&params.name).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
  pub deleted: u64,
  pub query:   String,
}

/// `DELETE /countries/delete?name=<substring>`
pub async fn delete_matches<C, R, S>(
  State(state): State<AppState<C, R, S>>,
  Query(params): Query<NameParam>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  let deleted = state.store.delete_by_name_contains(&params.name).await?;
  Ok(Json(DeleteResponse { deleted, query: params.name }))
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub total_countries:   u64,
  /// `null` until the first successful refresh write.
  pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// `GET /countries/status`
pub async fn status<C, R, S>(
  State(state): State<AppState<C, R, S>>,
) -> Result<Json<StatusResponse>, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  let total_countries = state.store.count().await?;
  let last_refreshed_at = state.store.last_refreshed_at().await?;
  Ok(Json(StatusResponse { total_countries, last_refreshed_at }))
}
