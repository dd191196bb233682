//! Handler for `GET /countries/image`.

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use terra_core::{
  source::{CountrySource, RateSource},
  store::CountryStore,
};

use crate::{error::ApiError, AppState};

/// Serves the cached summary PNG. 404 until the first successful refresh
/// produces one; any other read failure also maps to "not generated yet"
/// since the artifact is best-effort by contract.
pub async fn handler<C, R, S>(
  State(state): State<AppState<C, R, S>>,
) -> Result<Response, ApiError>
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  let bytes = tokio::fs::read(&state.summary_path)
    .await
    .map_err(|_| ApiError::NoImage)?;

  Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}
