//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The core error set is closed, so the mapping to status codes is an
//! exhaustive match: `Validation` → 400, `NotFound` → 404, `ExternalFetch` →
//! 503, everything else → 500.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use terra_core::Error as CoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),

  #[error("summary image has not been generated yet")]
  NoImage,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Core(CoreError::ExternalFetch { source, reason }) => (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
          "error": "external data source unavailable",
          "details": format!("{source}: {reason}"),
        })),
      )
        .into_response(),

      ApiError::Core(CoreError::Validation(message)) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
      }

      ApiError::Core(err @ CoreError::NotFound(_)) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() })))
          .into_response()
      }

      ApiError::Core(err @ CoreError::Persistence(_)) => {
        tracing::error!(error = %err, "internal error");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "internal error" })),
        )
          .into_response()
      }

      ApiError::NoImage => (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "summary image has not been generated yet" })),
      )
        .into_response(),
    }
  }
}
