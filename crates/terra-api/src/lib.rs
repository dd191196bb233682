//! JSON REST API for Terra.
//!
//! Exposes an axum [`Router`] backed by any [`CountryStore`] plus a
//! [`RefreshPipeline`] over any pair of sources. TLS and transport concerns
//! are the caller's responsibility.
//!
//! | Method   | Path                       | Behavior |
//! |----------|----------------------------|----------|
//! | `POST`   | `/countries/refresh`       | run the pipeline; 503 when an upstream source is unreachable |
//! | `GET`    | `/countries`               | all stored records |
//! | `GET`    | `/countries/search?name=`  | substring matches; 400 empty, 404 none |
//! | `DELETE` | `/countries/delete?name=`  | delete matches; same 400/404 rules |
//! | `GET`    | `/countries/status`        | total count + latest refresh timestamp |
//! | `GET`    | `/countries/image`         | cached summary PNG; 404 before first generation |

pub mod countries;
pub mod error;
pub mod image;
pub mod refresh;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use terra_core::{
  source::{CountrySource, RateSource},
  store::CountryStore,
};
use terra_refresh::RefreshPipeline;

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<C, R, S> {
  pub store:        S,
  pub pipeline:     Arc<RefreshPipeline<C, R, S>>,
  /// Where the summary renderer writes; the image endpoint reads it back.
  pub summary_path: PathBuf,
}

// Manual impl: `C` and `R` sit behind the `Arc` and need not be `Clone`.
impl<C, R, S: Clone> Clone for AppState<C, R, S> {
  fn clone(&self) -> Self {
    Self {
      store:        self.store.clone(),
      pipeline:     Arc::clone(&self.pipeline),
      summary_path: self.summary_path.clone(),
    }
  }
}

/// Build a fully-materialised API router for `state`.
pub fn api_router<C, R, S>(state: AppState<C, R, S>) -> Router
where
  C: CountrySource + 'static,
  R: RateSource + 'static,
  S: CountryStore + Clone + 'static,
{
  Router::new()
    .route("/countries/refresh", post(refresh::handler::<C, R, S>))
    .route("/countries", get(countries::list::<C, R, S>))
    .route("/countries/search", get(countries::search::<C, R, S>))
    .route("/countries/delete", delete(countries::delete_matches::<C, R, S>))
    .route("/countries/status", get(countries::status::<C, R, S>))
    .route("/countries/image", get(image::handler::<C, R, S>))
    .with_state(state)
}
