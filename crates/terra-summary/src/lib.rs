//! Summary artifact generation.
//!
//! [`SummaryRenderer`] reads the current count and the top five countries by
//! estimated value from any [`CountryStore`], renders them into a
//! fixed-layout PNG, and writes it to a well-known cache path, overwriting
//! any prior artifact.
//!
//! Generation is best-effort by contract: callers log the error variant and
//! carry on. The PNG is encoded in memory before the file is touched, so a
//! failed render leaves the previous artifact in place.

mod font;
mod render;

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use terra_core::store::{CountryStore, OrderField};

use render::render_summary;

/// How many ranked rows the artifact shows.
const TOP_N: u32 = 5;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store read failed: {0}")]
  Store(#[from] terra_core::Error),

  #[error("artifact write failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("png encoding failed: {0}")]
  Encode(#[from] image::ImageError),
}

/// Renders the summary PNG into a fixed cache location.
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
  output_path: PathBuf,
}

impl SummaryRenderer {
  pub fn new(output_path: impl Into<PathBuf>) -> Self {
    Self { output_path: output_path.into() }
  }

  /// Where the artifact lands; the image endpoint serves this path.
  pub fn output_path(&self) -> &Path {
    &self.output_path
  }

  /// Read aggregates from `store`, render, and overwrite the artifact.
  /// Returns the artifact path on success.
  pub async fn generate<S: CountryStore>(&self, store: &S) -> Result<PathBuf, Error> {
    let total = store.count().await?;
    let top = store.find_top_n(OrderField::EstimatedValue, TOP_N).await?;

    let image = render_summary(total, &top, Utc::now());

    let mut encoded = Vec::new();
    image.write_to(
      &mut std::io::Cursor::new(&mut encoded),
      image::ImageFormat::Png,
    )?;

    if let Some(parent) = self.output_path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output_path, encoded).await?;

    Ok(self.output_path.clone())
  }
}
