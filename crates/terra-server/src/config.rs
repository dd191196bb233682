//! Server configuration.
//!
//! Read once at startup from an optional TOML file plus `TERRA_*`
//! environment overrides; every key has a hardcoded fallback so the binary
//! runs with no configuration at all.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use terra_fetch::{DEFAULT_COUNTRIES_URL, DEFAULT_RATES_URL};

/// Runtime server configuration.
///
/// | option | default |
/// |---|---|
/// | `host` | `127.0.0.1` |
/// | `port` | `8080` |
/// | `store_path` | `terra.db` |
/// | `summary_path` | `cache/summary.png` |
/// | `countries_url` | REST Countries v2 `all` endpoint |
/// | `rates_url` | open.er-api.com USD latest |
/// | `fetch_timeout_secs` | `10` |
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  pub summary_path:       PathBuf,
  pub countries_url:      String,
  pub rates_url:          String,
  pub fetch_timeout_secs: u64,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the environment, over the defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080_i64)?
      .set_default("store_path", "terra.db")?
      .set_default("summary_path", "cache/summary.png")?
      .set_default("countries_url", DEFAULT_COUNTRIES_URL)?
      .set_default("rates_url", DEFAULT_RATES_URL)?
      .set_default("fetch_timeout_secs", 10_i64)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("TERRA"))
      .build()?;

    Ok(settings.try_deserialize()?)
  }
}
