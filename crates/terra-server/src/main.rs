//! terra-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, wires the refresh pipeline over the two upstream HTTP sources, and
//! serves the JSON API.

mod config;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use terra_api::AppState;
use terra_fetch::{ExchangeRateSource, RestCountriesSource};
use terra_refresh::RefreshPipeline;
use terra_store_sqlite::SqliteStore;
use terra_summary::SummaryRenderer;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Terra country metadata service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let http = terra_fetch::http_client(Duration::from_secs(cfg.fetch_timeout_secs))
    .context("failed to build HTTP client")?;
  let countries = RestCountriesSource::new(http.clone(), cfg.countries_url.clone());
  let rates = ExchangeRateSource::new(http, cfg.rates_url.clone());

  let summary = SummaryRenderer::new(&cfg.summary_path);
  let summary_path = summary.output_path().to_path_buf();
  let pipeline = RefreshPipeline::new(countries, rates, store.clone(), summary);

  let state = AppState {
    store,
    pipeline: Arc::new(pipeline),
    summary_path,
  };

  let app = terra_api::api_router(state).layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", cfg.host, cfg.port);
  tracing::info!("listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
