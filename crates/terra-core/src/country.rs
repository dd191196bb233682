//! Country records — the raw upstream shape and the persisted row.
//!
//! `RawCountry` mirrors the reference API's response. `CountryRecord` is the
//! merged row after the transformer has joined in exchange-rate data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Currency-code → rate relative to the fixed base currency.
pub type RateTable = HashMap<String, f64>;

/// A country row as persisted and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
  /// Surrogate id, assigned on insert and never changed by updates.
  pub id:                Uuid,
  /// Natural de-duplication key. Upsert lookup is exact and case-sensitive;
  /// search and delete match case-insensitive substrings.
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            String,
  pub population:        u64,
  /// First entry of the upstream currency list, if any.
  pub currency_code:     Option<String>,
  /// Present only when `currency_code` is present and mapped in the rate
  /// table at refresh time.
  pub exchange_rate:     Option<f64>,
  /// Derived economic proxy; 0 unless population and a positive rate were
  /// both available. Recomputed wholesale on every refresh.
  pub estimated_value:   f64,
  pub flag_url:          Option<String>,
  /// Set by the store on every write, insert or update.
  pub last_refreshed_at: DateTime<Utc>,
}

/// Field values for an upsert. `id` and `last_refreshed_at` are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountry {
  pub name:            String,
  pub capital:         Option<String>,
  pub region:          String,
  pub population:      u64,
  pub currency_code:   Option<String>,
  pub exchange_rate:   Option<f64>,
  pub estimated_value: f64,
  pub flag_url:        Option<String>,
}

/// One raw country from the upstream reference API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
  pub name:       String,
  #[serde(default)]
  pub capital:    Option<String>,
  #[serde(default)]
  pub region:     Option<String>,
  #[serde(default, deserialize_with = "lenient_population")]
  pub population: u64,
  #[serde(default, rename = "flag")]
  pub flag_url:   Option<String>,
  #[serde(default)]
  pub currencies: Vec<RawCurrency>,
}

/// One entry of the upstream currency list. Only `code` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrency {
  pub code:   String,
  #[serde(default)]
  pub name:   Option<String>,
  #[serde(default)]
  pub symbol: Option<String>,
}

/// Upstream population values are occasionally missing, stringly typed, or
/// otherwise junk. Anything that does not resolve to a non-negative integer
/// becomes 0 rather than failing the whole refresh.
fn lenient_population<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  Ok(match value {
    serde_json::Value::Number(n) => n
      .as_u64()
      .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
      .unwrap_or(0),
    serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
    _ => 0,
  })
}
