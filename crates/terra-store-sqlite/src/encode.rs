//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings. A row that fails to decode surfaces as
//! [`Error::Persistence`](terra_core::Error::Persistence) — the table is the
//! only writer's responsibility, so corruption there is a store-level fault.

use chrono::{DateTime, Utc};
use terra_core::{country::CountryRecord, Error, Result};
use uuid::Uuid;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(Error::persistence)
}

/// One `countries` row as it comes off the wire, still stringly typed.
pub struct RawRow {
  pub id:                String,
  pub name:              String,
  pub capital:           Option<String>,
  pub region:            String,
  pub population:        i64,
  pub currency_code:     Option<String>,
  pub exchange_rate:     Option<f64>,
  pub estimated_value:   f64,
  pub flag_url:          Option<String>,
  pub last_refreshed_at: String,
}

impl RawRow {
  /// Column list matching the field order of [`RawRow::from_row`].
  pub const COLUMNS: &'static str = "id, name, capital, region, population, \
     currency_code, exchange_rate, estimated_value, flag_url, last_refreshed_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawRow {
      id:                row.get(0)?,
      name:              row.get(1)?,
      capital:           row.get(2)?,
      region:            row.get(3)?,
      population:        row.get(4)?,
      currency_code:     row.get(5)?,
      exchange_rate:     row.get(6)?,
      estimated_value:   row.get(7)?,
      flag_url:          row.get(8)?,
      last_refreshed_at: row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<CountryRecord> {
    Ok(CountryRecord {
      id:                Uuid::parse_str(&self.id).map_err(Error::persistence)?,
      name:              self.name,
      capital:           self.capital,
      region:            self.region,
      population:        u64::try_from(self.population).unwrap_or(0),
      currency_code:     self.currency_code,
      exchange_rate:     self.exchange_rate,
      estimated_value:   self.estimated_value,
      flag_url:          self.flag_url,
      last_refreshed_at: decode_dt(&self.last_refreshed_at)?,
    })
  }
}
