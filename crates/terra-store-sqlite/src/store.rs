//! [`SqliteStore`] — the SQLite implementation of [`CountryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use terra_core::{
  country::{CountryRecord, NewCountry},
  store::{CountryStore, OrderField},
  Error, Result,
};

use crate::{
  encode::{decode_dt, encode_dt, encode_uuid, RawRow},
  schema::SCHEMA,
};

fn db_err(e: tokio_rusqlite::Error) -> Error { Error::persistence(e) }

/// Reject empty or whitespace-only search/delete terms before touching SQL.
fn validate_query(query: &str) -> Result<()> {
  if query.trim().is_empty() {
    return Err(Error::Validation(
      "search term must be a non-empty string".to_owned(),
    ));
  }
  Ok(())
}

fn order_column(field: OrderField) -> &'static str {
  match field {
    OrderField::EstimatedValue => "estimated_value",
    OrderField::Population => "population",
    OrderField::Name => "name",
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Terra country store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await.map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  /// Run a SELECT returning whole rows and decode them.
  async fn select_rows(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<CountryRecord>> {
    let raws: Vec<RawRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawRow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawRow::into_record).collect()
  }
}

// ─── CountryStore impl ───────────────────────────────────────────────────────

impl CountryStore for SqliteStore {
  async fn upsert_by_name(&self, record: NewCountry) -> Result<CountryRecord> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let fresh_id = Uuid::new_v4();
    let fresh_id_str = encode_uuid(fresh_id);

    let NewCountry {
      name,
      capital,
      region,
      population,
      currency_code,
      exchange_rate,
      estimated_value,
      flag_url,
    } = record.clone();
    let population_i64 = i64::try_from(population).unwrap_or(i64::MAX);

    // The existence check is exact-match and case-sensitive (BINARY
    // collation); see the trait docs for the resulting duplicate-row quirk.
    let existing_id: Option<String> = self
      .conn
      .call(move |conn| {
        let existing: Option<String> = conn
          .query_row(
            "SELECT id FROM countries WHERE name = ?1",
            rusqlite::params![name],
            |row| row.get(0),
          )
          .optional()?;

        match &existing {
          Some(id) => {
            conn.execute(
              "UPDATE countries SET
                 capital = ?1, region = ?2, population = ?3,
                 currency_code = ?4, exchange_rate = ?5,
                 estimated_value = ?6, flag_url = ?7, last_refreshed_at = ?8
               WHERE id = ?9",
              rusqlite::params![
                capital,
                region,
                population_i64,
                currency_code,
                exchange_rate,
                estimated_value,
                flag_url,
                now_str,
                id,
              ],
            )?;
          }
          None => {
            conn.execute(
              "INSERT INTO countries (
                 id, name, capital, region, population,
                 currency_code, exchange_rate, estimated_value,
                 flag_url, last_refreshed_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
              rusqlite::params![
                fresh_id_str,
                name,
                capital,
                region,
                population_i64,
                currency_code,
                exchange_rate,
                estimated_value,
                flag_url,
                now_str,
              ],
            )?;
          }
        }

        Ok(existing)
      })
      .await
      .map_err(db_err)?;

    let id = match existing_id {
      Some(s) => Uuid::parse_str(&s).map_err(Error::persistence)?,
      None => fresh_id,
    };

    Ok(CountryRecord {
      id,
      name:              record.name,
      capital:           record.capital,
      region:            record.region,
      population:        record.population,
      currency_code:     record.currency_code,
      exchange_rate:     record.exchange_rate,
      estimated_value:   record.estimated_value,
      flag_url:          record.flag_url,
      last_refreshed_at: now,
    })
  }

  async fn find_all(&self) -> Result<Vec<CountryRecord>> {
    self
      .select_rows(
        format!("SELECT {} FROM countries", RawRow::COLUMNS),
        vec![],
      )
      .await
  }

  async fn find_by_name_contains<'a>(
    &'a self,
    query: &'a str,
  ) -> Result<Vec<CountryRecord>> {
    validate_query(query)?;

    // SQLite's LIKE folds case for ASCII only; non-ASCII letters compare
    // case-sensitively. Wildcards in `query` pass through, per the trait.
    let pattern = format!("%{query}%");
    let matches = self
      .select_rows(
        format!(
          "SELECT {} FROM countries WHERE name LIKE ?1",
          RawRow::COLUMNS
        ),
        vec![pattern],
      )
      .await?;

    if matches.is_empty() {
      return Err(Error::NotFound(query.to_owned()));
    }
    Ok(matches)
  }

  async fn delete_by_name_contains<'a>(&'a self, query: &'a str) -> Result<u64> {
    validate_query(query)?;

    let pattern = format!("%{query}%");
    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM countries WHERE name LIKE ?1",
          rusqlite::params![pattern],
        )?)
      })
      .await
      .map_err(db_err)?;

    if deleted == 0 {
      return Err(Error::NotFound(query.to_owned()));
    }
    Ok(deleted as u64)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?)
      })
      .await
      .map_err(db_err)?;
    Ok(n as u64)
  }

  async fn find_top_n(&self, field: OrderField, n: u32) -> Result<Vec<CountryRecord>> {
    self
      .select_rows(
        format!(
          "SELECT {} FROM countries ORDER BY {} DESC LIMIT {n}",
          RawRow::COLUMNS,
          order_column(field),
        ),
        vec![],
      )
      .await
  }

  async fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>> {
    let latest: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT MAX(last_refreshed_at) FROM countries",
          [],
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(db_err)?;

    latest.as_deref().map(decode_dt).transpose()
  }
}
