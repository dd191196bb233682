//! The `CountryStore` trait.
//!
//! Implemented by storage backends (e.g. `terra-store-sqlite`). The refresh
//! pipeline, the summary renderer, and the API depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{country::{CountryRecord, NewCountry}, error::Result};

/// Column to order by in [`CountryStore::find_top_n`]. A closed enum rather
/// than a field-name string so callers cannot inject ORDER BY clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
  EstimatedValue,
  Population,
  Name,
}

/// Abstraction over the single-table country store.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes (tokio with `axum`).
pub trait CountryStore: Send + Sync {
  /// Update-if-exists-else-insert, keyed by exact country name.
  ///
  /// The existence lookup is case-sensitive, while search and delete below
  /// are not. Upstream records differing only in case therefore land as
  /// separate rows; this mismatch is inherited behavior, kept deliberately.
  ///
  /// On update the existing `id` is untouched; either way
  /// `last_refreshed_at` is set to now. Returns the persisted row.
  fn upsert_by_name(
    &self,
    record: NewCountry,
  ) -> impl Future<Output = Result<CountryRecord>> + Send + '_;

  /// All stored records, in unspecified order.
  fn find_all(&self) -> impl Future<Output = Result<Vec<CountryRecord>>> + Send + '_;

  /// Case-insensitive substring match on `name`.
  ///
  /// The term is not escaped before it reaches SQL `LIKE`, so `%` and `_`
  /// act as wildcards (`%` matches every row). Inherited behavior, kept
  /// deliberately.
  ///
  /// Fails with [`Error::Validation`](crate::Error::Validation) when `query`
  /// is empty or whitespace, and with
  /// [`Error::NotFound`](crate::Error::NotFound) when nothing matches.
  fn find_by_name_contains<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<CountryRecord>>> + Send + 'a;

  /// Delete every case-insensitive substring match and return how many rows
  /// went. Same validation, not-found, and wildcard rules as
  /// [`find_by_name_contains`](Self::find_by_name_contains) — a `%` term
  /// deletes everything. Irreversible; there is no soft delete.
  fn delete_by_name_contains<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<u64>> + Send + 'a;

  fn count(&self) -> impl Future<Output = Result<u64>> + Send + '_;

  /// Top `n` records ordered by `field`, descending.
  fn find_top_n(
    &self,
    field: OrderField,
    n: u32,
  ) -> impl Future<Output = Result<Vec<CountryRecord>>> + Send + '_;

  /// The most recent `last_refreshed_at` across all rows, or `None` when the
  /// table is empty.
  fn last_refreshed_at(
    &self,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>>> + Send + '_;
}
