//! SQL schema for the Terra SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `name` carries the default BINARY collation, so the UNIQUE constraint and
/// the upsert lookup are case-sensitive — matching the upsert contract in
/// `terra_core::store`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS countries (
    id                 TEXT PRIMARY KEY,
    name               TEXT NOT NULL UNIQUE,
    capital            TEXT,
    region             TEXT NOT NULL DEFAULT 'Unknown',
    population         INTEGER NOT NULL DEFAULT 0,
    currency_code      TEXT,
    exchange_rate      REAL,
    estimated_value    REAL NOT NULL DEFAULT 0,
    flag_url           TEXT,
    last_refreshed_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS countries_estimate_idx ON countries(estimated_value);

PRAGMA user_version = 1;
";
