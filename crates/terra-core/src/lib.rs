//! Core types and trait definitions for the Terra country service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod country;
pub mod error;
pub mod source;
pub mod store;
pub mod transform;

pub use error::{Error, FetchSource, Result};
