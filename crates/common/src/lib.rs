//! Shared infrastructure plumbing for CampusCal crates.
//!
//! Currently this is the pooled SQLite storage layer: connection pool,
//! per-connection pragma management, and the storage error type. Domain
//! logic never lives here.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod storage;

pub use storage::{SqlitePool, SqlitePoolConfig, StorageError, StorageResult};
