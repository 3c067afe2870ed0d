//! Pooled SQLite storage layer
//!
//! Provides r2d2-based connection pooling over plain SQLite with
//! per-connection pragmas (WAL, foreign keys, busy timeout).

pub mod error;
pub mod sqlite;

pub use error::{StorageError, StorageResult};
pub use sqlite::{SqlitePool, SqlitePoolConfig};
