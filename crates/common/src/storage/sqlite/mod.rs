//! SQLite connection pooling

pub mod config;
pub mod pool;
pub mod pragmas;

pub use config::SqlitePoolConfig;
pub use pool::{PooledSqliteConnection, SqlitePool};
