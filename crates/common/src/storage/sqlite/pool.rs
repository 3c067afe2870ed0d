//! SQLite connection pool
//!
//! Provides r2d2-based connection pooling for SQLite databases.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::config::SqlitePoolConfig;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};

/// A connection checked out of the pool.
pub type PooledSqliteConnection = PooledConnection<SqliteConnectionManager>;

/// SQLite connection pool
///
/// Manages a pool of SQLite connections using r2d2. Every connection gets
/// the configured pragmas applied before first use (WAL, NORMAL
/// synchronous, foreign keys, busy timeout).
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
}

impl SqlitePool {
    /// Create a new connection pool for the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database file can't be accessed or pool
    /// creation fails.
    #[instrument(fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        info!("Creating SQLite connection pool");

        let pool_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pool_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                StorageError::Connection(format!("Failed to create pool: {}", e))
            })?;

        // Check out one connection up front so a bad path fails loudly here
        // instead of on first query.
        {
            let conn = pool.get().map_err(|e| {
                warn!("Failed to get test connection: {}", e);
                StorageError::Connection(format!("Failed to get test connection: {}", e))
            })?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))?;
            debug!("Pool connectivity verified");
        }

        Ok(Self { pool, config })
    }

    /// Acquire a connection from the pool.
    ///
    /// # Errors
    /// Returns `StorageError::Timeout` when the pool is saturated past the
    /// configured connection timeout.
    pub fn get(&self) -> StorageResult<PooledSqliteConnection> {
        self.pool.get().map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("timed out") {
                StorageError::Timeout(self.config.connection_timeout.as_secs())
            } else {
                StorageError::Connection(format!("Failed to get connection: {}", e))
            }
        })
    }

    /// Verify database connectivity with a trivial query.
    pub fn health_check(&self) -> StorageResult<()> {
        let conn = self.get()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))?;
        Ok(())
    }

    /// Number of idle connections currently held by the pool.
    pub fn idle_connections(&self) -> u32 {
        self.pool.state().idle_connections
    }

    /// Configured maximum pool size.
    pub fn max_size(&self) -> u32 {
        self.config.max_size
    }
}
