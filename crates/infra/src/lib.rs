//! # CampusCal Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite implementations of the event and recommendation repositories
//! - Database schema management
//! - Configuration loading (environment variables with file fallback)
//!
//! ## Architecture
//! - Implements traits defined in `campuscal-core`
//! - Depends on `campuscal-common`, `campuscal-domain`, `campuscal-core`
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::{DbManager, SqliteEventRepository, SqliteRecommendationRepository};
pub use errors::InfraError;
