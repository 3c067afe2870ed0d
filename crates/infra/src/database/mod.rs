//! SQLite-backed implementations of the core repository ports

pub mod event_repository;
pub mod manager;
pub mod recommendation_repository;

pub use event_repository::SqliteEventRepository;
pub use manager::DbManager;
pub use recommendation_repository::SqliteRecommendationRepository;
