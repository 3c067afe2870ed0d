//! # CampusCal Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Interval model, overlap predicate, and the standard slot grid
//! - The three conflict detectors (venue, building, recurring series)
//! - The recommendation engine and its persistence contract
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `campuscal-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod conflicts;
pub mod recommendations;
pub mod schedule;

// Re-export specific items to avoid ambiguity
pub use conflicts::ports::EventRepository;
pub use conflicts::{building_key, ConflictDetector};
pub use recommendations::ports::RecommendationRepository;
pub use recommendations::RecommendationService;
pub use schedule::{event_interval, free_slots, overlaps};
