//! Common data types used throughout the application

pub mod conflict;
pub mod event;
pub mod recommendation;
pub mod schedule;

pub use conflict::{
    BuildingConflict, ConflictParticipant, ConflictRecord, ConflictReport, ConflictSummary,
    RecurringTimingConflict, VenueConflict,
};
pub use event::Event;
pub use recommendation::{ConflictType, Recommendation, RecommendationStats, Severity};
pub use schedule::{SlotSuggestion, TimeInterval};
