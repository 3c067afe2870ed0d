//! Interval model, overlap predicate, and the standard slot grid

pub mod interval;
pub mod slot_grid;

pub use interval::{event_interval, overlaps};
pub use slot_grid::free_slots;
