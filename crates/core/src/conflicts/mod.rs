//! Conflict detection over upcoming events

pub mod ports;
mod service;

pub use service::{building_key, ConflictDetector};
