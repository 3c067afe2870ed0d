//! Recommendation engine and its persistence contract

pub mod ports;
mod service;

pub use service::RecommendationService;
