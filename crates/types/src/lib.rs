//! Core types and data models for the opina feedback pipeline
//!
//! This crate provides the fundamental data structures shared by the
//! collector, processor, store and auth crates.

pub mod records;
pub mod session;

pub use records::{FeedbackRecord, FeedbackStats, NewFeedback, MAX_RATING, MIN_RATING};
pub use session::Session;
