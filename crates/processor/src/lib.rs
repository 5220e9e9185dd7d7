//! Snapshot aggregation and the live feedback feed
//!
//! This crate owns the read side of the opina pipeline: it decodes store
//! snapshots into feedback records, orders them newest-first, computes
//! summary statistics, and runs the worker that keeps a live view in step
//! with the authenticated session and the store subscription.

pub mod aggregation;
pub mod error;
pub mod feed;
pub mod snapshot;

pub use aggregation::{Aggregator, AverageAggregator, DistributionAggregator};
pub use error::AggregationError;
pub use feed::FeedbackFeed;
pub use snapshot::{aggregate, decode_document, FeedbackView};
