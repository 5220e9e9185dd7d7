//! Error types for aggregation

use thiserror::Error;

use opina_types::{MAX_RATING, MIN_RATING};

/// Errors raised while folding ratings into an aggregate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {
    /// Rating outside the valid scale reached an aggregator. The validator
    /// keeps such input away from the store, so seeing this means the
    /// snapshot contains foreign data.
    #[error("rating {rating} outside valid range [{MIN_RATING}, {MAX_RATING}]")]
    RatingOutOfRange { rating: u8 },
}
