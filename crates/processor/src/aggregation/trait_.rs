use serde::{de::DeserializeOwned, Serialize};

use crate::error::AggregationError;

/// Core trait for rating aggregators
///
/// Aggregators fold ratings in one at a time and expose a serializable
/// accumulator so independent partial aggregates can be merged.
pub trait Aggregator: Send + Sync + std::fmt::Debug {
    /// The type of the final aggregation result.
    type Output;

    /// The internal accumulator state (serializable for merging).
    type Accumulator: Clone + Serialize + DeserializeOwned;

    /// Fold in one rating. Rejects ratings outside `[1, 5]` without
    /// mutating any state.
    fn update(&mut self, rating: u8) -> Result<(), AggregationError>;

    /// Compute the aggregation result over everything folded in so far.
    fn finalize(&self) -> Self::Output;

    /// The current accumulator state.
    fn accumulator(&self) -> Self::Accumulator;

    /// Merge another accumulator into this one.
    fn merge(&mut self, other: Self::Accumulator);

    /// Reset to the initial state.
    fn reset(&mut self);

    /// Number of ratings folded in so far.
    fn count(&self) -> u64;

    /// Whether any ratings have been folded in.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
