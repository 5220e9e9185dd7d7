use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use opina_types::{MAX_RATING, MIN_RATING};

use super::trait_::Aggregator;
use crate::error::AggregationError;

/// Accumulator for distribution aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionAccumulator {
    buckets: [u64; 5],
}

/// Distribution aggregator - counts records per rating value
///
/// Finalizes to the five-bucket histogram with explicit zeros for empty
/// buckets, keyed by rating value 1..=5.
#[derive(Debug, Clone, Default)]
pub struct DistributionAggregator {
    buckets: [u64; 5],
}

impl DistributionAggregator {
    /// Create a new distribution aggregator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for DistributionAggregator {
    type Output = BTreeMap<u8, u64>;
    type Accumulator = DistributionAccumulator;

    fn update(&mut self, rating: u8) -> Result<(), AggregationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AggregationError::RatingOutOfRange { rating });
        }
        self.buckets[usize::from(rating - MIN_RATING)] += 1;
        Ok(())
    }

    fn finalize(&self) -> BTreeMap<u8, u64> {
        (MIN_RATING..=MAX_RATING)
            .map(|rating| (rating, self.buckets[usize::from(rating - MIN_RATING)]))
            .collect()
    }

    fn accumulator(&self) -> DistributionAccumulator {
        DistributionAccumulator {
            buckets: self.buckets,
        }
    }

    fn merge(&mut self, other: DistributionAccumulator) {
        for (bucket, extra) in self.buckets.iter_mut().zip(other.buckets) {
            *bucket += extra;
        }
    }

    fn reset(&mut self) {
        self.buckets = [0; 5];
    }

    fn count(&self) -> u64 {
        self.buckets.iter().sum()
    }
}
