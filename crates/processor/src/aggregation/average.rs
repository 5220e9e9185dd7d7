use serde::{Deserialize, Serialize};

use opina_types::{MAX_RATING, MIN_RATING};

use super::trait_::Aggregator;
use crate::error::AggregationError;

/// Accumulator for average aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AverageAccumulator {
    sum: u64,
    count: u64,
}

/// Average aggregator - computes the mean rating
///
/// The empty aggregate finalizes to `0.0`, matching the definition of
/// `average` for an empty feedback view.
///
/// # Examples
///
/// ```
/// use processor::{Aggregator, AverageAggregator};
///
/// let mut agg = AverageAggregator::new();
/// agg.update(2).unwrap();
/// agg.update(4).unwrap();
///
/// assert_eq!(agg.finalize(), 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AverageAggregator {
    sum: u64,
    count: u64,
}

impl AverageAggregator {
    /// Create a new average aggregator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregator for AverageAggregator {
    type Output = f64;
    type Accumulator = AverageAccumulator;

    fn update(&mut self, rating: u8) -> Result<(), AggregationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AggregationError::RatingOutOfRange { rating });
        }
        self.sum += u64::from(rating);
        self.count += 1;
        Ok(())
    }

    fn finalize(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    fn accumulator(&self) -> AverageAccumulator {
        AverageAccumulator {
            sum: self.sum,
            count: self.count,
        }
    }

    fn merge(&mut self, other: AverageAccumulator) {
        self.sum += other.sum;
        self.count += other.count;
    }

    fn reset(&mut self) {
        self.sum = 0;
        self.count = 0;
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_average_is_zero() {
        let agg = AverageAggregator::new();
        assert!(agg.is_empty());
        assert_eq!(agg.finalize(), 0.0);
    }

    #[test]
    fn average_is_sum_over_count() {
        let mut agg = AverageAggregator::new();
        for rating in [1, 2, 3, 4, 5] {
            agg.update(rating).unwrap();
        }
        assert_eq!(agg.count(), 5);
        assert_eq!(agg.finalize(), 3.0);
    }

    #[test]
    fn out_of_range_rating_leaves_state_untouched() {
        let mut agg = AverageAggregator::new();
        agg.update(5).unwrap();

        assert_eq!(
            agg.update(0),
            Err(AggregationError::RatingOutOfRange { rating: 0 })
        );
        assert_eq!(
            agg.update(6),
            Err(AggregationError::RatingOutOfRange { rating: 6 })
        );
        assert_eq!(agg.count(), 1);
        assert_eq!(agg.finalize(), 5.0);
    }

    #[test]
    fn merge_combines_partial_aggregates() {
        let mut left = AverageAggregator::new();
        left.update(1).unwrap();
        left.update(2).unwrap();

        let mut right = AverageAggregator::new();
        right.update(5).unwrap();
        right.update(4).unwrap();

        left.merge(right.accumulator());
        assert_eq!(left.count(), 4);
        assert_eq!(left.finalize(), 3.0);
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut agg = AverageAggregator::new();
        agg.update(3).unwrap();
        agg.reset();
        assert!(agg.is_empty());
        assert_eq!(agg.finalize(), 0.0);
    }
}
