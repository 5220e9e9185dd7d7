//! Rating aggregation primitives
//!
//! Incremental aggregators over the 1..=5 rating scale, with mergeable
//! accumulators so partial aggregates can be combined. Full recomputation
//! per snapshot is the norm here; the incremental shape exists so a single
//! pass can feed several aggregates at once.

pub mod average;
pub mod distribution;
pub mod trait_;

pub use average::AverageAggregator;
pub use distribution::DistributionAggregator;
pub use trait_::Aggregator;
