//! Request outcomes, aggregation, and histogram utilities.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::AggregateStats;
pub use histogram::{LatencyHistogram, LatencyPercentiles};
pub use types::{FailureCategory, RequestOutcome};
