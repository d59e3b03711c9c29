//! Route metrics computation.

mod calculator;

pub use calculator::MetricsCalculator;
