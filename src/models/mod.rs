//! Domain model types for route sequencing.
//!
//! Provides the per-request entities: points to visit, the tour that orders
//! them, and the metrics computed for a tour.

mod metrics;
mod point;
mod tour;

pub use metrics::{CongestionLevel, FuelModel, LegMetrics, RouteMetrics, Savings};
pub(crate) use point::validate_all;
pub use point::Point;
pub use tour::Tour;
