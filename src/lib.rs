//! # u-tour
//!
//! Single-vehicle delivery route sequencing: start at a hub, visit every
//! delivery point, optionally return, and keep total travel short.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Tour, RouteMetrics, Savings)
//! - [`distance`] — Directed travel matrix, oracle trait, caching, provider parsing
//! - [`constructive`] — Constructive heuristics (Nearest Neighbor, Frontier Expansion)
//! - [`local_search`] — Local search operators (2-opt)
//! - [`evaluation`] — Route metrics from fresh oracle calls
//! - [`engine`] — Optimize, reoptimize, compare, and metrics entry points
//! - [`error`] — Error types

pub mod constructive;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
