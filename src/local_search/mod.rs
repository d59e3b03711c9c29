//! Local search operators for improving a visiting order.
//!
//! - [`two_opt_improve`] — First-improvement 2-opt segment reversal

mod two_opt;

pub use two_opt::{path_cost, two_opt_improve, TwoOptConfig, TwoOptResult};
