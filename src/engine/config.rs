//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::local_search::TwoOptConfig;
use crate::models::FuelModel;

/// Configuration for [`RouteEngine`](super::RouteEngine).
///
/// Deserializes from JSON with every field optional.
///
/// # Examples
///
/// ```
/// use u_tour::engine::EngineConfig;
/// use u_tour::local_search::TwoOptConfig;
///
/// let config = EngineConfig::default()
///     .with_two_opt(TwoOptConfig::default().with_max_passes(50))
///     .with_return_to_hub(true);
/// assert_eq!(config.two_opt.max_passes, 50);
///
/// let json = r#"{ "prefer_frontier_on_tie": true }"#;
/// let parsed: EngineConfig = serde_json::from_str(json).unwrap();
/// assert!(parsed.prefer_frontier_on_tie);
/// assert_eq!(parsed.two_opt.max_passes, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 2-opt pass cap. The `closed` flag is set by the engine from
    /// `return_to_hub`.
    pub two_opt: TwoOptConfig,

    /// Fuel model for derived metrics.
    pub fuel: FuelModel,

    /// Drive back to the hub after the last stop.
    pub return_to_hub: bool,

    /// On an exact distance tie, recommend frontier expansion instead of
    /// nearest-neighbor + 2-opt.
    pub prefer_frontier_on_tie: bool,

    /// Evaluate the caller's own order too, to report savings.
    pub compute_baseline: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            two_opt: TwoOptConfig::default(),
            fuel: FuelModel::default(),
            return_to_hub: false,
            prefer_frontier_on_tie: false,
            compute_baseline: true,
        }
    }
}

impl EngineConfig {
    pub fn with_two_opt(mut self, two_opt: TwoOptConfig) -> Self {
        self.two_opt = two_opt;
        self
    }

    pub fn with_fuel(mut self, fuel: FuelModel) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn with_return_to_hub(mut self, returns: bool) -> Self {
        self.return_to_hub = returns;
        self
    }

    pub fn with_prefer_frontier_on_tie(mut self, prefer: bool) -> Self {
        self.prefer_frontier_on_tie = prefer;
        self
    }

    pub fn with_compute_baseline(mut self, compute: bool) -> Self {
        self.compute_baseline = compute;
        self
    }
}
