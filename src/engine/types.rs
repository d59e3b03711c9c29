//! Engine request and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::models::{Point, RouteMetrics, Savings, Tour};

/// Sequencing strategy.
///
/// # Examples
///
/// ```
/// use u_tour::engine::Algorithm;
///
/// let algo: Algorithm = "frontier".parse().unwrap();
/// assert_eq!(algo, Algorithm::Frontier);
/// assert_eq!(Algorithm::NearestNeighborTwoOpt.to_string(), "nearest-neighbor-2opt");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Nearest-neighbor construction refined by 2-opt.
    #[default]
    #[serde(rename = "nearest-neighbor-2opt")]
    NearestNeighborTwoOpt,
    /// Frontier expansion from the visited set.
    #[serde(rename = "frontier")]
    Frontier,
}

impl Algorithm {
    /// Both strategies, in comparison order.
    pub const ALL: [Algorithm; 2] = [Algorithm::NearestNeighborTwoOpt, Algorithm::Frontier];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::NearestNeighborTwoOpt => "nearest-neighbor-2opt",
            Algorithm::Frontier => "frontier",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RoutingError::invalid(format!("unknown algorithm '{s}'")))
    }
}

/// Whether every requested point made it into the tour, and whether the
/// tour can be driven in the order given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteStatus {
    /// All points are sequenced.
    Complete,
    /// Construction ran out of reachable points. The tour covers only the
    /// reachable ones; the rest are listed here.
    UnreachablePartial {
        /// Points left out of the tour.
        unreachable: Vec<Point>,
    },
    /// Two consecutive points of the tour have no route between them.
    ///
    /// Frontier expansion only guarantees an edge from *some* visited point,
    /// so its order can contain such a leg. No metrics exist for the tour.
    Undrivable {
        /// Start of the first leg without a route.
        from: Point,
        /// End of that leg.
        to: Point,
        /// Points left out of the tour, if construction also stopped early.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        unreachable: Vec<Point>,
    },
}

impl RouteStatus {
    pub(crate) fn from_unreachable(unreachable: Vec<Point>) -> Self {
        if unreachable.is_empty() {
            RouteStatus::Complete
        } else {
            RouteStatus::UnreachablePartial { unreachable }
        }
    }

    /// Marks the tour as blocked on the leg `from → to`, keeping any
    /// unreachable points already recorded.
    pub(crate) fn blocked(self, from: Point, to: Point) -> Self {
        let unreachable = match self {
            RouteStatus::Complete => Vec::new(),
            RouteStatus::UnreachablePartial { unreachable }
            | RouteStatus::Undrivable { unreachable, .. } => unreachable,
        };
        RouteStatus::Undrivable {
            from,
            to,
            unreachable,
        }
    }

    /// Returns `true` for [`RouteStatus::Complete`].
    pub fn is_complete(&self) -> bool {
        matches!(self, RouteStatus::Complete)
    }

    /// Returns `false` for [`RouteStatus::Undrivable`].
    pub fn is_drivable(&self) -> bool {
        !matches!(self, RouteStatus::Undrivable { .. })
    }

    /// Points missing from the tour.
    pub fn unreachable(&self) -> &[Point] {
        match self {
            RouteStatus::Complete => &[],
            RouteStatus::UnreachablePartial { unreachable }
            | RouteStatus::Undrivable { unreachable, .. } => unreachable,
        }
    }
}

/// Result of `optimize` and `reoptimize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    /// Strategy that produced the tour.
    pub algorithm: Algorithm,
    /// Sequenced tour, hub first.
    pub tour: Tour,
    /// Metrics for `tour`, fetched fresh from the oracle. `None` when the
    /// tour is [`RouteStatus::Undrivable`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RouteMetrics>,
    /// Completeness flag.
    pub status: RouteStatus,
    /// Metrics of the order the caller supplied, when computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<RouteMetrics>,
    /// Improvement over `baseline`, when both sides have metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Savings>,
}

/// One heuristic's outcome inside a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRun {
    /// Strategy measured.
    pub algorithm: Algorithm,
    /// Tour it produced.
    pub tour: Tour,
    /// Metrics for that tour, `None` when it is undrivable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RouteMetrics>,
    /// Completeness flag.
    pub status: RouteStatus,
    /// Wall-clock sequencing time in milliseconds, oracle calls excluded.
    pub compute_time_ms: f64,
}

/// Result of `compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Nearest-neighbor + 2-opt run.
    pub nearest_neighbor_two_opt: AlgorithmRun,
    /// Frontier expansion run.
    pub frontier: AlgorithmRun,
    /// Preferred strategy.
    pub recommended: Algorithm,
    /// Improvement of the recommended run over the other one, when both
    /// runs are drivable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Savings>,
}

impl ComparisonResult {
    /// The run for a given strategy.
    pub fn run(&self, algorithm: Algorithm) -> &AlgorithmRun {
        match algorithm {
            Algorithm::NearestNeighborTwoOpt => &self.nearest_neighbor_two_opt,
            Algorithm::Frontier => &self.frontier,
        }
    }

    /// The recommended run.
    pub fn recommended_run(&self) -> &AlgorithmRun {
        self.run(self.recommended)
    }
}
