//! Route sequencing engine.
//!
//! [`RouteEngine`] ties the oracle, the heuristics, and the metrics
//! calculator together behind four operations:
//!
//! - [`RouteEngine::optimize`] — sequence a hub plus delivery points
//! - [`RouteEngine::reoptimize`] — resequence the untraveled part of a tour
//! - [`RouteEngine::compare`] — run both heuristics on the same input
//! - [`RouteEngine::metrics`] — evaluate a tour as given
//!
//! Every call is independent and keeps no state between invocations.
//! Heuristic work is CPU-bound; only oracle calls may block.

mod compare;
mod config;
mod reoptimize;
mod types;

pub use config::EngineConfig;
pub use types::{Algorithm, AlgorithmRun, ComparisonResult, OptimizedRoute, RouteStatus};

use crate::constructive::{frontier_expansion, nearest_neighbor, Construction};
use crate::distance::{request_matrix, DistanceOracle, TravelMatrix};
use crate::error::{OracleError, Result, RoutingError};
use crate::evaluation::MetricsCalculator;
use crate::local_search::{two_opt_improve, TwoOptConfig};
use crate::models::{validate_all, Point, RouteMetrics, Savings, Tour};

/// Sequencing engine over a [`DistanceOracle`].
///
/// # Examples
///
/// ```
/// use u_tour::distance::{TableOracle, TravelMatrix};
/// use u_tour::engine::{Algorithm, RouteEngine};
/// use u_tour::models::Point;
///
/// let hub = Point::new(0.0, 0.0).with_id("hub");
/// let a = Point::new(0.0, 0.01).with_id("a");
/// let b = Point::new(0.0, 0.02).with_id("b");
/// let c = Point::new(0.0, 0.03).with_id("c");
///
/// let dm = TravelMatrix::from_distances(4, vec![
///     0.0, 1000.0, 2000.0, 3000.0,
///     1000.0, 0.0, 1000.0, 2000.0,
///     2000.0, 1000.0, 0.0, 1000.0,
///     3000.0, 2000.0, 1000.0, 0.0,
/// ]).unwrap();
/// let oracle = TableOracle::new(vec![hub.clone(), a.clone(), b.clone(), c.clone()], dm).unwrap();
/// let engine = RouteEngine::new(oracle);
///
/// let route = engine
///     .optimize(&hub, &[c.clone(), a.clone(), b.clone()], Algorithm::NearestNeighborTwoOpt, false)
///     .unwrap();
/// let ids: Vec<_> = route.tour.points().iter().filter_map(|p| p.id()).collect();
/// assert_eq!(ids, vec!["hub", "a", "b", "c"]);
/// let metrics = route.metrics.as_ref().unwrap();
/// assert!((metrics.total_distance_km() - 3.0).abs() < 1e-10);
/// assert!(route.status.is_complete());
/// ```
#[derive(Debug)]
pub struct RouteEngine<O> {
    oracle: O,
    config: EngineConfig,
}

impl<O: DistanceOracle> RouteEngine<O> {
    /// Creates an engine with the default configuration.
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(oracle: O, config: EngineConfig) -> Self {
        Self { oracle, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The oracle consulted for travel costs.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Sequences `stops` starting from `start`.
    ///
    /// Fails with [`RoutingError::InvalidInput`] if `stops` is empty or any
    /// coordinate is malformed, and with [`RoutingError::Oracle`] if the
    /// oracle fails. Points that cannot be reached are reported through
    /// [`RouteStatus::UnreachablePartial`], not as an error.
    pub fn optimize(
        &self,
        start: &Point,
        stops: &[Point],
        algorithm: Algorithm,
        traffic_aware: bool,
    ) -> Result<OptimizedRoute> {
        if stops.is_empty() {
            return Err(RoutingError::invalid("at least one delivery point is required"));
        }
        let points = with_hub(start, stops);
        validate_all(&points)?;

        log::info!(
            "engine.optimize: start algorithm={} stops={} traffic={}",
            algorithm,
            stops.len(),
            traffic_aware
        );

        let matrix = request_matrix(&self.oracle, &points, traffic_aware)?;
        let built = self.sequence(&matrix, algorithm, self.config.return_to_hub);
        let (tour, status) = self.resolve(&points, built, self.config.return_to_hub);
        let (metrics, status) = self.drive(&tour, status, traffic_aware)?;

        let baseline_tour = Tour::new(points).with_return_to_hub(self.config.return_to_hub);
        let (baseline, savings) =
            self.baseline(&baseline_tour, metrics.as_ref(), traffic_aware)?;

        log::info!(
            "engine.optimize: done algorithm={} visited={} km={:.3} complete={} drivable={}",
            algorithm,
            tour.len(),
            metrics.as_ref().map_or(f64::INFINITY, RouteMetrics::total_distance_km),
            status.is_complete(),
            status.is_drivable()
        );

        Ok(OptimizedRoute {
            algorithm,
            tour,
            metrics,
            status,
            baseline,
            savings,
        })
    }

    /// Computes metrics for `tour` exactly as ordered, with a fresh oracle
    /// call over the driven sequence.
    pub fn metrics(&self, tour: &Tour, traffic_aware: bool) -> Result<RouteMetrics> {
        validate_all(tour.points())?;
        MetricsCalculator::new(&self.oracle, self.config.fuel).evaluate(tour, traffic_aware)
    }

    /// Runs one heuristic over a matrix whose index 0 is the start.
    fn sequence(&self, matrix: &TravelMatrix, algorithm: Algorithm, closed: bool) -> Construction {
        match algorithm {
            Algorithm::NearestNeighborTwoOpt => {
                let built = nearest_neighbor(matrix, 0);
                let config = self.two_opt_config(closed);
                let improved = two_opt_improve(&built.order, matrix, &config);
                log::debug!(
                    "engine.sequence: two_opt passes={} moves={} cost={:.3}",
                    improved.passes,
                    improved.moves,
                    improved.cost
                );
                Construction {
                    order: improved.order,
                    unreachable: built.unreachable,
                }
            }
            Algorithm::Frontier => frontier_expansion(matrix, 0),
        }
    }

    fn two_opt_config(&self, closed: bool) -> TwoOptConfig {
        self.config.two_opt.with_closed(closed)
    }

    /// Maps a construction back onto points.
    fn resolve(
        &self,
        points: &[Point],
        built: Construction,
        returns_to_hub: bool,
    ) -> (Tour, RouteStatus) {
        let tour = Tour::from_order(points, &built.order).with_return_to_hub(returns_to_hub);
        let unreachable: Vec<Point> = built
            .unreachable
            .iter()
            .map(|&i| points[i].clone())
            .collect();
        if !unreachable.is_empty() {
            log::warn!(
                "engine.sequence: partial tour visited={} unreachable={}",
                tour.len(),
                unreachable.len()
            );
        }
        (tour, RouteStatus::from_unreachable(unreachable))
    }

    /// Evaluates a sequenced tour.
    ///
    /// A consecutive leg without a route marks the tour undrivable instead
    /// of failing the call; every other error is propagated.
    fn drive(
        &self,
        tour: &Tour,
        status: RouteStatus,
        traffic_aware: bool,
    ) -> Result<(Option<RouteMetrics>, RouteStatus)> {
        match self.metrics(tour, traffic_aware) {
            Ok(metrics) => Ok((Some(metrics), status)),
            Err(RoutingError::Oracle(OracleError::NoRoute { from, to })) => {
                let legs = tour.leg_points();
                let (Some(a), Some(b)) = (legs.get(from), legs.get(to)) else {
                    return Err(OracleError::NoRoute { from, to }.into());
                };
                log::warn!("engine.drive: no route on leg from={} to={}", from, to);
                Ok((None, status.blocked(a.clone(), b.clone())))
            }
            Err(e) => Err(e),
        }
    }

    /// Evaluates the caller's own order for savings reporting.
    ///
    /// An unroutable baseline leg yields no baseline instead of failing the
    /// call, since the optimized tour may avoid that leg.
    fn baseline(
        &self,
        original: &Tour,
        optimized: Option<&RouteMetrics>,
        traffic_aware: bool,
    ) -> Result<(Option<RouteMetrics>, Option<Savings>)> {
        if !self.config.compute_baseline {
            return Ok((None, None));
        }
        match self.metrics(original, traffic_aware) {
            Ok(baseline) => {
                let savings = optimized.map(|m| Savings::between(&baseline, m));
                Ok((Some(baseline), savings))
            }
            Err(RoutingError::Oracle(OracleError::NoRoute { from, to })) => {
                log::warn!("engine.baseline: skipped unroutable leg from={} to={}", from, to);
                Ok((None, None))
            }
            Err(e) => Err(e),
        }
    }
}

fn with_hub(start: &Point, stops: &[Point]) -> Vec<Point> {
    let mut points = Vec::with_capacity(stops.len() + 1);
    points.push(start.clone());
    points.extend_from_slice(stops);
    points
}


#[cfg(test)]
mod tests {
    use super::test_support::{blocked_leg, hub_abc, ids};
    use super::*;
    use crate::distance::TableOracle;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn test_optimize_hub_abc_nn() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::NearestNeighborTwoOpt, false)
            .expect("route");
        assert_eq!(ids(route.tour.points()), vec!["H", "A", "B", "C"]);
        let metrics = route.metrics.expect("metrics");
        assert!((metrics.total_distance_km() - 3.0).abs() < 1e-10);
        assert!(route.status.is_complete());
        assert_eq!(route.algorithm, Algorithm::NearestNeighborTwoOpt);
    }

    #[test]
    fn test_optimize_hub_abc_frontier() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::Frontier, false)
            .expect("route");
        assert_eq!(ids(route.tour.points()), vec!["H", "A", "B", "C"]);
    }

    #[test]
    fn test_optimize_reports_savings_against_input_order() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        // Caller order H, C, A, B = 10 + 9 + 1 = 20 km
        let stops = vec![pts[3].clone(), pts[1].clone(), pts[2].clone()];
        let route = engine
            .optimize(&pts[0], &stops, Algorithm::NearestNeighborTwoOpt, false)
            .expect("route");
        let baseline = route.baseline.expect("baseline");
        assert!((baseline.total_distance_km() - 20.0).abs() < 1e-10);
        let savings = route.savings.expect("savings");
        assert!((savings.distance_km - 17.0).abs() < 1e-10);
        assert!((savings.fuel_savings_percent - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_optimize_without_baseline_calls_oracle_twice() {
        let (pts, oracle) = hub_abc();
        let config = EngineConfig::default().with_compute_baseline(false);
        let engine = RouteEngine::with_config(&oracle, config);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::Frontier, false)
            .expect("route");
        assert!(route.baseline.is_none());
        assert!(route.savings.is_none());
        // one matrix for sequencing, one for metrics
        assert_eq!(oracle.calls(), 2);
    }

    #[test]
    fn test_optimize_no_stops_invalid() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let err = engine
            .optimize(&pts[0], &[], Algorithm::NearestNeighborTwoOpt, false)
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn test_optimize_bad_coordinates_invalid() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let err = engine
            .optimize(&pts[0], &[Point::new(123.0, 0.0)], Algorithm::Frontier, false)
            .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
    }

    #[test]
    fn test_optimize_propagates_oracle_error() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let stranger = Point::new(45.0, 45.0);
        let err = engine
            .optimize(&pts[0], &[stranger], Algorithm::Frontier, false)
            .unwrap_err();
        assert!(matches!(err, RoutingError::Oracle(OracleError::Unavailable(_))));
    }

    #[test]
    fn test_optimize_return_to_hub() {
        let (pts, oracle) = hub_abc();
        let config = EngineConfig::default().with_return_to_hub(true);
        let engine = RouteEngine::with_config(&oracle, config);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::NearestNeighborTwoOpt, false)
            .expect("route");
        assert!(route.tour.returns_to_hub());
        assert_eq!(route.tour.len(), 4);
        // Open tours H-A-B-C (3) + C-H (10) = 13; H-C-B-A-H = 10+1+1+1 = 13; either way 13
        let metrics = route.metrics.expect("metrics");
        assert!((metrics.total_distance_km() - 13.0).abs() < 1e-10);
        assert_eq!(metrics.legs().len(), 4);
    }

    #[test]
    fn test_optimize_unreachable_partial() {
        let pts: Vec<Point> = (0..3)
            .map(|i| Point::new(1.0, i as f64).with_id(i.to_string()))
            .collect();
        let dm = TravelMatrix::from_distances(
            3,
            vec![0.0, 1000.0, INF, 1000.0, 0.0, INF, INF, INF, 0.0],
        )
        .expect("valid");
        let oracle = TableOracle::new(pts.clone(), dm).expect("sized");
        let engine = RouteEngine::new(&oracle);

        for algorithm in Algorithm::ALL {
            let route = engine
                .optimize(&pts[0], &pts[1..], algorithm, false)
                .expect("partial route is not an error");
            assert_eq!(ids(route.tour.points()), vec!["0", "1"]);
            assert_eq!(route.status.unreachable(), &[pts[2].clone()]);
            // baseline 0→1→2 has no route; skipped rather than failing
            assert!(route.baseline.is_none());
        }
    }

    #[test]
    fn test_optimize_frontier_undrivable_leg_is_flagged() {
        let (pts, oracle) = blocked_leg();
        let engine = RouteEngine::new(&oracle);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::Frontier, false)
            .expect("undrivable tour is not an error");

        assert_eq!(ids(route.tour.points()), vec!["p0", "p1", "p2", "p3"]);
        assert!(route.metrics.is_none());
        assert!(!route.status.is_drivable());
        assert!(route.status.unreachable().is_empty());
        assert_eq!(
            route.status,
            RouteStatus::Undrivable {
                from: pts[1].clone(),
                to: pts[2].clone(),
                unreachable: Vec::new(),
            }
        );
        // caller order is the same blocked sequence
        assert!(route.baseline.is_none());
        assert!(route.savings.is_none());
    }

    #[test]
    fn test_optimize_nn_avoids_blocked_leg() {
        let (pts, oracle) = blocked_leg();
        let engine = RouteEngine::new(&oracle);
        let route = engine
            .optimize(&pts[0], &pts[1..], Algorithm::NearestNeighborTwoOpt, false)
            .expect("route");
        assert_eq!(ids(route.tour.points()), vec!["p0", "p1", "p3", "p2"]);
        assert!(route.status.is_drivable());
        let metrics = route.metrics.expect("metrics");
        assert!((metrics.total_distance_km() - 0.007).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_idempotent() {
        let (pts, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let tour = Tour::new(pts);
        let a = engine.metrics(&tour, false).expect("metrics");
        let b = engine.metrics(&tour, false).expect("metrics");
        assert_eq!(a, b);
    }

    #[test]
    fn test_metrics_rejects_bad_coordinates() {
        let (_, oracle) = hub_abc();
        let engine = RouteEngine::new(&oracle);
        let tour = Tour::new(vec![Point::new(0.0, 200.0)]);
        assert!(matches!(
            engine.metrics(&tour, false),
            Err(RoutingError::InvalidInput(_))
        ));
    }
}
