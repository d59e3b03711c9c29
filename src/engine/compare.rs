//! Side-by-side heuristic comparison.

use std::time::Instant;

use crate::distance::{request_matrix, DistanceOracle, TravelMatrix};
use crate::error::{Result, RoutingError};
use crate::models::{validate_all, Point, RouteMetrics, Savings};

use super::{with_hub, Algorithm, AlgorithmRun, ComparisonResult, RouteEngine};

/// Distances closer than this count as a tie.
const TIE_EPS: f64 = 1e-9;

impl<O: DistanceOracle> RouteEngine<O> {
    /// Runs both heuristics on the same matrix and recommends one.
    ///
    /// A drivable tour always beats one with a leg that has no route, and a
    /// complete tour beats a partial one. Otherwise the shorter total
    /// distance wins; an exact tie goes to nearest-neighbor + 2-opt unless
    /// `prefer_frontier_on_tie` is configured.
    ///
    /// Requires at least two stops.
    pub fn compare(
        &self,
        start: &Point,
        stops: &[Point],
        traffic_aware: bool,
    ) -> Result<ComparisonResult> {
        if stops.len() < 2 {
            return Err(RoutingError::invalid(format!(
                "comparison needs at least 2 delivery points, got {}",
                stops.len()
            )));
        }
        let points = with_hub(start, stops);
        validate_all(&points)?;

        log::info!(
            "engine.compare: start stops={} traffic={}",
            stops.len(),
            traffic_aware
        );

        let matrix = request_matrix(&self.oracle, &points, traffic_aware)?;
        let nearest_neighbor_two_opt = self.timed_run(
            &points,
            &matrix,
            Algorithm::NearestNeighborTwoOpt,
            traffic_aware,
        )?;
        let frontier = self.timed_run(&points, &matrix, Algorithm::Frontier, traffic_aware)?;

        let recommended = recommend(
            &nearest_neighbor_two_opt,
            &frontier,
            self.config.prefer_frontier_on_tie,
        );
        let (winner, other) = match recommended {
            Algorithm::NearestNeighborTwoOpt => (&nearest_neighbor_two_opt, &frontier),
            Algorithm::Frontier => (&frontier, &nearest_neighbor_two_opt),
        };
        let savings = match (&winner.metrics, &other.metrics) {
            (Some(w), Some(o)) => Some(Savings::between(o, w)),
            _ => None,
        };

        log::info!(
            "engine.compare: done recommended={} saved_km={:.3}",
            recommended,
            savings.map_or(0.0, |s| s.distance_km)
        );

        Ok(ComparisonResult {
            nearest_neighbor_two_opt,
            frontier,
            recommended,
            savings,
        })
    }

    /// Sequences with one heuristic, timing only the heuristic itself.
    fn timed_run(
        &self,
        points: &[Point],
        matrix: &TravelMatrix,
        algorithm: Algorithm,
        traffic_aware: bool,
    ) -> Result<AlgorithmRun> {
        let closed = self.config.return_to_hub;
        let started = Instant::now();
        let built = self.sequence(matrix, algorithm, closed);
        let compute_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let (tour, status) = self.resolve(points, built, closed);
        let (metrics, status) = self.drive(&tour, status, traffic_aware)?;
        log::debug!(
            "engine.compare: run algorithm={} km={:.3} compute_ms={:.3} complete={} drivable={}",
            algorithm,
            metrics.as_ref().map_or(f64::INFINITY, RouteMetrics::total_distance_km),
            compute_time_ms,
            status.is_complete(),
            status.is_drivable()
        );
        Ok(AlgorithmRun {
            algorithm,
            tour,
            metrics,
            status,
            compute_time_ms,
        })
    }
}

/// Picks the better of two runs.
fn recommend(
    nn: &AlgorithmRun,
    frontier: &AlgorithmRun,
    prefer_frontier_on_tie: bool,
) -> Algorithm {
    let rank = |run: &AlgorithmRun| (run.status.is_drivable(), run.status.is_complete());
    let (a, b) = (rank(nn), rank(frontier));
    if a != b {
        return if a > b {
            Algorithm::NearestNeighborTwoOpt
        } else {
            Algorithm::Frontier
        };
    }

    match (&nn.metrics, &frontier.metrics) {
        (Some(a), Some(b)) => {
            let (a, b) = (a.total_distance_km(), b.total_distance_km());
            if (a - b).abs() <= TIE_EPS {
                tie_break(prefer_frontier_on_tie)
            } else if b < a {
                Algorithm::Frontier
            } else {
                Algorithm::NearestNeighborTwoOpt
            }
        }
        _ => tie_break(prefer_frontier_on_tie),
    }
}

fn tie_break(prefer_frontier_on_tie: bool) -> Algorithm {
    if prefer_frontier_on_tie {
        Algorithm::Frontier
    } else {
        Algorithm::NearestNeighborTwoOpt
    }
}
