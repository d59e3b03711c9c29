//! Mid-route resequencing.

use crate::distance::{request_matrix, DistanceOracle, TravelMatrix};
use crate::error::{Result, RoutingError};
use crate::models::{validate_all, Point, RouteMetrics, Tour};

use super::{Algorithm, OptimizedRoute, RouteEngine, RouteStatus};

impl<O: DistanceOracle> RouteEngine<O> {
    /// Resequences the stops after `current_index`, starting from the point
    /// at `current_index`.
    ///
    /// `tour[..current_index]` has already been driven and is returned
    /// unchanged, followed by the current point and the resequenced rest.
    /// The returned tour keeps `tour`'s return-to-hub flag. For a tour that
    /// returns, the remaining stops are ordered with the drive back to the
    /// hub counted in the objective.
    ///
    /// Fails with [`RoutingError::InvalidInput`] if `tour` is empty or
    /// `current_index` is out of range.
    pub fn reoptimize(
        &self,
        tour: &Tour,
        current_index: usize,
        algorithm: Algorithm,
        traffic_aware: bool,
    ) -> Result<OptimizedRoute> {
        if tour.is_empty() {
            return Err(RoutingError::invalid("tour is empty"));
        }
        if current_index >= tour.len() {
            return Err(RoutingError::invalid(format!(
                "current index {} out of range for tour of {} points",
                current_index,
                tour.len()
            )));
        }
        validate_all(tour.points())?;

        let (prefix, rest) = tour.points().split_at(current_index);
        log::info!(
            "engine.reoptimize: start algorithm={} done={} remaining={} traffic={}",
            algorithm,
            prefix.len(),
            rest.len() - 1,
            traffic_aware
        );

        let (resequenced, status) = if rest.len() > 2 {
            let closed = tour.returns_to_hub();
            let matrix = if closed && current_index > 0 {
                let mut with_hub = rest.to_vec();
                with_hub.extend(tour.hub().cloned());
                let full = request_matrix(&self.oracle, &with_hub, traffic_aware)?;
                ending_at_hub(&full, rest.len())
            } else {
                request_matrix(&self.oracle, rest, traffic_aware)?
            };
            let built = self.sequence(&matrix, algorithm, closed);
            let (local, status) = self.resolve(rest, built, false);
            (local.into_points(), status)
        } else {
            // zero or one stop left: nothing to reorder
            (rest.to_vec(), RouteStatus::Complete)
        };

        let mut points: Vec<Point> = Vec::with_capacity(tour.len());
        points.extend_from_slice(prefix);
        points.extend(resequenced);
        let new_tour = Tour::new(points).with_return_to_hub(tour.returns_to_hub());

        let (metrics, status) = self.drive(&new_tour, status, traffic_aware)?;
        let (baseline, savings) = self.baseline(tour, metrics.as_ref(), traffic_aware)?;

        log::info!(
            "engine.reoptimize: done algorithm={} distance_km={:.3} complete={} drivable={}",
            algorithm,
            metrics.as_ref().map_or(f64::INFINITY, RouteMetrics::total_distance_km),
            status.is_complete(),
            status.is_drivable()
        );

        Ok(OptimizedRoute {
            algorithm,
            tour: new_tour,
            metrics,
            status,
            baseline,
            savings,
        })
    }
}

/// Matrix over the first `size` points of `full` whose legs back into
/// index 0 end at the hub (index `size` of `full`) instead.
///
/// Construction never walks back to its start, so only the closing leg of a
/// closed 2-opt objective reads the rewritten column.
fn ending_at_hub(full: &TravelMatrix, size: usize) -> TravelMatrix {
    let indices: Vec<usize> = (0..size).collect();
    let mut local = full.submatrix(&indices);
    for i in 1..size {
        local.set(i, 0, full.get(i, size));
    }
    local
}
