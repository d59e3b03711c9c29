//! Route metrics calculator.

use crate::distance::{request_matrix, DistanceOracle, TravelMatrix};
use crate::error::{OracleError, Result};
use crate::models::{FuelModel, LegMetrics, Point, RouteMetrics, Tour};

/// Computes distance, time, and fuel figures for an ordered tour.
///
/// Every evaluation asks the oracle for a fresh matrix over exactly the
/// driven sequence. A matrix fetched for sequencing is never reused here,
/// because its indices refer to the unordered input.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{TableOracle, TravelMatrix};
/// use u_tour::evaluation::MetricsCalculator;
/// use u_tour::models::{FuelModel, Point, Tour};
///
/// let pts = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(0.0, 2.0)];
/// let dm = TravelMatrix::from_distances(3, vec![
///     0.0, 1000.0, 2000.0,
///     1000.0, 0.0, 1000.0,
///     2000.0, 1000.0, 0.0,
/// ]).unwrap();
/// let oracle = TableOracle::new(pts.clone(), dm).unwrap();
///
/// let calc = MetricsCalculator::new(&oracle, FuelModel::default());
/// let metrics = calc.evaluate(&Tour::new(pts), false).unwrap();
/// assert!((metrics.total_distance_km() - 2.0).abs() < 1e-10);
/// assert_eq!(metrics.legs().len(), 2);
/// ```
pub struct MetricsCalculator<'a, O: ?Sized> {
    oracle: &'a O,
    fuel: FuelModel,
}

impl<'a, O: DistanceOracle + ?Sized> MetricsCalculator<'a, O> {
    /// Creates a calculator backed by `oracle`.
    pub fn new(oracle: &'a O, fuel: FuelModel) -> Self {
        Self { oracle, fuel }
    }

    /// Evaluates a tour, including the closing leg if it returns to the hub.
    pub fn evaluate(&self, tour: &Tour, traffic_aware: bool) -> Result<RouteMetrics> {
        self.evaluate_sequence(&tour.leg_points(), traffic_aware)
    }

    /// Evaluates an explicit driven sequence. No closing leg is added.
    pub fn evaluate_sequence(&self, points: &[Point], traffic_aware: bool) -> Result<RouteMetrics> {
        if points.len() < 2 {
            return Ok(RouteMetrics::from_legs(Vec::new(), &self.fuel));
        }
        let matrix = request_matrix(self.oracle, points, traffic_aware)?;
        Ok(metrics_from_matrix(&matrix, &self.fuel)?)
    }
}

/// Sums consecutive legs `0→1→…→n-1` of a matrix built for a driven sequence.
fn metrics_from_matrix(
    matrix: &TravelMatrix,
    fuel: &FuelModel,
) -> std::result::Result<RouteMetrics, OracleError> {
    let n = matrix.size();
    let mut legs = Vec::with_capacity(n.saturating_sub(1));
    for i in 0..n.saturating_sub(1) {
        let leg = matrix
            .get(i, i + 1)
            .ok_or(OracleError::NoRoute { from: i, to: i + 1 })?;
        legs.push(LegMetrics {
            from: i,
            to: i + 1,
            distance_km: leg.distance_meters / 1000.0,
            duration_minutes: leg.duration_seconds / 60.0,
        });
    }
    Ok(RouteMetrics::from_legs(legs, fuel))
}
