//! Oracle backed by a precomputed matrix.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::OracleError;
use crate::models::Point;

use super::{DistanceOracle, Leg, TravelMatrix};

/// Serves sub-matrices from a matrix computed once over a known point list.
///
/// Useful when the caller already holds a full matrix (a nightly batch, a
/// test fixture) and wants the engine to consult it instead of a live
/// provider. Points are matched by equality against the known list.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceOracle, TableOracle, TravelMatrix};
/// use u_tour::models::Point;
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(0.0, 2.0)];
/// let tm = TravelMatrix::from_distances(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 1.0,
///     2.0, 1.0, 0.0,
/// ]).unwrap();
/// let oracle = TableOracle::new(points.clone(), tm).unwrap();
///
/// let sub = oracle.matrix(&[points[2].clone(), points[0].clone()], false).unwrap();
/// assert_eq!(sub.distance(0, 1), 2.0);
/// assert_eq!(oracle.calls(), 1);
/// ```
#[derive(Debug)]
pub struct TableOracle {
    points: Vec<Point>,
    matrix: TravelMatrix,
    traffic: Option<TravelMatrix>,
    calls: AtomicUsize,
}

impl TableOracle {
    /// Creates an oracle over `points` with the matching `matrix`.
    pub fn new(points: Vec<Point>, matrix: TravelMatrix) -> Result<Self, OracleError> {
        if matrix.size() != points.len() {
            return Err(OracleError::DimensionMismatch {
                expected: points.len(),
                actual: matrix.size(),
            });
        }
        Ok(Self {
            points,
            matrix,
            traffic: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Supplies traffic-aware durations.
    ///
    /// Only durations are taken from `traffic`; distances always come from
    /// the base matrix.
    pub fn with_traffic(mut self, traffic: TravelMatrix) -> Result<Self, OracleError> {
        if traffic.size() != self.points.len() {
            return Err(OracleError::DimensionMismatch {
                expected: self.points.len(),
                actual: traffic.size(),
            });
        }
        self.traffic = Some(traffic);
        Ok(self)
    }

    /// Number of matrix requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn position(&self, point: &Point) -> Option<usize> {
        self.points.iter().position(|p| p == point)
    }
}

impl DistanceOracle for TableOracle {
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let indices = points
            .iter()
            .map(|p| {
                self.position(p).ok_or_else(|| {
                    OracleError::Unavailable(format!(
                        "point ({}, {}) not in table",
                        p.lat(),
                        p.lng()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut sub = self.matrix.submatrix(&indices);
        if let (true, Some(traffic)) = (traffic_aware, &self.traffic) {
            for (a, &i) in indices.iter().enumerate() {
                for (b, &j) in indices.iter().enumerate() {
                    if let (Some(base), Some(slow)) = (sub.get(a, b), traffic.get(i, j)) {
                        sub.set(a, b, Some(Leg::new(base.distance_meters, slow.duration_seconds)));
                    }
                }
            }
        }
        Ok(sub)
    }
}
