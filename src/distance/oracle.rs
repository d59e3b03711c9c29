//! Distance/duration oracle abstraction.

use std::sync::Arc;

use crate::error::OracleError;
use crate::models::Point;

use super::TravelMatrix;

/// Source of pairwise travel cost for an ordered list of points.
///
/// The engine never derives travel cost from coordinates itself; every
/// sequencing and metrics decision goes through an oracle. Row/column `i` of
/// the returned matrix corresponds to `points[i]`.
///
/// Traffic-aware mode may change durations but must not change distances.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceOracle, Leg, TravelMatrix};
/// use u_tour::error::OracleError;
/// use u_tour::models::Point;
///
/// /// Every leg costs one kilometer.
/// struct Flat;
///
/// impl DistanceOracle for Flat {
///     fn matrix(
///         &self,
///         points: &[Point],
///         _traffic_aware: bool,
///     ) -> Result<TravelMatrix, OracleError> {
///         let n = points.len();
///         let mut tm = TravelMatrix::new(n);
///         for i in 0..n {
///             for j in 0..n {
///                 if i != j {
///                     tm.set(i, j, Some(Leg::new(1000.0, 60.0)));
///                 }
///             }
///         }
///         Ok(tm)
///     }
/// }
///
/// let tm = Flat.matrix(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], false).unwrap();
/// assert_eq!(tm.distance(0, 1), 1000.0);
/// ```
pub trait DistanceOracle {
    /// Returns the n×n matrix for `points`, or fails if the provider reports
    /// a non-success status.
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError>;
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for &O {
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError> {
        (**self).matrix(points, traffic_aware)
    }
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for Box<O> {
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError> {
        (**self).matrix(points, traffic_aware)
    }
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for Arc<O> {
    fn matrix(&self, points: &[Point], traffic_aware: bool) -> Result<TravelMatrix, OracleError> {
        (**self).matrix(points, traffic_aware)
    }
}

/// Calls the oracle and checks that the matrix matches the request.
pub(crate) fn request_matrix<O: DistanceOracle + ?Sized>(
    oracle: &O,
    points: &[Point],
    traffic_aware: bool,
) -> Result<TravelMatrix, OracleError> {
    let matrix = oracle.matrix(points, traffic_aware)?;
    if matrix.size() != points.len() {
        return Err(OracleError::DimensionMismatch {
            expected: points.len(),
            actual: matrix.size(),
        });
    }
    Ok(matrix)
}
