//! Great-circle helpers for incidental filtering.
//!
//! These are straight-line approximations. Sequencing and metrics always use
//! a [`DistanceOracle`](super::DistanceOracle) instead.

use crate::models::Point;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// # Examples
///
/// ```
/// use u_tour::distance::geo::haversine_km;
/// use u_tour::models::Point;
///
/// // One degree of latitude is ~111.19 km.
/// let d = haversine_km(&Point::new(0.0, 0.0), &Point::new(1.0, 0.0));
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng() - a.lng()).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Returns the points within `radius_km` of `center`, preserving order.
pub fn within_radius<'a>(center: &Point, points: &'a [Point], radius_km: f64) -> Vec<&'a Point> {
    points
        .iter()
        .filter(|p| haversine_km(center, p) <= radius_km)
        .collect()
}
