//! Geographic point type.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// A stop (or hub) the vehicle visits.
///
/// Points are immutable once handed to the engine. The optional `id` is an
/// opaque caller reference (typically an order id) and is never interpreted.
///
/// # Examples
///
/// ```
/// use u_tour::models::Point;
///
/// let hub = Point::new(37.5665, 126.9780).with_id("hub");
/// assert_eq!(hub.id(), Some("hub"));
/// assert!(hub.validate().is_ok());
///
/// let bad = Point::new(91.0, 0.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    lat: f64,
    lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl Point {
    /// Creates an anonymous point at the given coordinates.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            id: None,
            lat,
            lng,
            address: None,
        }
    }

    /// Attaches a caller reference.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attaches a display address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Caller reference, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Display address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Checks that the coordinates are finite and within WGS84 bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(RoutingError::invalid(format!(
                "non-finite coordinates ({}, {})",
                self.lat, self.lng
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(RoutingError::invalid(format!(
                "latitude {} out of range",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(RoutingError::invalid(format!(
                "longitude {} out of range",
                self.lng
            )));
        }
        Ok(())
    }

    /// Stable textual key used for caching oracle results.
    ///
    /// Coordinates are rounded to six decimals (~0.1 m).
    pub(crate) fn cache_key(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Validates every point in a slice.
pub(crate) fn validate_all(points: &[Point]) -> Result<()> {
    points.iter().try_for_each(Point::validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.lat(), 10.0);
        assert_eq!(p.lng(), 20.0);
        assert!(p.id().is_none());
        assert!(p.address().is_none());
    }

    #[test]
    fn test_point_builders() {
        let p = Point::new(1.0, 2.0)
            .with_id("order-7")
            .with_address("12 Main St");
        assert_eq!(p.id(), Some("order-7"));
        assert_eq!(p.address(), Some("12 Main St"));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(Point::new(90.0, 180.0).validate().is_ok());
        assert!(Point::new(-90.0, -180.0).validate().is_ok());
        assert!(Point::new(90.1, 0.0).validate().is_err());
        assert!(Point::new(0.0, -180.5).validate().is_err());
        assert!(Point::new(f64::NAN, 0.0).validate().is_err());
        assert!(Point::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_all() {
        let ok = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(validate_all(&ok).is_ok());
        let bad = vec![Point::new(0.0, 0.0), Point::new(100.0, 1.0)];
        assert!(matches!(
            validate_all(&bad),
            Err(RoutingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cache_key_rounds() {
        let a = Point::new(1.00000001, 2.0);
        let b = Point::new(1.0, 2.0).with_id("x");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(b.cache_key(), "1.000000,2.000000");
    }

    #[test]
    fn test_serde_skips_empty_fields() {
        let json = serde_json::to_string(&Point::new(1.5, 2.5)).expect("serialize");
        assert_eq!(json, r#"{"lat":1.5,"lng":2.5}"#);
        let back: Point = serde_json::from_str(r#"{"id":"a","lat":1.0,"lng":2.0}"#)
            .expect("deserialize");
        assert_eq!(back.id(), Some("a"));
    }
}
