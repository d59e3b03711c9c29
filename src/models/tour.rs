//! Tour type.

use serde::{Deserialize, Serialize};

use super::Point;

/// An ordered, duplicate-free visiting sequence starting at the hub.
///
/// `points()[0]` is the hub. When `returns_to_hub` is set, the vehicle drives
/// back to the hub after the last stop; the hub is still stored only once and
/// the closing leg appears only in [`Tour::leg_points`].
///
/// # Examples
///
/// ```
/// use u_tour::models::{Point, Tour};
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(0.0, 2.0)];
/// let tour = Tour::from_order(&points, &[0, 2, 1]);
/// assert_eq!(tour.len(), 3);
/// assert_eq!(tour.num_legs(), 2);
///
/// let closed = tour.clone().with_return_to_hub(true);
/// assert_eq!(closed.leg_points().len(), 4);
/// assert_eq!(closed.num_legs(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    points: Vec<Point>,
    #[serde(default)]
    returns_to_hub: bool,
}

impl Tour {
    /// Wraps an already-ordered point sequence.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            returns_to_hub: false,
        }
    }

    /// Resolves an index order against the point set it was computed for.
    ///
    /// # Panics
    ///
    /// Panics if any index in `order` is out of bounds for `points`.
    pub fn from_order(points: &[Point], order: &[usize]) -> Self {
        Self::new(order.iter().map(|&i| points[i].clone()).collect())
    }

    /// Marks whether the tour closes back at the hub.
    pub fn with_return_to_hub(mut self, returns: bool) -> Self {
        self.returns_to_hub = returns;
        self
    }

    /// Visiting order, hub first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The starting point, if the tour is non-empty.
    pub fn hub(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Delivery stops after the hub.
    pub fn stops(&self) -> &[Point] {
        self.points.get(1..).unwrap_or(&[])
    }

    /// Whether the vehicle drives back to the hub at the end.
    pub fn returns_to_hub(&self) -> bool {
        self.returns_to_hub
    }

    /// Number of distinct points, hub included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the tour holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sequence of points actually driven, closing leg included.
    pub fn leg_points(&self) -> Vec<Point> {
        let mut seq = self.points.clone();
        if self.returns_to_hub && self.points.len() > 1 {
            seq.push(self.points[0].clone());
        }
        seq
    }

    /// Number of legs driven.
    pub fn num_legs(&self) -> usize {
        self.leg_points().len().saturating_sub(1)
    }

    /// Consumes the tour, returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Point> {
        (0..4).map(|i| Point::new(0.0, i as f64)).collect()
    }

    #[test]
    fn test_tour_empty() {
        let t = Tour::new(Vec::new());
        assert!(t.is_empty());
        assert!(t.hub().is_none());
        assert!(t.stops().is_empty());
        assert_eq!(t.num_legs(), 0);
    }

    #[test]
    fn test_from_order() {
        let pts = line();
        let t = Tour::from_order(&pts, &[0, 3, 1, 2]);
        assert_eq!(t.hub(), Some(&pts[0]));
        assert_eq!(t.stops(), &[pts[3].clone(), pts[1].clone(), pts[2].clone()]);
    }

    #[test]
    fn test_closed_single_point_has_no_legs() {
        let t = Tour::new(vec![Point::new(0.0, 0.0)]).with_return_to_hub(true);
        assert_eq!(t.leg_points().len(), 1);
        assert_eq!(t.num_legs(), 0);
    }

    #[test]
    fn test_closed_appends_hub() {
        let pts = line();
        let t = Tour::new(pts.clone()).with_return_to_hub(true);
        let legs = t.leg_points();
        assert_eq!(legs.len(), 5);
        assert_eq!(legs[4], pts[0]);
        assert_eq!(t.len(), 4);
    }
}
