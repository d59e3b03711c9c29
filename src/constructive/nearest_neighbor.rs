//! Nearest-neighbor tour construction.
//!
//! Builds a path greedily: starting from the hub, always travel to the
//! nearest unvisited point reachable from the point appended last.
//!
//! # Complexity
//!
//! O(n²) where n = number of points.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for TSP. While solution
//! quality is typically 15-25% above optimal, it provides a fast baseline
//! that 2-opt then refines.

use crate::distance::TravelMatrix;

use super::Construction;

/// Constructs a visiting order using the nearest-neighbor heuristic.
///
/// Ties go to the lowest index. If at some step no unvisited point has a
/// finite edge from the current point, construction stops and the leftover
/// indices are reported in [`Construction::unreachable`].
///
/// # Arguments
///
/// * `distances` — Directed travel matrix
/// * `start` — Index of the hub (conventionally 0)
///
/// # Panics
///
/// Panics if `start` is out of bounds for a non-empty matrix.
///
/// # Examples
///
/// ```
/// use u_tour::distance::TravelMatrix;
/// use u_tour::constructive::nearest_neighbor;
///
/// let dm = TravelMatrix::from_distances(4, vec![
///     0.0, 1.0, 2.0, 3.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     3.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
///
/// let built = nearest_neighbor(&dm, 0);
/// assert_eq!(built.order, vec![0, 1, 2, 3]);
/// assert!(built.is_complete());
/// ```
pub fn nearest_neighbor(distances: &TravelMatrix, start: usize) -> Construction {
    let n = distances.size();
    if n == 0 {
        return Construction::default();
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut current = start;

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (i, &seen) in visited.iter().enumerate() {
            if seen {
                continue;
            }
            let d = distances.distance(current, i);
            if d.is_finite() && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                order.push(next);
                current = next;
            }
            None => break,
        }
    }

    Construction::finish(order, &visited)
}
