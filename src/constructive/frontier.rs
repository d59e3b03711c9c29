//! Frontier-expansion sequencing.
//!
//! # Algorithm
//!
//! Keeps `best_edge[i]`, the cheapest known direct edge from any visited
//! point into unvisited point `i`. Each step relaxes `best_edge` using only
//! the edge from the most recently visited point (older minima survive since
//! relaxation only lowers a value), then annexes the unvisited point with the
//! smallest `best_edge`.
//!
//! The bookkeeping looks like Dijkstra's, but no path costs are accumulated:
//! the visited set grows Prim-style, always toward the point closest to the
//! existing frontier, and the annexation order becomes the visiting order.
//! Consecutive points in the result may therefore be far apart even when
//! each was close to *some* earlier point.
//!
//! # Complexity
//!
//! O(n²).

use crate::distance::TravelMatrix;

use super::Construction;

/// Orders points by growing the visited set from `start` toward the nearest
/// frontier point.
///
/// Ties go to the lowest index. Stops early, reporting the rest as
/// unreachable, when no unvisited point has a finite `best_edge`.
///
/// # Panics
///
/// Panics if `start` is out of bounds for a non-empty matrix.
///
/// # Examples
///
/// ```
/// use u_tour::distance::TravelMatrix;
/// use u_tour::constructive::frontier_expansion;
///
/// // Star around the hub: 1 and 2 both hang off 0, 3 hangs off 1.
/// let dm = TravelMatrix::from_distances(4, vec![
///     0.0, 1.0, 2.0, 9.0,
///     1.0, 0.0, 9.0, 3.0,
///     2.0, 9.0, 0.0, 9.0,
///     9.0, 3.0, 9.0, 0.0,
/// ]).unwrap();
///
/// // 2 (edge 2 from the hub) is annexed before 3 (edge 3 from point 1),
/// // even though the vehicle is at 1 when 2 is chosen.
/// assert_eq!(frontier_expansion(&dm, 0).order, vec![0, 1, 2, 3]);
/// ```
pub fn frontier_expansion(distances: &TravelMatrix, start: usize) -> Construction {
    let n = distances.size();
    if n == 0 {
        return Construction::default();
    }

    let mut best_edge = vec![f64::INFINITY; n];
    let mut visited = vec![false; n];
    best_edge[start] = 0.0;
    visited[start] = true;

    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut newest = start;

    while order.len() < n {
        for (i, (best, &seen)) in best_edge.iter_mut().zip(&visited).enumerate() {
            if !seen {
                *best = best.min(distances.distance(newest, i));
            }
        }

        let mut next: Option<(usize, f64)> = None;
        for (i, (&best, &seen)) in best_edge.iter().zip(&visited).enumerate() {
            if seen || !best.is_finite() {
                continue;
            }
            if next.map_or(true, |(_, b)| best < b) {
                next = Some((i, best));
            }
        }

        let Some((next, _)) = next else {
            break;
        };
        visited[next] = true;
        order.push(next);
        newest = next;
    }

    Construction::finish(order, &visited)
}
