//! Path 2-opt improvement on a directed matrix.
//!
//! # Algorithm
//!
//! For each pair of edges (i, i+1) and (j, j+1) with i + 1 < j, reverse the
//! segment `[i+1..=j]`. On an open path `j` may be the last position, in
//! which case only edge (i, i+1) is replaced and the tail is reversed.
//! Position 0 (the hub) never moves.
//!
//! Because the matrix is directed, reversing a segment also changes the cost
//! of every leg inside it, so candidates are scored by their full path cost
//! rather than by a four-edge delta.
//!
//! The first strictly improving reversal is accepted and the scan restarts
//! from the new path (first-improvement). The search stops after a scan with
//! no improvement or after `max_passes` scans.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use serde::{Deserialize, Serialize};

use crate::distance::TravelMatrix;

/// Improvements smaller than this are treated as float noise.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Configuration for [`two_opt_improve`].
///
/// # Examples
///
/// ```
/// use u_tour::local_search::TwoOptConfig;
///
/// let config = TwoOptConfig::default().with_max_passes(20).with_closed(true);
/// assert_eq!(config.max_passes, 20);
/// assert!(config.closed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptConfig {
    /// Maximum number of scans. Bounds runtime on pathological inputs; a
    /// search cut short by this cap is not guaranteed to be 2-optimal.
    pub max_passes: usize,

    /// Include the closing leg from the last point back to position 0 in the
    /// objective.
    pub closed: bool,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_passes: 100,
            closed: false,
        }
    }
}

impl TwoOptConfig {
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }
}

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptResult {
    /// Improved order (or the input order if nothing improved).
    pub order: Vec<usize>,
    /// Cost of `order` under the configured objective.
    pub cost: f64,
    /// Scans performed.
    pub passes: usize,
    /// Reversals accepted.
    pub moves: usize,
}

/// Applies first-improvement 2-opt to an index path.
///
/// # Arguments
///
/// * `order` — Visiting order, hub first
/// * `distances` — Directed travel matrix
/// * `config` — Pass cap and objective
///
/// # Examples
///
/// ```
/// use u_tour::distance::TravelMatrix;
/// use u_tour::local_search::{path_cost, two_opt_improve, TwoOptConfig};
///
/// // Points on a line at 0, 1, 2, 3.
/// let dm = TravelMatrix::from_distances(4, vec![
///     0.0, 1.0, 2.0, 3.0,
///     1.0, 0.0, 1.0, 2.0,
///     2.0, 1.0, 0.0, 1.0,
///     3.0, 2.0, 1.0, 0.0,
/// ]).unwrap();
///
/// let result = two_opt_improve(&[0, 3, 2, 1], &dm, &TwoOptConfig::default());
/// assert_eq!(result.order, vec![0, 1, 2, 3]);
/// assert!(result.cost < path_cost(&[0, 3, 2, 1], &dm, false));
/// ```
pub fn two_opt_improve(
    order: &[usize],
    distances: &TravelMatrix,
    config: &TwoOptConfig,
) -> TwoOptResult {
    let mut current = order.to_vec();
    let mut best = path_cost(&current, distances, config.closed);
    let n = current.len();
    let mut passes = 0;
    let mut moves = 0;

    if n < 3 {
        return TwoOptResult {
            order: current,
            cost: best,
            passes,
            moves,
        };
    }

    while passes < config.max_passes {
        passes += 1;
        let mut improved = false;

        'scan: for i in 0..n - 2 {
            for j in i + 2..n {
                let mut candidate = current.clone();
                candidate[i + 1..=j].reverse();
                let cost = path_cost(&candidate, distances, config.closed);
                if cost < best - IMPROVEMENT_EPS {
                    log::debug!(
                        "two_opt.pass: accept pass={} i={} j={} cost={:.3} gain={:.3}",
                        passes,
                        i,
                        j,
                        cost,
                        best - cost
                    );
                    current = candidate;
                    best = cost;
                    moves += 1;
                    improved = true;
                    break 'scan;
                }
            }
        }

        if !improved {
            break;
        }
    }

    if passes == config.max_passes && moves > 0 {
        log::debug!("two_opt: pass cap reached passes={} moves={}", passes, moves);
    }

    TwoOptResult {
        order: current,
        cost: best,
        passes,
        moves,
    }
}

/// Sum of consecutive leg distances along `order`, plus the leg from the
/// last point back to `order[0]` when `closed`.
///
/// Unreachable legs make the cost `f64::INFINITY`.
pub fn path_cost(order: &[usize], distances: &TravelMatrix, closed: bool) -> f64 {
    let mut cost: f64 = order
        .windows(2)
        .map(|w| distances.distance(w[0], w[1]))
        .sum();
    if closed && order.len() > 1 {
        cost += distances.distance(order[order.len() - 1], order[0]);
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;

    const INF: f64 = f64::INFINITY;

    fn line() -> TravelMatrix {
        TravelMatrix::from_distances(
            4,
            vec![
                0.0, 1.0, 2.0, 3.0, //
                1.0, 0.0, 1.0, 2.0, //
                2.0, 1.0, 0.0, 1.0, //
                3.0, 2.0, 1.0, 0.0,
            ],
        )
        .expect("valid")
    }

    fn hub_abc() -> TravelMatrix {
        TravelMatrix::from_distances(
            4,
            vec![
                0.0, 1.0, 10.0, 10.0, //
                1.0, 0.0, 1.0, 9.0, //
                10.0, 1.0, 0.0, 1.0, //
                10.0, 9.0, 1.0, 0.0,
            ],
        )
        .expect("valid")
    }

    #[test]
    fn test_path_cost_open_and_closed() {
        let dm = line();
        assert!((path_cost(&[0, 1, 2, 3], &dm, false) - 3.0).abs() < 1e-10);
        assert!((path_cost(&[0, 1, 2, 3], &dm, true) - 6.0).abs() < 1e-10);
        assert_eq!(path_cost(&[0], &dm, true), 0.0);
        assert_eq!(path_cost(&[], &dm, false), 0.0);
    }

    #[test]
    fn test_path_cost_unreachable_is_infinite() {
        let dm = TravelMatrix::from_distances(2, vec![0.0, INF, 1.0, 0.0]).expect("valid");
        assert_eq!(path_cost(&[0, 1], &dm, false), INF);
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = line();
        let result = two_opt_improve(&[0, 1, 2, 3], &dm, &TwoOptConfig::default());
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert_eq!(result.moves, 0);
        assert_eq!(result.passes, 1);
    }

    #[test]
    fn test_2opt_hub_abc_keeps_nn_tour() {
        let dm = hub_abc();
        let nn = nearest_neighbor(&dm, 0);
        let result = two_opt_improve(&nn.order, &dm, &TwoOptConfig::default());
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert!((result.cost - 3.0).abs() < 1e-10);
        assert_eq!(result.moves, 0);
    }

    #[test]
    fn test_2opt_reverses_tail() {
        let dm = line();
        let result = two_opt_improve(&[0, 3, 2, 1], &dm, &TwoOptConfig::default());
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert!((result.cost - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_hub_never_moves() {
        let dm = line();
        let result = two_opt_improve(&[2, 0, 3, 1], &dm, &TwoOptConfig::default());
        assert_eq!(result.order[0], 2);
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let dm = TravelMatrix::from_distances(
            5,
            vec![
                0.0, 7.0, 7.0, 7.0, 7.0, //
                7.0, 0.0, 10.0, 10.0, 14.1, //
                7.0, 10.0, 0.0, 14.1, 10.0, //
                7.0, 10.0, 14.1, 0.0, 10.0, //
                7.0, 14.1, 10.0, 10.0, 0.0,
            ],
        )
        .expect("valid");
        let initial = [0, 1, 4, 2, 3];
        let before = path_cost(&initial, &dm, false);
        let result = two_opt_improve(&initial, &dm, &TwoOptConfig::default());
        assert!(result.cost <= before + 1e-10);
        assert!((path_cost(&result.order, &dm, false) - result.cost).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_directed_costs() {
        // Reversing [1, 2] is cheaper only because 2→1 is cheap.
        let dm = TravelMatrix::from_distances(
            3,
            vec![
                0.0, 5.0, 5.0, //
                5.0, 0.0, 9.0, //
                5.0, 1.0, 0.0,
            ],
        )
        .expect("valid");
        let result = two_opt_improve(&[0, 1, 2], &dm, &TwoOptConfig::default());
        assert_eq!(result.order, vec![0, 2, 1]);
        assert!((result.cost - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_closed_objective() {
        // Open: 0→1→2 = 1+1 = 2 vs 0→2→1 = 2+1 = 3.
        // Closed adds 2→0 = 20 vs 1→0 = 1, so 0→2→1→0 wins.
        let dm = TravelMatrix::from_distances(
            3,
            vec![
                0.0, 1.0, 2.0, //
                1.0, 0.0, 1.0, //
                20.0, 1.0, 0.0,
            ],
        )
        .expect("valid");
        let open = two_opt_improve(&[0, 1, 2], &dm, &TwoOptConfig::default());
        assert_eq!(open.order, vec![0, 1, 2]);
        let closed = two_opt_improve(&[0, 1, 2], &dm, &TwoOptConfig::default().with_closed(true));
        assert_eq!(closed.order, vec![0, 2, 1]);
        assert!((closed.cost - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_zero_passes_is_noop() {
        let dm = line();
        let config = TwoOptConfig::default().with_max_passes(0);
        let result = two_opt_improve(&[0, 3, 2, 1], &dm, &config);
        assert_eq!(result.order, vec![0, 3, 2, 1]);
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn test_2opt_pass_cap_limits_moves() {
        let dm = line();
        let config = TwoOptConfig::default().with_max_passes(1);
        let result = two_opt_improve(&[0, 3, 2, 1], &dm, &config);
        assert_eq!(result.passes, 1);
        assert!(result.moves <= 1);
    }

    #[test]
    fn test_2opt_short_paths() {
        let dm = line();
        let result = two_opt_improve(&[0, 1], &dm, &TwoOptConfig::default());
        assert_eq!(result.order, vec![0, 1]);
        assert!((result.cost - 1.0).abs() < 1e-10);
        assert!(two_opt_improve(&[], &dm, &TwoOptConfig::default()).order.is_empty());
    }
}
