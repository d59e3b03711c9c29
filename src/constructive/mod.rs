//! Constructive heuristics for building an initial visiting order.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor from the last point, O(n²)
//! - [`frontier_expansion`] — Prim-style frontier growth from the visited set, O(n²)

mod frontier;
mod nearest_neighbor;

pub use frontier::frontier_expansion;
pub use nearest_neighbor::nearest_neighbor;

/// Output of a constructive heuristic: an index order over the matrix plus
/// any indices it could not reach.
///
/// `order` starts with the start index and holds no duplicates. When every
/// index was reached, `unreachable` is empty and `order` is a permutation of
/// `0..n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Construction {
    /// Visiting order, start index first.
    pub order: Vec<usize>,
    /// Indices left out because no finite edge led to them.
    pub unreachable: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every index was visited.
    pub fn is_complete(&self) -> bool {
        self.unreachable.is_empty()
    }

    fn finish(order: Vec<usize>, visited: &[bool]) -> Self {
        let unreachable = visited
            .iter()
            .enumerate()
            .filter(|(_, &v)| !v)
            .map(|(i, _)| i)
            .collect();
        Self { order, unreachable }
    }
}
