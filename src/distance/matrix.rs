//! Dense directed travel matrix.

/// Travel cost of one directed leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Road distance in meters.
    pub distance_meters: f64,
    /// Travel time in seconds.
    pub duration_seconds: f64,
}

impl Leg {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }
}

/// A dense n×n directed travel matrix stored in row-major order.
///
/// A cell holds `None` when the oracle found no route; such legs cost
/// `f64::INFINITY` through [`TravelMatrix::distance`]. The matrix is never
/// assumed symmetric.
///
/// # Examples
///
/// ```
/// use u_tour::distance::TravelMatrix;
///
/// let inf = f64::INFINITY;
/// let tm = TravelMatrix::from_distances(3, vec![
///     0.0, 5.0, inf,
///     6.0, 0.0, 2.0,
///     1.0, 2.0, 0.0,
/// ]).unwrap();
/// assert_eq!(tm.distance(0, 1), 5.0);
/// assert_eq!(tm.distance(1, 0), 6.0);
/// assert!(tm.get(0, 2).is_none());
/// assert_eq!(tm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TravelMatrix {
    data: Vec<Option<Leg>>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix of the given size with zero-cost diagonal and every
    /// other cell unreachable.
    pub fn new(size: usize) -> Self {
        let mut data = vec![None; size * size];
        for i in 0..size {
            data[i * size + i] = Some(Leg::new(0.0, 0.0));
        }
        Self { data, size }
    }

    /// Creates a matrix from an explicit n×n grid of cells.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_cells(size: usize, data: Vec<Option<Leg>>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from distances in meters, using the distance as the
    /// duration too. Non-finite entries become unreachable cells.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_distances(size: usize, distances: Vec<f64>) -> Option<Self> {
        let cells = distances
            .into_iter()
            .map(|d| d.is_finite().then(|| Leg::new(d, d)))
            .collect();
        Self::from_cells(size, cells)
    }

    /// Returns the leg from `from` to `to`, or `None` if unreachable.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Option<Leg> {
        self.data[from * self.size + to]
    }

    /// Distance in meters from `from` to `to`; `f64::INFINITY` if unreachable.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
            .map_or(f64::INFINITY, |leg| leg.distance_meters)
    }

    /// Sets the leg from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, leg: Option<Leg>) {
        self.data[from * self.size + to] = leg;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if distances are symmetric within the given tolerance
    /// and reachability is symmetric.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                match (self.get(i, j), self.get(j, i)) {
                    (Some(a), Some(b)) if (a.distance_meters - b.distance_meters).abs() <= tol => {}
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Returns the reachable candidate closest to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if no candidate
    /// is reachable.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.distance(from, c);
            if d.is_finite() && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Extracts the matrix restricted to `indices`, in that order.
    pub fn submatrix(&self, indices: &[usize]) -> Self {
        let n = indices.len();
        let mut data = Vec::with_capacity(n * n);
        for &i in indices {
            for &j in indices {
                data.push(self.get(i, j));
            }
        }
        Self { data, size: n }
    }
}
