// src/grid.rs

/// Square transverse grid: n × n nodes, uniform spacing h in x and y.
///
/// Node (i, j) sits at x = (i - (n-1)/2)·h, y = (j - (n-1)/2)·h, so the window is centred on the
/// beam axis. The outermost ring of nodes is the conducting wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub n: usize,
    pub h: f64,
}

impl Grid2D {
    /// Create a new n × n grid with spacing h.
    pub fn new(n: usize, h: f64) -> Self {
        Self { n, h }
    }

    /// Total number of nodes.
    pub fn n_cells(&self) -> usize {
        self.n * self.n
    }

    /// Side length of the interior (wall ring removed).
    pub fn n_interior(&self) -> usize {
        self.n.saturating_sub(2)
    }

    /// Convert (i, j) indices to a flat row-major index (i runs along x, the slow axis).
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.n && j < self.n);
        i * self.n + j
    }

    /// Transverse coordinate of node index `k` (same formula for x and y).
    pub fn coord(&self, k: usize) -> f64 {
        (k as f64 - 0.5 * (self.n as f64 - 1.0)) * self.h
    }

    /// Full window width between the two walls.
    pub fn width(&self) -> f64 {
        (self.n as f64 - 1.0) * self.h
    }
}
