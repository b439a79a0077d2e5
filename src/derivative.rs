// src/derivative.rs

use crate::array2d::Array2D;

/// Centered x and y derivatives of `a`, computed together.
///
/// Interior node (i, j) gets (a[i+1, j] - a[i-1, j]) / 2h and (a[i, j+1] - a[i, j-1]) / 2h.
/// The outer ring of both outputs is zero; `a` is expected to vanish there as well
/// (no plasma reaches the wall).
pub fn dx_dy(a: &Array2D, h: f64) -> (Array2D, Array2D) {
    let (rows, cols) = a.shape();
    let mut dx = Array2D::zeros(rows, cols);
    let mut dy = Array2D::zeros(rows, cols);
    if rows < 3 || cols < 3 {
        return (dx, dy);
    }

    let inv = 1.0 / (2.0 * h);
    for i in 1..rows - 1 {
        for j in 1..cols - 1 {
            dx.set(i, j, (a.get(i + 1, j) - a.get(i - 1, j)) * inv);
            dy.set(i, j, (a.get(i, j + 1) - a.get(i, j - 1)) * inv);
        }
    }
    (dx, dy)
}
