// src/array2d.rs
//
// Dense row-major 2D array of f64.
//
// Conventions used throughout the solver:
// - axis 0 is x (row index i), axis 1 is y (column index j)
// - full-grid arrays are n × n and include the wall ring
// - interior arrays are (n-2) × (n-2); the mixed solve uses (n-2) × n (axis 0 stripped only)
//
// Moving between the two is always explicit: `interior` / `pad_border` for both axes,
// `strip_rows` / `pad_rows` for axis 0 only. The pad helpers write exact zeros.

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, PartialEq)]
pub struct Array2D {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Array2D {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// n × n array of zeros (full transverse grid).
    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Array2D::from_vec: {} values cannot fill {}x{}",
            data.len(),
            rows,
            cols
        );
        Self { rows, cols, data }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        i * self.cols + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        let k = self.idx(i, j);
        self.data[k] = v;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn transpose(&self) -> Array2D {
        let mut out = Array2D::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    pub fn max_abs_diff(&self, other: &Array2D) -> f64 {
        self.assert_same_shape(other, "max_abs_diff");
        self.data
            .iter()
            .zip(&other.data)
            .fold(0.0_f64, |m, (a, b)| m.max((a - b).abs()))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Array2D {
        Array2D {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn zip_with(&self, other: &Array2D, f: impl Fn(f64, f64) -> f64) -> Array2D {
        self.assert_same_shape(other, "zip_with");
        Array2D {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Elementwise product, in place.
    pub fn hadamard_assign(&mut self, other: &Array2D) {
        self.assert_same_shape(other, "hadamard_assign");
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a *= b;
        }
    }

    pub fn sub_scalar_assign(&mut self, s: f64) {
        for v in &mut self.data {
            *v -= s;
        }
    }

    /// Drop the outermost ring: (r, c) -> (r-2, c-2).
    pub fn interior(&self) -> Array2D {
        assert!(
            self.rows >= 2 && self.cols >= 2,
            "Array2D::interior: {}x{} has no interior",
            self.rows,
            self.cols
        );
        Array2D::from_fn(self.rows - 2, self.cols - 2, |i, j| self.get(i + 1, j + 1))
    }

    /// Surround with a one-cell ring of zeros: (r, c) -> (r+2, c+2).
    pub fn pad_border(&self) -> Array2D {
        let mut out = Array2D::zeros(self.rows + 2, self.cols + 2);
        for i in 0..self.rows {
            let src = &self.data[i * self.cols..(i + 1) * self.cols];
            let start = out.idx(i + 1, 1);
            out.data[start..start + self.cols].copy_from_slice(src);
        }
        out
    }

    /// Drop the first and last rows: (r, c) -> (r-2, c).
    pub fn strip_rows(&self) -> Array2D {
        assert!(
            self.rows >= 2,
            "Array2D::strip_rows: {}x{} has fewer than two rows",
            self.rows,
            self.cols
        );
        Array2D {
            rows: self.rows - 2,
            cols: self.cols,
            data: self.data[self.cols..(self.rows - 1) * self.cols].to_vec(),
        }
    }

    /// Add a zero row above and below: (r, c) -> (r+2, c).
    pub fn pad_rows(&self) -> Array2D {
        let mut data = vec![0.0; (self.rows + 2) * self.cols];
        data[self.cols..(self.rows + 1) * self.cols].copy_from_slice(&self.data);
        Array2D {
            rows: self.rows + 2,
            cols: self.cols,
            data,
        }
    }

    #[inline]
    pub fn assert_same_shape(&self, other: &Array2D, what: &str) {
        assert!(
            self.shape() == other.shape(),
            "{}: shape mismatch ({}x{} vs {}x{})",
            what,
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
    }
}

impl Add for &Array2D {
    type Output = Array2D;

    fn add(self, rhs: &Array2D) -> Array2D {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for &Array2D {
    type Output = Array2D;

    fn sub(self, rhs: &Array2D) -> Array2D {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for &Array2D {
    type Output = Array2D;

    fn mul(self, s: f64) -> Array2D {
        self.map(|v| v * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_and_interior_are_inverse() {
        let a = Array2D::from_fn(3, 4, |i, j| (i * 10 + j) as f64);
        let p = a.pad_border();
        assert_eq!(p.shape(), (5, 6));
        for j in 0..6 {
            assert_eq!(p.get(0, j), 0.0);
            assert_eq!(p.get(4, j), 0.0);
        }
        for i in 0..5 {
            assert_eq!(p.get(i, 0), 0.0);
            assert_eq!(p.get(i, 5), 0.0);
        }
        assert_eq!(p.interior(), a);
    }

    #[test]
    fn strip_rows_keeps_columns() {
        let a = Array2D::from_fn(4, 3, |i, j| (i * 3 + j) as f64);
        let s = a.strip_rows();
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s.get(0, 0), 3.0);
        assert_eq!(s.get(1, 2), 8.0);
        assert_eq!(s.pad_rows().strip_rows(), s);
        assert_eq!(s.pad_rows().get(3, 1), 0.0);
    }

    #[test]
    fn transpose_swaps_axes() {
        let a = Array2D::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), a.get(1, 2));
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn arithmetic_is_elementwise() {
        let a = Array2D::filled(2, 2, 3.0);
        let b = Array2D::from_fn(2, 2, |i, j| (i + j) as f64);
        assert_eq!((&a + &b).get(1, 1), 5.0);
        assert_eq!((&a - &b).get(0, 1), 2.0);
        assert_eq!((&b * 0.5).get(1, 0), 0.5);
        assert!((b.mean() - 1.0).abs() < 1e-15);
        assert_eq!(b.max_abs(), 2.0);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn mismatched_shapes_panic() {
        let _ = &Array2D::zeros(2, 2) + &Array2D::zeros(2, 3);
    }
}
