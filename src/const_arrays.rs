// src/const_arrays.rs
//
// Per-mode scaling factors for the spectral solves.
//
// For a grid of n nodes per side and spacing h, the 5-point operator −∇² has 1D eigenvalues
//
//   lam(k) = 4/h² · sin²(π k / (2(n-1)))
//
// with sine modes k = 1..=n-2 (zero value on the wall) and cosine modes k = 0..=n-1
// (zero normal derivative on the wall). 2D eigenvalues are lam(i) + lam(j).
//
// Unnormalised DST-I (length n-2) and DCT-I (length n) applied twice both return the input
// scaled by 2(n-1), so every matrix also carries 1/(2(n-1))² for the two passes.
//
// Each matrix therefore maps the forward transform of a RHS directly to the forward transform
// of the solution of −∇²u = f (or (−∇² + trick)u = f for the mixed case).

use std::f64::consts::PI;

use tracing::debug;

use crate::array2d::Array2D;
use crate::grid::Grid2D;

#[derive(Debug, Clone, PartialEq)]
pub struct ConstArrays {
    /// (n-2) × (n-2): Dirichlet in both axes (Ez, Phi).
    pub dirichlet_matrix: Array2D,
    /// n × n: Neumann in both axes (Bz). Mode (0, 0) is zeroed.
    pub neumann_matrix: Array2D,
    /// (n-2) × n: sine along axis 0, cosine along axis 1, shifted by `trick`.
    pub field_mixed_matrix: Array2D,
}

impl ConstArrays {
    pub fn new(grid: &Grid2D, trick: f64) -> Self {
        let n = grid.n;
        assert!(n >= 3, "ConstArrays::new: grid must have at least 3 nodes per side (n={})", n);

        let lam = laplacian_eigenvalues(n, grid.h);
        let norm = 1.0 / (2.0 * (n as f64 - 1.0)).powi(2);
        let m = n - 2;

        let dirichlet_matrix =
            Array2D::from_fn(m, m, |i, j| norm / (lam[i + 1] + lam[j + 1]));

        let neumann_matrix = Array2D::from_fn(n, n, |i, j| {
            if i == 0 && j == 0 {
                // Constant mode: undetermined, fixed afterwards by the zero-mean condition.
                0.0
            } else {
                norm / (lam[i] + lam[j])
            }
        });

        let field_mixed_matrix =
            Array2D::from_fn(m, n, |i, j| norm / (lam[i + 1] + lam[j] + trick));

        debug!(n, h = grid.h, trick, "built spectral solver matrices");

        Self {
            dirichlet_matrix,
            neumann_matrix,
            field_mixed_matrix,
        }
    }

    /// Grid side these matrices were built for.
    pub fn n(&self) -> usize {
        self.neumann_matrix.rows()
    }
}

/// lam(k) for k = 0..n.
pub fn laplacian_eigenvalues(n: usize, h: f64) -> Vec<f64> {
    (0..n)
        .map(|k| {
            let s = (k as f64 * PI / (2.0 * (n as f64 - 1.0))).sin();
            4.0 / (h * h) * s * s
        })
        .collect()
}
