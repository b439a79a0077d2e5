// src/fields.rs

use crate::array2d::Array2D;
use crate::grid::Grid2D;

/// Electromagnetic field components on one transverse slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    pub ex: Array2D,
    pub ey: Array2D,
    pub ez: Array2D,
    pub bx: Array2D,
    pub by: Array2D,
    pub bz: Array2D,
    pub phi: Array2D,
}

impl Fields {
    /// All-zero fields on an n × n grid.
    pub fn zeros(n: usize) -> Self {
        Self {
            ex: Array2D::square(n),
            ey: Array2D::square(n),
            ez: Array2D::square(n),
            bx: Array2D::square(n),
            by: Array2D::square(n),
            bz: Array2D::square(n),
            phi: Array2D::square(n),
        }
    }

    pub fn for_grid(grid: &Grid2D) -> Self {
        Self::zeros(grid.n)
    }

    /// Grid side length.
    pub fn n(&self) -> usize {
        self.ex.rows()
    }

    /// Component-wise mean of two field snapshots.
    pub fn average(&self, other: &Fields) -> Fields {
        let mean = |a: &Array2D, b: &Array2D| a.zip_with(b, |x, y| (x + y) / 2.0);
        Fields {
            ex: mean(&self.ex, &other.ex),
            ey: mean(&self.ey, &other.ey),
            ez: mean(&self.ez, &other.ez),
            bx: mean(&self.bx, &other.bx),
            by: mean(&self.by, &other.by),
            bz: mean(&self.bz, &other.bz),
            phi: mean(&self.phi, &other.phi),
        }
    }

    /// Largest absolute deviation over all components.
    pub fn max_abs_diff(&self, other: &Fields) -> f64 {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| a.max_abs_diff(b))
            .fold(0.0, f64::max)
    }

    /// Components in the order Ex, Ey, Ez, Bx, By, Bz, Phi.
    pub fn components(&self) -> [&Array2D; 7] {
        [
            &self.ex, &self.ey, &self.ez, &self.bx, &self.by, &self.bz, &self.phi,
        ]
    }
}

/// Plasma current and charge density on one transverse slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Currents {
    pub jx: Array2D,
    pub jy: Array2D,
    pub jz: Array2D,
    pub ro: Array2D,
}

impl Currents {
    pub fn zeros(n: usize) -> Self {
        Self {
            jx: Array2D::square(n),
            jy: Array2D::square(n),
            jz: Array2D::square(n),
            ro: Array2D::square(n),
        }
    }

    pub fn for_grid(grid: &Grid2D) -> Self {
        Self::zeros(grid.n)
    }

    pub fn n(&self) -> usize {
        self.ro.rows()
    }
}
