// src/solvers/mod.rs
//
// Per-slice field solves.
//
//   longitudinal: Ez, Phi (Dirichlet, DST-I both axes), Bz (Neumann, DCT-I both axes)
//   transverse:   Ex, Ey, Bx, By (mixed DST/DCT, Helmholtz-shifted by the subtraction trick)
//
// Every solve has the same shape: assemble RHS -> forward transform -> multiply by the matching
// const array -> forward transform again (self-inverse up to the factor already folded into the
// const array) -> pad back to the full grid.

pub mod longitudinal;
pub mod transverse;

use crate::array2d::Array2D;
use crate::const_arrays::ConstArrays;
use crate::fields::Currents;

/// Source terms for one slice solve: plasma currents on the current and previous slice plus the
/// beam density on both.
#[derive(Debug, Clone, Copy)]
pub struct SliceSources<'a> {
    pub currents_full: &'a Currents,
    pub currents_prev: &'a Currents,
    pub ro_beam_full: &'a Array2D,
    pub ro_beam_prev: &'a Array2D,
}

impl SliceSources<'_> {
    /// Grid side, after checking every source array agrees with it.
    pub fn n(&self) -> usize {
        let n = self.currents_full.n();
        for (name, a) in [
            ("currents_full.jx", &self.currents_full.jx),
            ("currents_full.jy", &self.currents_full.jy),
            ("currents_full.jz", &self.currents_full.jz),
            ("currents_full.ro", &self.currents_full.ro),
            ("currents_prev.jx", &self.currents_prev.jx),
            ("currents_prev.jy", &self.currents_prev.jy),
            ("currents_prev.jz", &self.currents_prev.jz),
            ("currents_prev.ro", &self.currents_prev.ro),
            ("ro_beam_full", self.ro_beam_full),
            ("ro_beam_prev", self.ro_beam_prev),
        ] {
            assert!(
                a.shape() == (n, n),
                "SliceSources: {} is {}x{}, expected {}x{}",
                name,
                a.rows(),
                a.cols(),
                n,
                n
            );
        }
        n
    }
}

#[inline]
pub(crate) fn assert_grid(consts: &ConstArrays, n: usize, what: &str) {
    assert!(n >= 3, "{}: grid must have at least 3 nodes per side (n={})", what, n);
    assert_eq!(
        consts.n(),
        n,
        "{}: const arrays were built for n={}, sources are n={}",
        what,
        consts.n(),
        n
    );
}
