// src/solvers/transverse.rs
//
// Ex, Ey, Bx, By from sources averaged over the current and previous slice.
//
// With ro and jz the two-slice averages (beam included) and ∂j/∂ξ ≈ (j_prev − j) / Δξ:
//
//   (−∇² + trick) Ex = −(∂ro/∂x − ∂jx/∂ξ) + trick·Ex_avg
//   (−∇² + trick) Ey = −(∂ro/∂y − ∂jy/∂ξ) + trick·Ey_avg
//   (−∇² + trick) Bx =  (∂jz/∂y − ∂jy/∂ξ) + trick·Bx_avg
//   (−∇² + trick) By = −(∂jz/∂x − ∂jx/∂ξ) + trick·By_avg
//
// `trick·F_avg` on both sides turns the Laplace problem into a Helmholtz one and keeps the
// per-slice fixed-point iteration from diverging. Boundary orientation:
//   Ey, Bx: zero on the x walls (rows 0, n-1), zero normal derivative on the y walls
//   Ex, By: the transpose of that
// so Ey/Bx go through the mixed transform directly and Ex/By through their transposes.
//
// Sources are assumed to vanish on the wall ring (no plasma reaches the wall).

use crate::array2d::Array2D;
use crate::const_arrays::ConstArrays;
use crate::derivative::dx_dy;
use crate::fields::Fields;
use crate::transform::TransformBackend;

use super::{assert_grid, SliceSources};

#[derive(Debug, Clone, PartialEq)]
pub struct TransverseFields {
    pub ex: Array2D,
    pub ey: Array2D,
    pub bx: Array2D,
    pub by: Array2D,
}

impl TransverseFields {
    /// 2·self − prev per component, cancelling the half-step lag of the trick term.
    pub fn extrapolate(&mut self, prev: &Fields) {
        let step = |new: &mut Array2D, old: &Array2D| {
            *new = new.zip_with(old, |a, b| 2.0 * a - b);
        };
        step(&mut self.ex, &prev.ex);
        step(&mut self.ey, &prev.ey);
        step(&mut self.bx, &prev.bx);
        step(&mut self.by, &prev.by);
    }
}

/// Solve for the transverse fields on one slice.
///
/// `fields_avg` is the previous iteration's averaged estimate at this slice and only enters
/// through the trick term. With `variant_a` set, the result is extrapolated against
/// `flds_prev` (the previous slice's solution).
pub fn calculate_ex_ey_bx_by(
    backend: &dyn TransformBackend,
    grid_step_size: f64,
    xi_step_size: f64,
    trick: f64,
    variant_a: bool,
    consts: &ConstArrays,
    fields_avg: &Fields,
    flds_prev: &Fields,
    sources: SliceSources<'_>,
) -> TransverseFields {
    let n = sources.n();
    assert_grid(consts, n, "calculate_ex_ey_bx_by");
    assert_eq!(fields_avg.n(), n, "calculate_ex_ey_bx_by: fields_avg grid mismatch");

    let full = sources.currents_full;
    let prev = sources.currents_prev;
    let beam_full = sources.ro_beam_full;
    let beam_prev = sources.ro_beam_prev;

    // 1. Mid-slice charge and longitudinal current (the beam moves at c: its jz equals its ro).
    let ro = Array2D::from_fn(n, n, |i, j| {
        (full.ro.get(i, j) + beam_full.get(i, j) + prev.ro.get(i, j) + beam_prev.get(i, j)) / 2.0
    });
    let jz = Array2D::from_fn(n, n, |i, j| {
        (full.jz.get(i, j) + beam_full.get(i, j) + prev.jz.get(i, j) + beam_prev.get(i, j)) / 2.0
    });

    // 2. Transverse gradients and longitudinal derivatives.
    let (dro_dx, dro_dy) = dx_dy(&ro, grid_step_size);
    let (djz_dx, djz_dy) = dx_dy(&jz, grid_step_size);
    let djx_dxi = (&prev.jx - &full.jx).map(|v| v / xi_step_size);
    let djy_dxi = (&prev.jy - &full.jy).map(|v| v / xi_step_size);

    // 3. Right-hand sides.
    let ex_rhs = Array2D::from_fn(n, n, |i, j| {
        -(dro_dx.get(i, j) - djx_dxi.get(i, j)) + fields_avg.ex.get(i, j) * trick
    });
    let ey_rhs = Array2D::from_fn(n, n, |i, j| {
        -(dro_dy.get(i, j) - djy_dxi.get(i, j)) + fields_avg.ey.get(i, j) * trick
    });
    let bx_rhs = Array2D::from_fn(n, n, |i, j| {
        (djz_dy.get(i, j) - djy_dxi.get(i, j)) + fields_avg.bx.get(i, j) * trick
    });
    let by_rhs = Array2D::from_fn(n, n, |i, j| {
        -(djz_dx.get(i, j) - djx_dxi.get(i, j)) + fields_avg.by.get(i, j) * trick
    });

    // 4. Mixed solves; the four components are independent.
    let mixed = &consts.field_mixed_matrix;
    let solve = |r: &Array2D| mixed_solve(backend, r, mixed);
    let solve_t = |r: &Array2D| mixed_solve(backend, &r.transpose(), mixed).transpose();

    let ((ex, ey), (bx, by)) = rayon::join(
        || rayon::join(|| solve_t(&ex_rhs), || solve(&ey_rhs)),
        || rayon::join(|| solve(&bx_rhs), || solve_t(&by_rhs)),
    );

    let mut out = TransverseFields { ex, ey, bx, by };

    // 5. Second-order extrapolation against the previous slice.
    if variant_a {
        assert_eq!(flds_prev.n(), n, "calculate_ex_ey_bx_by: flds_prev grid mismatch");
        out.extrapolate(flds_prev);
    }
    out
}

/// Full n×n RHS in, full n×n solution out; rows 0 and n-1 of the solution are zero.
pub fn mixed_solve(
    backend: &dyn TransformBackend,
    rhs: &Array2D,
    field_mixed_matrix: &Array2D,
) -> Array2D {
    let mut f = backend.mixed2d(&rhs.strip_rows());
    f.hadamard_assign(field_mixed_matrix);
    backend.mixed2d(&f).pad_rows()
}
