// src/solvers/longitudinal.rs
//
// Ez, Phi and Bz from the current slice only.
//
//   −∇² Ez  = −(∂jx/∂x + ∂jy/∂y)          Ez = 0 on the wall
//   −∇² Phi = ro − jz                      Phi = 0 on the wall
//   −∇² Bz  = −(∂jx/∂y − ∂jy/∂x)          ∂Bz/∂n = 0 on the wall, ∫Bz = 0
//
// Sign conventions are those of the quasi-static scheme driving this solver; keep them as is.

use crate::array2d::Array2D;
use crate::const_arrays::ConstArrays;
use crate::derivative::dx_dy;
use crate::fields::Currents;
use crate::transform::TransformBackend;

use super::assert_grid;

pub fn calculate_ez(
    backend: &dyn TransformBackend,
    grid_step_size: f64,
    consts: &ConstArrays,
    currents: &Currents,
) -> Array2D {
    assert_grid(consts, currents.n(), "calculate_ez");

    let (djx_dx, _) = dx_dy(&currents.jx, grid_step_size);
    let (_, djy_dy) = dx_dy(&currents.jy, grid_step_size);
    let rhs_inner = (&djx_dx + &djy_dy).interior().map(|v| -v);

    dirichlet_solve(backend, &rhs_inner, &consts.dirichlet_matrix).pad_border()
}

pub fn calculate_phi(
    backend: &dyn TransformBackend,
    consts: &ConstArrays,
    currents: &Currents,
) -> Array2D {
    assert_grid(consts, currents.n(), "calculate_phi");

    let rhs_inner = (&currents.ro - &currents.jz).interior();

    dirichlet_solve(backend, &rhs_inner, &consts.dirichlet_matrix).pad_border()
}

pub fn calculate_bz(
    backend: &dyn TransformBackend,
    grid_step_size: f64,
    consts: &ConstArrays,
    currents: &Currents,
) -> Array2D {
    assert_grid(consts, currents.n(), "calculate_bz");

    // Derivatives are zero on the wall ring, so the RHS is a full-grid array with a zero border.
    let (_, djx_dy) = dx_dy(&currents.jx, grid_step_size);
    let (djy_dx, _) = dx_dy(&currents.jy, grid_step_size);
    let rhs = (&djx_dy - &djy_dx).map(|v| -v);

    let mut f = backend.cosine2d(&rhs);
    f.hadamard_assign(&consts.neumann_matrix);
    let mut bz = backend.cosine2d(&f);

    // Neumann solutions are defined up to a constant; the flux of Bz must vanish.
    let mean = bz.mean();
    bz.sub_scalar_assign(mean);
    bz
}

/// Interior-only Dirichlet solve: (n-2)×(n-2) in, (n-2)×(n-2) out.
pub fn dirichlet_solve(
    backend: &dyn TransformBackend,
    rhs_inner: &Array2D,
    dirichlet_matrix: &Array2D,
) -> Array2D {
    let mut f = backend.sine2d(rhs_inner);
    f.hadamard_assign(dirichlet_matrix);
    backend.sine2d(&f)
}
