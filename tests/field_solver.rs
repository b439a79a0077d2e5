// tests/field_solver.rs
//
// End-to-end checks of FieldComputer::compute_fields (physics sanity + invariants).
// Run with: cargo test --test field_solver

use qs_pic::transform::TransformKind;
use qs_pic::{Array2D, ConstArrays, Currents, FieldComputer, FieldSolverConfig, Fields};

struct Slice {
    full: Currents,
    prev: Currents,
    beam_full: Array2D,
    beam_prev: Array2D,
}

impl Slice {
    fn empty(n: usize) -> Self {
        Self {
            full: Currents::zeros(n),
            prev: Currents::zeros(n),
            beam_full: Array2D::square(n),
            beam_prev: Array2D::square(n),
        }
    }
}

fn config(n: usize, h: f64, xi: f64, trick: f64, variant_a: bool) -> FieldSolverConfig {
    FieldSolverConfig {
        window_width_steps: n,
        grid_step_size: h,
        xi_step_size: xi,
        trick,
        variant_a,
        transform: TransformKind::Fft,
    }
}

fn solve(
    cfg: &FieldSolverConfig,
    slice: &Slice,
    fields_avg: &Fields,
    flds_prev: &Fields,
) -> (Fields, Fields) {
    let consts = ConstArrays::new(&cfg.grid(), cfg.trick);
    FieldComputer::new(cfg).unwrap().compute_fields(
        fields_avg,
        flds_prev,
        &consts,
        &slice.beam_full,
        &slice.beam_prev,
        &slice.prev,
        &slice.full,
    )
}

fn xorshift64(seed: &mut u64) -> u64 {
    let mut x = *seed;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *seed = x;
    x
}

/// Pseudo-random values in [-1, 1) on the region two cells in from the wall, zero elsewhere.
fn noisy_blob(n: usize, seed: &mut u64) -> Array2D {
    Array2D::from_fn(n, n, |i, j| {
        if i >= 2 && j >= 2 && i + 2 < n && j + 2 < n {
            2.0 * (xorshift64(seed) as f64 / u64::MAX as f64) - 1.0
        } else {
            0.0
        }
    })
}

fn busy_slice(n: usize, seed: u64) -> Slice {
    let mut s = seed;
    Slice {
        full: Currents {
            jx: noisy_blob(n, &mut s),
            jy: noisy_blob(n, &mut s),
            jz: noisy_blob(n, &mut s),
            ro: noisy_blob(n, &mut s),
        },
        prev: Currents {
            jx: noisy_blob(n, &mut s),
            jy: noisy_blob(n, &mut s),
            jz: noisy_blob(n, &mut s),
            ro: noisy_blob(n, &mut s),
        },
        beam_full: noisy_blob(n, &mut s),
        beam_prev: noisy_blob(n, &mut s),
    }
}

fn neg_laplacian(u: &Array2D, h: f64, i: usize, j: usize) -> f64 {
    (4.0 * u.get(i, j) - u.get(i + 1, j) - u.get(i - 1, j) - u.get(i, j + 1) - u.get(i, j - 1))
        / (h * h)
}

#[test]
fn zero_sources_give_zero_fields() {
    let n = 9;
    let cfg = config(n, 0.1, 0.1, 1.0, false);
    let zeros = Fields::zeros(n);
    let (new, avg) = solve(&cfg, &Slice::empty(n), &zeros, &zeros);
    assert_eq!(new, zeros);
    assert_eq!(avg, zeros);

    let cfg = config(n, 0.1, 0.1, 1.0, true);
    let (new, _) = solve(&cfg, &Slice::empty(n), &zeros, &zeros);
    assert_eq!(new, zeros);
}

#[test]
fn dirichlet_components_vanish_on_their_walls() {
    let n = 14;
    let cfg = config(n, 0.15, 0.05, 0.8, false);
    let zeros = Fields::zeros(n);
    let (f, _) = solve(&cfg, &busy_slice(n, 0x9E37_79B9_7F4A_7C15), &zeros, &zeros);

    for k in 0..n {
        for (a, b) in [(0, k), (n - 1, k), (k, 0), (k, n - 1)] {
            assert_eq!(f.ez.get(a, b), 0.0, "Ez at ({}, {})", a, b);
            assert_eq!(f.phi.get(a, b), 0.0, "Phi at ({}, {})", a, b);
        }
        // x walls
        assert_eq!(f.ey.get(0, k), 0.0);
        assert_eq!(f.ey.get(n - 1, k), 0.0);
        assert_eq!(f.bx.get(0, k), 0.0);
        assert_eq!(f.bx.get(n - 1, k), 0.0);
        // y walls
        assert_eq!(f.ex.get(k, 0), 0.0);
        assert_eq!(f.ex.get(k, n - 1), 0.0);
        assert_eq!(f.by.get(k, 0), 0.0);
        assert_eq!(f.by.get(k, n - 1), 0.0);
    }
    assert!(f.ex.max_abs() > 0.0 && f.bz.max_abs() > 0.0);
}

#[test]
fn bz_has_zero_mean_for_any_currents() {
    let n = 10;
    let cfg = config(n, 0.2, 0.1, 1.0, false);
    let zeros = Fields::zeros(n);

    // Deliberately asymmetric and touching the next-to-wall ring.
    let mut slice = Slice::empty(n);
    slice.full.jx = Array2D::from_fn(n, n, |i, j| {
        if i > 0 && j > 0 && i < n - 1 && j < n - 1 { (i * j) as f64 * 0.01 } else { 0.0 }
    });
    slice.full.jy.set(1, 7, 2.0);

    let (f, _) = solve(&cfg, &slice, &zeros, &zeros);
    assert!(f.bz.mean().abs() < 1e-12, "mean = {}", f.bz.mean());
    assert!(f.bz.max_abs() > 0.0);
}

#[test]
fn averaged_fields_are_componentwise_mean() {
    let n = 8;
    let cfg = config(n, 0.1, 0.1, 1.0, false);
    let slice = busy_slice(n, 7);

    let mut prev = Fields::zeros(n);
    prev.ex = Array2D::filled(n, n, 0.3);
    prev.bz = Array2D::from_fn(n, n, |i, j| i as f64 - j as f64);
    prev.phi.set(3, 3, -2.0);

    let (new, avg) = solve(&cfg, &slice, &prev, &prev);
    for (x, (a, b)) in avg
        .components()
        .iter()
        .zip(new.components().iter().zip(prev.components().iter()))
    {
        let expected = a.zip_with(b, |p, q| (p + q) / 2.0);
        assert!(x.max_abs_diff(&expected) < 1e-15);
    }
}

#[test]
fn variant_a_has_stationary_fixed_point() {
    let n = 11;
    let slice = busy_slice(n, 42);
    let avg = Fields::zeros(n);

    // Plain solve gives the stationary solution...
    let (solved, _) = solve(&config(n, 0.1, 0.2, 1.0, false), &slice, &avg, &Fields::zeros(n));

    // ...which extrapolation against itself must reproduce.
    let (extrapolated, _) = solve(&config(n, 0.1, 0.2, 1.0, true), &slice, &avg, &solved);
    assert!(extrapolated.max_abs_diff(&solved) < 1e-12);

    // Against a different previous slice it is exactly 2·solved − prev on Ex/Ey/Bx/By only.
    let mut other = Fields::zeros(n);
    other.ey = Array2D::filled(n, n, 0.5);
    other.ez = Array2D::filled(n, n, 9.0);
    let (ext, _) = solve(&config(n, 0.1, 0.2, 1.0, true), &slice, &avg, &other);
    let expected_ey = solved.ey.zip_with(&other.ey, |a, b| 2.0 * a - b);
    assert!(ext.ey.max_abs_diff(&expected_ey) < 1e-12);
    assert!(ext.ex.max_abs_diff(&(&solved.ex * 2.0)) < 1e-12);
    assert!(ext.ez.max_abs_diff(&solved.ez) < 1e-12);
}

#[test]
fn point_charge_phi_on_5x5() {
    let n = 5;
    let cfg = config(n, 1.0, 1.0, 0.0, false);
    let mut slice = Slice::empty(n);
    slice.full.ro.set(2, 2, 1.0);
    let zeros = Fields::zeros(n);

    let (f, _) = solve(&cfg, &slice, &zeros, &zeros);
    let phi = &f.phi;

    // Inverse of the 3x3 interior Dirichlet Laplacian applied to the centre impulse.
    assert!((phi.get(2, 2) - 3.0 / 8.0).abs() < 1e-12);
    assert!((phi.get(1, 2) - 1.0 / 8.0).abs() < 1e-12);
    assert!((phi.get(1, 1) - 1.0 / 16.0).abs() < 1e-12);

    // 90° rotation about the centre: (i, j) -> (j, n-1-i)
    for i in 0..n {
        for j in 0..n {
            assert!((phi.get(i, j) - phi.get(j, n - 1 - i)).abs() < 1e-14);
        }
    }

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let rhs = if (i, j) == (2, 2) { 1.0 } else { 0.0 };
            assert!((neg_laplacian(phi, 1.0, i, j) - rhs).abs() < 1e-12);
        }
    }
}

#[test]
fn trick_term_alone_drives_transverse_fields() {
    let n = 9;
    let h = 0.25;
    let trick = 2.0;
    let cfg = config(n, h, 0.1, trick, false);
    let slice = Slice::empty(n);
    let zeros = Fields::zeros(n);

    let with_ex_avg = |c: f64| {
        let mut avg = Fields::zeros(n);
        avg.ex = Array2D::filled(n, n, c);
        solve(&cfg, &slice, &avg, &zeros).0
    };
    let one = with_ex_avg(1.0);
    let three = with_ex_avg(3.0);

    assert!(one.ex.max_abs() > 0.0);
    assert!(three.ex.max_abs_diff(&(&one.ex * 3.0)) < 1e-12);
    for other in [&one.ey, &one.bx, &one.by, &one.ez, &one.bz, &one.phi] {
        assert_eq!(other.max_abs(), 0.0);
    }

    // (−∇² + trick) Ex = trick · c away from the walls.
    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let lhs = neg_laplacian(&one.ex, h, i, j) + trick * one.ex.get(i, j);
            assert!((lhs - trick).abs() < 1e-9, "({}, {}): {}", i, j, lhs);
        }
    }
}

#[test]
fn beam_enters_transverse_fields_through_both_slices() {
    let n = 9;
    let cfg = config(n, 0.2, 0.1, 1.0, false);
    let zeros = Fields::zeros(n);

    let mut on_full = Slice::empty(n);
    on_full.beam_full.set(4, 4, 1.0);
    let mut on_prev = Slice::empty(n);
    on_prev.beam_prev.set(4, 4, 1.0);

    let (a, _) = solve(&cfg, &on_full, &zeros, &zeros);
    let (b, _) = solve(&cfg, &on_prev, &zeros, &zeros);
    assert!(a.ex.max_abs() > 0.0);
    assert!(a.max_abs_diff(&b) < 1e-14);
    // Beam density does not feed the longitudinal solves.
    assert_eq!(a.phi.max_abs(), 0.0);
    assert_eq!(a.ez.max_abs(), 0.0);
}

#[test]
fn symmetric_charge_gives_mirrored_ex_ey() {
    let n = 11;
    let cfg = config(n, 0.1, 0.1, 1.0, false);
    let mut slice = Slice::empty(n);
    slice.full.ro.set(5, 5, 1.0);
    slice.prev.ro.set(5, 5, 1.0);
    let zeros = Fields::zeros(n);

    let (f, _) = solve(&cfg, &slice, &zeros, &zeros);
    // Ey is Ex with the axes swapped.
    assert!(f.ey.max_abs_diff(&f.ex.transpose()) < 1e-12);
    // Field points away from a positive charge: Ex > 0 at larger x.
    assert!(f.ex.get(6, 5) > 0.0 && f.ex.get(4, 5) < 0.0);
}
