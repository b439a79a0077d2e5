// src/transform/mod.rs
//
// Real separable transforms that diagonalise the 5-point Laplacian:
//   - DST-I along an axis  -> zero value on the walls of that axis (Dirichlet)
//   - DCT-I along an axis  -> zero normal derivative on the walls of that axis (Neumann)
//
// Both are unnormalised (scipy "type 1" conventions), so applying either one twice multiplies
// by 2(L+1) for DST-I of length L and by 2(L-1) for DCT-I of length L. On an n-node grid both
// factors are 2(n-1); the solver folds them into the const arrays.
//
// A backend only has to supply the two 1D line transforms. The 2D operations are provided:
// axis 1 (contiguous rows) is processed directly, axis 0 goes through a transpose. Line
// buffers live in a `LineWork` that is created once per worker and reused for every line it
// processes.

pub mod direct;
pub mod fft;

pub use direct::DirectBackend;
pub use fft::FftBackend;

use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::array2d::Array2D;

// Below this many elements the rayon split costs more than it saves.
static PAR_THRESHOLD: OnceLock<usize> = OnceLock::new();
const DEFAULT_PAR_THRESHOLD: usize = 16_384;

fn par_threshold() -> usize {
    *PAR_THRESHOLD.get_or_init(|| {
        std::env::var("QS_PIC_TRANSFORM_PAR_THRESHOLD")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAR_THRESHOLD)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Axis 0 (row index i).
    X,
    /// Axis 1 (column index j).
    Y,
}

/// Scratch space for one line transform. Buffers grow to the largest line seen and are then
/// reused, so a worker allocates once per 2D pass instead of once per line.
#[derive(Debug, Default)]
pub struct LineWork {
    buf: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
    copy: Vec<f64>,
}

pub trait TransformBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Unnormalised DST-I of one line, in place, using `work` for temporaries.
    fn dst1_with(&self, line: &mut [f64], work: &mut LineWork);

    /// Unnormalised DCT-I of one line, in place, using `work` for temporaries.
    fn dct1_with(&self, line: &mut [f64], work: &mut LineWork);

    fn dst1(&self, line: &mut [f64]) {
        self.dst1_with(line, &mut LineWork::default());
    }

    fn dct1(&self, line: &mut [f64]) {
        self.dct1_with(line, &mut LineWork::default());
    }

    fn dst1_axis(&self, a: &mut Array2D, axis: Axis) {
        apply_along(a, axis, |line, work| self.dst1_with(line, work));
    }

    fn dct1_axis(&self, a: &mut Array2D, axis: Axis) {
        apply_along(a, axis, |line, work| self.dct1_with(line, work));
    }

    /// DST-I in both axes (Dirichlet–Dirichlet). Input is an interior array.
    fn sine2d(&self, a: &Array2D) -> Array2D {
        let mut out = a.clone();
        self.dst1_axis(&mut out, Axis::X);
        self.dst1_axis(&mut out, Axis::Y);
        out
    }

    /// DCT-I in both axes (Neumann–Neumann). Input is a full-grid array.
    fn cosine2d(&self, a: &Array2D) -> Array2D {
        let mut out = a.clone();
        self.dct1_axis(&mut out, Axis::X);
        self.dct1_axis(&mut out, Axis::Y);
        out
    }

    /// DST-I along axis 0 then DCT-I along axis 1. Input is (n-2) × n; the caller re-pads the
    /// sine axis with zero rows when it needs a full grid.
    fn mixed2d(&self, a: &Array2D) -> Array2D {
        let mut out = a.clone();
        self.dst1_axis(&mut out, Axis::X);
        self.dct1_axis(&mut out, Axis::Y);
        out
    }
}

/// Run `f` over every line of `a` along `axis`.
fn apply_along<F>(a: &mut Array2D, axis: Axis, f: F)
where
    F: Fn(&mut [f64], &mut LineWork) + Send + Sync,
{
    if a.rows() == 0 || a.cols() == 0 {
        return;
    }
    match axis {
        Axis::Y => {
            let cols = a.cols();
            for_each_line(a.as_mut_slice(), cols, &f);
        }
        Axis::X => {
            // Columns become contiguous rows.
            let mut t = a.transpose();
            let len = t.cols();
            for_each_line(t.as_mut_slice(), len, &f);
            *a = t.transpose();
        }
    }
}

fn for_each_line<F>(data: &mut [f64], len: usize, f: &F)
where
    F: Fn(&mut [f64], &mut LineWork) + Send + Sync,
{
    if data.len() < par_threshold() {
        let mut work = LineWork::default();
        data.chunks_mut(len).for_each(|line| f(line, &mut work));
    } else {
        data.par_chunks_mut(len)
            .for_each_init(LineWork::default, |work, line| f(line, work));
    }
}

/// Which concrete backend the solver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// rustfft-based, O(n log n) per line.
    #[default]
    Fft,
    /// Direct evaluation of the defining sums, O(n²) per line.
    Direct,
}

impl TransformKind {
    pub fn build(self, n: usize) -> Arc<dyn TransformBackend> {
        match self {
            TransformKind::Fft => Arc::new(FftBackend::new(n)),
            TransformKind::Direct => Arc::new(DirectBackend),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Fft => "fft",
            TransformKind::Direct => "direct",
        }
    }
}
