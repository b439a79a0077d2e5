// src/transform/fft.rs
//
// DST-I / DCT-I through one complex FFT of length 2(n-1).
//
// DST-I of x[0..m], m = n-2: odd extension
//   z = [0, x0, .., x_{m-1}, 0, -x_{m-1}, .., -x0]        (length 2(m+1))
//   y[k] = -Im Z[k+1]
//
// DCT-I of x[0..n]: even extension
//   z = [x0, .., x_{n-1}, x_{n-2}, .., x1]                 (length 2(n-1))
//   y[k] = Re Z[k]
//
// Both extensions have the same length, so a single forward plan serves every line of every
// solve on this grid. The extension buffer and the plan's scratch come from the caller's
// `LineWork`.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use super::{LineWork, TransformBackend};

pub struct FftBackend {
    n: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl FftBackend {
    pub fn new(n: usize) -> Self {
        assert!(n >= 3, "FftBackend::new: grid must have at least 3 nodes per side (n={})", n);
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(2 * (n - 1));
        Self { n, fft }
    }

    /// Zeroed extension buffer of length 2(n-1).
    fn extension<'w>(&self, work: &'w mut LineWork) -> &'w mut [Complex<f64>] {
        let len = 2 * (self.n - 1);
        work.buf.clear();
        work.buf.resize(len, Complex::new(0.0, 0.0));
        &mut work.buf
    }

    fn run(&self, work: &mut LineWork) {
        let need = self.fft.get_inplace_scratch_len();
        if work.scratch.len() < need {
            work.scratch.resize(need, Complex::new(0.0, 0.0));
        }
        self.fft
            .process_with_scratch(&mut work.buf, &mut work.scratch[..need]);
    }
}

impl TransformBackend for FftBackend {
    fn name(&self) -> &'static str {
        "fft"
    }

    fn dst1_with(&self, line: &mut [f64], work: &mut LineWork) {
        let m = line.len();
        assert_eq!(
            m,
            self.n - 2,
            "FftBackend::dst1: line length {} does not match interior size {}",
            m,
            self.n - 2
        );

        let buf = self.extension(work);
        let len = buf.len();
        for (k, &v) in line.iter().enumerate() {
            buf[k + 1] = Complex::new(v, 0.0);
            buf[len - 1 - k] = Complex::new(-v, 0.0);
        }

        self.run(work);

        for (k, out) in line.iter_mut().enumerate() {
            *out = -work.buf[k + 1].im;
        }
    }

    fn dct1_with(&self, line: &mut [f64], work: &mut LineWork) {
        let n = line.len();
        assert_eq!(
            n, self.n,
            "FftBackend::dct1: line length {} does not match grid size {}",
            n, self.n
        );

        let buf = self.extension(work);
        let len = buf.len();
        for (k, &v) in line.iter().enumerate() {
            buf[k] = Complex::new(v, 0.0);
            if k > 0 && k < n - 1 {
                buf[len - k] = Complex::new(v, 0.0);
            }
        }

        self.run(work);

        for (k, out) in line.iter_mut().enumerate() {
            *out = work.buf[k].re;
        }
    }
}
