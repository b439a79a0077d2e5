// src/transform/direct.rs

use std::f64::consts::PI;

use super::{LineWork, TransformBackend};

/// Evaluates the DST-I / DCT-I sums term by term. Works for any line length.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectBackend;

impl TransformBackend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    /// y[k] = 2 Σ_n x[n] sin(π (k+1)(n+1) / (m+1))
    fn dst1_with(&self, line: &mut [f64], work: &mut LineWork) {
        let m = line.len();
        work.copy.clear();
        work.copy.extend_from_slice(line);
        let x = &work.copy;
        let w = PI / (m as f64 + 1.0);
        for (k, out) in line.iter_mut().enumerate() {
            let mut s = 0.0;
            for (n, &v) in x.iter().enumerate() {
                s += v * (w * ((k + 1) * (n + 1)) as f64).sin();
            }
            *out = 2.0 * s;
        }
    }

    /// y[k] = x[0] + (-1)^k x[N-1] + 2 Σ_{n=1}^{N-2} x[n] cos(π k n / (N-1))
    fn dct1_with(&self, line: &mut [f64], work: &mut LineWork) {
        let len = line.len();
        assert!(len >= 2, "DirectBackend::dct1: DCT-I needs at least 2 points (got {})", len);
        work.copy.clear();
        work.copy.extend_from_slice(line);
        let x = &work.copy;
        let w = PI / (len as f64 - 1.0);
        for (k, out) in line.iter_mut().enumerate() {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            let mut s = x[0] + sign * x[len - 1];
            for n in 1..len - 1 {
                s += 2.0 * x[n] * (w * (k * n) as f64).cos();
            }
            *out = s;
        }
    }
}
