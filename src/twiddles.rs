/*
 * // Copyright (c) 2025 the forkern contributors. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::err::{try_vec, KernelError};
use crate::parallel::{self, ExecutionMode};
use crate::traits::FftSample;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::AsPrimitive;

/// `exp(-2πi·index/fft_len)`, conjugated for the inverse direction.
///
/// The angle is always evaluated in `f64` and truncated to the sample type,
/// so `f32` transforms see the same roots the `f64` path does.
pub(crate) fn compute_twiddle<T: FftSample>(
    index: usize,
    fft_len: usize,
    direction: FftDirection,
) -> Complex<T>
where
    f64: AsPrimitive<T>,
{
    let angle = -2.0 * std::f64::consts::PI * index as f64 / fft_len as f64;
    let (v_sin, v_cos) = angle.sin_cos();

    let result = Complex {
        re: v_cos.as_(),
        im: v_sin.as_(),
    };

    match direction {
        FftDirection::Forward => result,
        FftDirection::Inverse => result.conj(),
    }
}

const TWIDDLE_FILL_THRESHOLD: usize = 128;

/// Root-of-unity table `W[k] = exp(-2πik/n)` for `k in [0, n]`.
///
/// The table carries one extra entry so that stride walks which land exactly
/// on `n` never wrap. Only `[0, n/2]` is evaluated trigonometrically; each
/// leaf stores `W[k]` and its mirror `W[n-k] = conj(W[k])` in the same pass.
pub(crate) fn build_twiddle_table<T: FftSample>(
    n: usize,
    direction: FftDirection,
    mode: ExecutionMode,
) -> Result<Vec<Complex<T>>, KernelError>
where
    f64: AsPrimitive<T>,
{
    let mut w = try_vec![Complex::<T>::default(); n + 1];
    let half = n / 2;
    let (lower, upper) = w.split_at_mut(half + 1);
    fill_rec(mode, 0, lower, upper, n, direction);
    Ok(w)
}

/// `lower` holds indices `base..base + lower.len()`; `upper` holds their
/// mirrors in reverse, `upper[upper.len() - 1 - i] = W[n - (base + i)]`.
/// `upper` may be one shorter than `lower` when the midpoint `n/2` of an
/// even `n` is its own mirror; that index stays in the rightmost branch.
fn fill_rec<T: FftSample>(
    mode: ExecutionMode,
    base: usize,
    lower: &mut [Complex<T>],
    upper: &mut [Complex<T>],
    n: usize,
    direction: FftDirection,
) where
    f64: AsPrimitive<T>,
{
    let c = upper.len();
    if lower.len() < TWIDDLE_FILL_THRESHOLD {
        for (i, slot) in lower.iter_mut().enumerate() {
            let t = compute_twiddle(base + i, n, direction);
            *slot = t;
            if i < c {
                upper[c - 1 - i] = t.conj();
            }
        }
        return;
    }
    let mid = lower.len() / 2;
    let (lo_left, lo_right) = lower.split_at_mut(mid);
    let (up_right, up_left) = upper.split_at_mut(c - mid);
    parallel::join(
        mode,
        || fill_rec(mode, base, lo_left, up_left, n, direction),
        || fill_rec(mode, base + mid, lo_right, up_right, n, direction),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoints_and_quarters() {
        let w = build_twiddle_table::<f64>(16, FftDirection::Forward, ExecutionMode::Sequential)
            .unwrap();
        assert_eq!(w.len(), 17);
        assert!((w[0].re - 1.0).abs() < 1e-12 && w[0].im.abs() < 1e-12);
        assert!(w[4].re.abs() < 1e-12 && (w[4].im + 1.0).abs() < 1e-12);
        assert!((w[8].re + 1.0).abs() < 1e-12 && w[8].im.abs() < 1e-12);
        assert!((w[16].re - 1.0).abs() < 1e-12 && w[16].im.abs() < 1e-12);
    }

    #[test]
    fn test_mirror_fill_writes_every_entry() {
        // Odd lengths leave the upper slice one short of the lower; every
        // slot must still match the directly evaluated root.
        for n in [255usize, 256] {
            for mode in [ExecutionMode::Parallel, ExecutionMode::Sequential] {
                let w = build_twiddle_table::<f64>(n, FftDirection::Forward, mode).unwrap();
                assert_eq!(w.len(), n + 1);
                for k in 0..=n {
                    let direct = compute_twiddle::<f64>(k, n, FftDirection::Forward);
                    assert!((w[k].re - direct.re).abs() < 1e-12, "n={} k={}", n, k);
                    assert!((w[k].im - direct.im).abs() < 1e-12, "n={} k={}", n, k);
                }
            }
        }
    }

    #[test]
    fn test_conjugate_symmetry_and_direction() {
        let n = 360;
        let fwd =
            build_twiddle_table::<f64>(n, FftDirection::Forward, ExecutionMode::Parallel).unwrap();
        let inv = build_twiddle_table::<f64>(n, FftDirection::Inverse, ExecutionMode::Sequential)
            .unwrap();
        for k in 0..=n {
            let sym = fwd[n - k].conj();
            assert!((fwd[k].re - sym.re).abs() < 1e-12);
            assert!((fwd[k].im - sym.im).abs() < 1e-12);
            assert!((fwd[k].re - inv[k].re).abs() < 1e-12);
            assert!((fwd[k].im + inv[k].im).abs() < 1e-12);
        }
    }
}
