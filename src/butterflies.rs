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

//! Unrolled fixed-size butterflies.
//!
//! `FastButterfly2`/`4` are the primitive combiners; 8, 16 and 32 are built
//! by splitting into interleaved subsequences and cross-combining with
//! stored twiddle constants. The same value-level kernels back both the
//! base-case transforms and the twiddle-combine passes.

use crate::traits::{c_mul, FftSample};
use crate::twiddles::compute_twiddle;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::AsPrimitive;
use std::marker::PhantomData;

/// `value * (-i)` for the forward direction, `value * i` for the inverse.
#[inline]
pub(crate) fn rotate_90<T: FftSample>(value: Complex<T>, direction: FftDirection) -> Complex<T> {
    match direction {
        FftDirection::Forward => Complex::new(value.im, -value.re),
        FftDirection::Inverse => Complex::new(-value.im, value.re),
    }
}

pub(crate) struct FastButterfly2<T> {
    phantom_data: PhantomData<T>,
}

impl<T: FftSample> FastButterfly2<T> {
    pub(crate) fn new(_: FftDirection) -> Self {
        Self {
            phantom_data: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn butterfly2(&self, u0: Complex<T>, u1: Complex<T>) -> (Complex<T>, Complex<T>) {
        (u0 + u1, u0 - u1)
    }
}

pub(crate) struct FastButterfly4<T> {
    direction: FftDirection,
    phantom_data: PhantomData<T>,
}

impl<T: FftSample> FastButterfly4<T> {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            direction: fft_direction,
            phantom_data: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn butterfly4(
        &self,
        a: Complex<T>,
        b: Complex<T>,
        c: Complex<T>,
        d: Complex<T>,
    ) -> (Complex<T>, Complex<T>, Complex<T>, Complex<T>) {
        let t0 = a + c;
        let t1 = a - c;
        let t2 = b + d;
        let z3 = b - d;
        let t3 = rotate_90(z3, self.direction);

        (t0 + t2, t1 + t3, t0 - t2, t1 - t3)
    }
}

pub(crate) struct FastButterfly8<T> {
    direction: FftDirection,
    root2: T,
    bf4: FastButterfly4<T>,
    bf2: FastButterfly2<T>,
}

impl<T: FftSample> FastButterfly8<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            direction: fft_direction,
            root2: (0.5f64.sqrt()).as_(),
            bf4: FastButterfly4::new(fft_direction),
            bf2: FastButterfly2::new(fft_direction),
        }
    }

    #[inline]
    pub(crate) fn butterfly8(&self, x: [Complex<T>; 8]) -> [Complex<T>; 8] {
        let (u0, u2, u4, u6) = self.bf4.butterfly4(x[0], x[2], x[4], x[6]);
        let (u1, mut u3, mut u5, mut u7) = self.bf4.butterfly4(x[1], x[3], x[5], x[7]);

        u3 = (rotate_90(u3, self.direction) + u3) * self.root2;
        u5 = rotate_90(u5, self.direction);
        u7 = (rotate_90(u7, self.direction) - u7) * self.root2;

        let (y0, y4) = self.bf2.butterfly2(u0, u1);
        let (y1, y5) = self.bf2.butterfly2(u2, u3);
        let (y2, y6) = self.bf2.butterfly2(u4, u5);
        let (y3, y7) = self.bf2.butterfly2(u6, u7);

        [y0, y1, y2, y3, y4, y5, y6, y7]
    }
}

/// 16 = four interleaved 4-point transforms cross-combined by a 4-point
/// butterfly, with the nine W16 constants the cross terms need.
pub(crate) struct FastButterfly16<T> {
    bf4: FastButterfly4<T>,
    twiddles: [[Complex<T>; 3]; 3],
}

impl<T: FftSample> FastButterfly16<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        let mut twiddles = [[Complex::default(); 3]; 3];
        for (q, row) in twiddles.iter_mut().enumerate() {
            for (k, slot) in row.iter_mut().enumerate() {
                *slot = compute_twiddle((q + 1) * (k + 1), 16, fft_direction);
            }
        }
        Self {
            bf4: FastButterfly4::new(fft_direction),
            twiddles,
        }
    }

    #[inline]
    pub(crate) fn butterfly16(&self, x: [Complex<T>; 16]) -> [Complex<T>; 16] {
        let a0 = self.bf4.butterfly4(x[0], x[4], x[8], x[12]);
        let a1 = self.bf4.butterfly4(x[1], x[5], x[9], x[13]);
        let a2 = self.bf4.butterfly4(x[2], x[6], x[10], x[14]);
        let a3 = self.bf4.butterfly4(x[3], x[7], x[11], x[15]);
        let a = [
            [a0.0, a0.1, a0.2, a0.3],
            [a1.0, a1.1, a1.2, a1.3],
            [a2.0, a2.1, a2.2, a2.3],
            [a3.0, a3.1, a3.2, a3.3],
        ];

        let mut y = [Complex::default(); 16];
        let (y0, y4, y8, y12) = self.bf4.butterfly4(a[0][0], a[1][0], a[2][0], a[3][0]);
        y[0] = y0;
        y[4] = y4;
        y[8] = y8;
        y[12] = y12;
        for k in 1..4 {
            let (u0, u4, u8, u12) = self.bf4.butterfly4(
                a[0][k],
                c_mul(a[1][k], self.twiddles[0][k - 1]),
                c_mul(a[2][k], self.twiddles[1][k - 1]),
                c_mul(a[3][k], self.twiddles[2][k - 1]),
            );
            y[k] = u0;
            y[k + 4] = u4;
            y[k + 8] = u8;
            y[k + 12] = u12;
        }
        y
    }
}

/// 32 = four interleaved 8-point transforms cross-combined by a 4-point
/// butterfly with twenty-one W32 constants.
pub(crate) struct FastButterfly32<T> {
    bf8: FastButterfly8<T>,
    bf4: FastButterfly4<T>,
    twiddles: [[Complex<T>; 7]; 3],
}

impl<T: FftSample> FastButterfly32<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        let mut twiddles = [[Complex::default(); 7]; 3];
        for (q, row) in twiddles.iter_mut().enumerate() {
            for (k, slot) in row.iter_mut().enumerate() {
                *slot = compute_twiddle((q + 1) * (k + 1), 32, fft_direction);
            }
        }
        Self {
            bf8: FastButterfly8::new(fft_direction),
            bf4: FastButterfly4::new(fft_direction),
            twiddles,
        }
    }

    #[inline]
    pub(crate) fn butterfly32(&self, x: [Complex<T>; 32]) -> [Complex<T>; 32] {
        let mut sub = [[Complex::default(); 8]; 4];
        for (j, s) in sub.iter_mut().enumerate() {
            let mut lane = [Complex::default(); 8];
            for (t, slot) in lane.iter_mut().enumerate() {
                *slot = x[j + 4 * t];
            }
            *s = self.bf8.butterfly8(lane);
        }

        let mut y = [Complex::default(); 32];
        let (y0, y8, y16, y24) = self
            .bf4
            .butterfly4(sub[0][0], sub[1][0], sub[2][0], sub[3][0]);
        y[0] = y0;
        y[8] = y8;
        y[16] = y16;
        y[24] = y24;
        for k in 1..8 {
            let (u0, u8, u16, u24) = self.bf4.butterfly4(
                sub[0][k],
                c_mul(sub[1][k], self.twiddles[0][k - 1]),
                c_mul(sub[2][k], self.twiddles[1][k - 1]),
                c_mul(sub[3][k], self.twiddles[2][k - 1]),
            );
            y[k] = u0;
            y[k + 8] = u8;
            y[k + 16] = u16;
            y[k + 24] = u24;
        }
        y
    }
}

/// All base-case kernels for one direction, built once per transform.
pub(crate) struct BaseKernels<T> {
    pub(crate) bf2: FastButterfly2<T>,
    pub(crate) bf4: FastButterfly4<T>,
    pub(crate) bf8: FastButterfly8<T>,
    pub(crate) bf16: FastButterfly16<T>,
    pub(crate) bf32: FastButterfly32<T>,
}

impl<T: FftSample> BaseKernels<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(direction: FftDirection) -> Self {
        Self {
            bf2: FastButterfly2::new(direction),
            bf4: FastButterfly4::new(direction),
            bf8: FastButterfly8::new(direction),
            bf16: FastButterfly16::new(direction),
            bf32: FastButterfly32::new(direction),
        }
    }

    /// Runs the unrolled transform for `src.len() ∈ {2,4,8,16,32}`.
    /// Returns `false` for any other length, leaving `dst` untouched.
    pub(crate) fn execute_out_of_place(&self, src: &[Complex<T>], dst: &mut [Complex<T>]) -> bool {
        match src.len() {
            2 => {
                let (y0, y1) = self.bf2.butterfly2(src[0], src[1]);
                dst[0] = y0;
                dst[1] = y1;
            }
            4 => {
                let (y0, y1, y2, y3) = self.bf4.butterfly4(src[0], src[1], src[2], src[3]);
                dst[0] = y0;
                dst[1] = y1;
                dst[2] = y2;
                dst[3] = y3;
            }
            8 => {
                let mut x = [Complex::default(); 8];
                x.copy_from_slice(src);
                dst.copy_from_slice(&self.bf8.butterfly8(x));
            }
            16 => {
                let mut x = [Complex::default(); 16];
                x.copy_from_slice(src);
                dst.copy_from_slice(&self.bf16.butterfly16(x));
            }
            32 => {
                let mut x = [Complex::default(); 32];
                x.copy_from_slice(src);
                dst.copy_from_slice(&self.bf32.butterfly32(x));
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_dft(input: &[Complex<f64>], direction: FftDirection) -> Vec<Complex<f64>> {
        let n = input.len();
        let sign = match direction {
            FftDirection::Forward => -1.0,
            FftDirection::Inverse => 1.0,
        };
        (0..n)
            .map(|k| {
                let mut acc = Complex::new(0.0, 0.0);
                for (j, v) in input.iter().enumerate() {
                    let angle = sign * 2.0 * std::f64::consts::PI * (j * k) as f64 / n as f64;
                    acc += v * Complex::new(angle.cos(), angle.sin());
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_base_kernels_match_direct_dft() {
        use rand::Rng;
        let mut rng = rand::rng();
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            let kernels = BaseKernels::<f64>::new(direction);
            for n in [2usize, 4, 8, 16, 32] {
                let src: Vec<Complex<f64>> = (0..n)
                    .map(|_| Complex::new(rng.random(), rng.random()))
                    .collect();
                let mut dst = vec![Complex::new(0.0, 0.0); n];
                assert!(kernels.execute_out_of_place(&src, &mut dst));
                let reference = reference_dft(&src, direction);
                for (got, want) in dst.iter().zip(reference.iter()) {
                    assert!(
                        (got.re - want.re).abs() < 1e-9 && (got.im - want.im).abs() < 1e-9,
                        "n = {}, {:?}: got {:?}, want {:?}",
                        n,
                        direction,
                        got,
                        want
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_base_length_is_rejected() {
        let kernels = BaseKernels::<f64>::new(FftDirection::Forward);
        let src = vec![Complex::new(1.0, 0.0); 6];
        let mut dst = vec![Complex::new(0.0, 0.0); 6];
        assert!(!kernels.execute_out_of_place(&src, &mut dst));
    }
}
