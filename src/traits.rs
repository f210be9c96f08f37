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
use num_complex::Complex;
use num_traits::{Float, MulAdd};

/// Sample type of the FFT datapath.
///
/// The transform itself runs in `T`; twiddle factors are computed with `f64`
/// trigonometry and truncated to `T` at construction.
pub trait FftSample:
    Float + Default + MulAdd<Self, Output = Self> + Send + Sync + 'static
{
}

impl FftSample for f32 {}
impl FftSample for f64 {}

/// `a * b`, real and imaginary parts fused where the target allows it.
#[inline]
pub(crate) fn c_mul<T: FftSample>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    Complex {
        re: Float::mul_add(a.re, b.re, -(a.im * b.im)),
        im: Float::mul_add(a.re, b.im, a.im * b.re),
    }
}

/// `acc + a * b`.
#[inline]
pub(crate) fn c_mul_add<T: FftSample>(
    a: Complex<T>,
    b: Complex<T>,
    acc: Complex<T>,
) -> Complex<T> {
    Complex {
        re: Float::mul_add(a.re, b.re, Float::mul_add(a.im, -b.im, acc.re)),
        im: Float::mul_add(a.re, b.im, Float::mul_add(a.im, b.re, acc.im)),
    }
}
