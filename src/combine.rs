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

//! Twiddle-and-combine passes folding `r` sub-transforms of length `m`
//! into the length-`r·m` spectrum.
//!
//! Column `i` loads element `i` of every group, multiplies group `k` by
//! `W[k · n_w_dn · i]` and runs the radix-`r` butterfly; output `s` of the
//! butterfly lands at `dst[i + s·m]`. Radixes with an unrolled butterfly
//! get a wide-leaf pass; every other radix (including the prime case
//! `r == n`, `m == 1`) goes through the quadratic per-column kernel.

use crate::butterflies::BaseKernels;
use crate::parallel::{self, ExecutionMode};
use crate::traits::{c_mul, c_mul_add, FftSample};
use num_complex::Complex;
use num_traits::AsPrimitive;

const SPECIALIZED_THRESHOLD: usize = 128;

pub(crate) fn twiddle_pass<T: FftSample>(
    mode: ExecutionMode,
    r: usize,
    src: &[Complex<T>],
    dst: &mut [Complex<T>],
    w: &[Complex<T>],
    n_w: usize,
    n_w_dn: usize,
    m: usize,
    kernels: &BaseKernels<T>,
) where
    f64: AsPrimitive<T>,
{
    let rows: Vec<&mut [Complex<T>]> = dst.chunks_exact_mut(m).collect();
    match r {
        2 | 4 | 8 | 16 | 32 => {
            twiddle_rec(mode, r, src, rows, 0, w, n_w_dn, m, kernels);
        }
        _ => {
            twiddle_gen_rec(mode, r, src, rows, 0, w, n_w, n_w_dn, m);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn twiddle_rec<T: FftSample>(
    mode: ExecutionMode,
    r: usize,
    src: &[Complex<T>],
    mut rows: Vec<&mut [Complex<T>]>,
    base: usize,
    w: &[Complex<T>],
    n_w_dn: usize,
    m: usize,
    kernels: &BaseKernels<T>,
) where
    f64: AsPrimitive<T>,
{
    let width = rows[0].len();
    if width < SPECIALIZED_THRESHOLD {
        for idx in 0..width {
            let col = base + idx;
            let l1 = n_w_dn * col;
            match r {
                2 => {
                    let v1 = c_mul(src[col + m], w[l1]);
                    let (y0, y1) = kernels.bf2.butterfly2(src[col], v1);
                    rows[0][idx] = y0;
                    rows[1][idx] = y1;
                }
                4 => {
                    let (y0, y1, y2, y3) = kernels.bf4.butterfly4(
                        src[col],
                        c_mul(src[col + m], w[l1]),
                        c_mul(src[col + 2 * m], w[2 * l1]),
                        c_mul(src[col + 3 * m], w[3 * l1]),
                    );
                    rows[0][idx] = y0;
                    rows[1][idx] = y1;
                    rows[2][idx] = y2;
                    rows[3][idx] = y3;
                }
                8 => {
                    let mut v = [Complex::default(); 8];
                    v[0] = src[col];
                    for (k, slot) in v.iter_mut().enumerate().skip(1) {
                        *slot = c_mul(src[col + k * m], w[k * l1]);
                    }
                    let y = kernels.bf8.butterfly8(v);
                    for (k, row) in rows.iter_mut().enumerate() {
                        row[idx] = y[k];
                    }
                }
                16 => {
                    let mut v = [Complex::default(); 16];
                    v[0] = src[col];
                    for (k, slot) in v.iter_mut().enumerate().skip(1) {
                        *slot = c_mul(src[col + k * m], w[k * l1]);
                    }
                    let y = kernels.bf16.butterfly16(v);
                    for (k, row) in rows.iter_mut().enumerate() {
                        row[idx] = y[k];
                    }
                }
                _ => {
                    let mut v = [Complex::default(); 32];
                    v[0] = src[col];
                    for (k, slot) in v.iter_mut().enumerate().skip(1) {
                        *slot = c_mul(src[col + k * m], w[k * l1]);
                    }
                    let y = kernels.bf32.butterfly32(v);
                    for (k, row) in rows.iter_mut().enumerate() {
                        row[idx] = y[k];
                    }
                }
            }
        }
        return;
    }
    let mid = width / 2;
    let (left, right) = parallel::split_columns(rows, mid);
    parallel::join(
        mode,
        || twiddle_rec(mode, r, src, left, base, w, n_w_dn, m, kernels),
        || twiddle_rec(mode, r, src, right, base + mid, w, n_w_dn, m, kernels),
    );
}

/// One column of the generic combine: a full radix-`r` DFT with the
/// twiddle walk folded in. `l0` stays in `[0, n_w]` by a single wrap
/// subtraction; the table carries `n_w + 1` entries so `l0 == n_w` is a
/// valid index.
#[allow(clippy::too_many_arguments)]
fn twiddle_gen_rec<T: FftSample>(
    mode: ExecutionMode,
    r: usize,
    src: &[Complex<T>],
    mut rows: Vec<&mut [Complex<T>]>,
    base: usize,
    w: &[Complex<T>],
    n_w: usize,
    n_w_dn: usize,
    m: usize,
) where
    f64: AsPrimitive<T>,
{
    let width = rows[0].len();
    if width == 1 {
        let col = base;
        for (k, row) in rows.iter_mut().enumerate() {
            let l1 = n_w_dn * col + n_w_dn * m * k;
            let mut l0 = 0usize;
            let mut acc = Complex::new(T::zero(), T::zero());
            for j in 0..r {
                acc = c_mul_add(src[col + j * m], w[l0], acc);
                l0 += l1;
                if l0 > n_w {
                    l0 -= n_w;
                }
            }
            row[0] = acc;
        }
        return;
    }
    let mid = width / 2;
    let (left, right) = parallel::split_columns(rows, mid);
    parallel::join(
        mode,
        || twiddle_gen_rec(mode, r, src, left, base, w, n_w, n_w_dn, m),
        || twiddle_gen_rec(mode, r, src, right, base + mid, w, n_w, n_w_dn, m),
    );
}
