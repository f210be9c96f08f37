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

//! Stride permutation splitting one buffer into `r` interleaved groups.

use crate::factorize::is_base_size;
use crate::parallel::{self, ExecutionMode};
use crate::traits::FftSample;
use num_complex::Complex;

const BASE_RADIX_THRESHOLD: usize = 128;
const GENERIC_RADIX_THRESHOLD: usize = 16;

/// Scatters `src` into `r` groups of `m`: `dst[i + k·m] = src[r·i + k]`.
///
/// Group `k` then holds the subsequence with indices `≡ k (mod r)`, ready
/// for the `r` independent sub-transforms.
pub(crate) fn unshuffle<T: FftSample>(
    mode: ExecutionMode,
    src: &[Complex<T>],
    dst: &mut [Complex<T>],
    r: usize,
    m: usize,
) {
    debug_assert_eq!(src.len(), r * m);
    let rows: Vec<&mut [Complex<T>]> = dst.chunks_exact_mut(m).collect();
    // Unrolled base radixes can afford wider sequential leaves.
    let threshold = if is_base_size(r) {
        BASE_RADIX_THRESHOLD
    } else {
        GENERIC_RADIX_THRESHOLD
    };
    unshuffle_rec(mode, src, rows, 0, r, threshold);
}

fn unshuffle_rec<T: FftSample>(
    mode: ExecutionMode,
    src: &[Complex<T>],
    mut rows: Vec<&mut [Complex<T>]>,
    base: usize,
    r: usize,
    threshold: usize,
) {
    let width = rows[0].len();
    if width < threshold {
        match r {
            2 => scatter_columns::<T, 2>(src, &mut rows, base),
            4 => scatter_columns::<T, 4>(src, &mut rows, base),
            8 => scatter_columns::<T, 8>(src, &mut rows, base),
            16 => scatter_columns::<T, 16>(src, &mut rows, base),
            32 => scatter_columns::<T, 32>(src, &mut rows, base),
            _ => {
                for (k, row) in rows.iter_mut().enumerate() {
                    for (i, slot) in row.iter_mut().enumerate() {
                        *slot = src[r * (base + i) + k];
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
        || unshuffle_rec(mode, src, left, base, r, threshold),
        || unshuffle_rec(mode, src, right, base + mid, r, threshold),
    );
}

/// Base-radix leaf with the group size fixed at compile time: column `i`
/// reads `R` contiguous source elements and the store loop unrolls.
fn scatter_columns<T: FftSample, const R: usize>(
    src: &[Complex<T>],
    rows: &mut [&mut [Complex<T>]],
    base: usize,
) {
    let width = rows[0].len();
    for i in 0..width {
        let group = &src[R * (base + i)..R * (base + i) + R];
        for (row, v) in rows.iter_mut().zip(group) {
            row[i] = *v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unshuffle_layout() {
        for (r, m) in [
            (2usize, 300usize),
            (4, 64),
            (7, 30),
            (8, 40),
            (16, 20),
            (32, 8),
        ] {
            let n = r * m;
            let src: Vec<Complex<f64>> =
                (0..n).map(|j| Complex::new(j as f64, -(j as f64))).collect();
            for mode in [ExecutionMode::Parallel, ExecutionMode::Sequential] {
                let mut dst = vec![Complex::new(0.0, 0.0); n];
                unshuffle(mode, &src, &mut dst, r, m);
                for i in 0..m {
                    for k in 0..r {
                        assert_eq!(dst[i + k * m], src[r * i + k], "r={} i={} k={}", r, i, k);
                    }
                }
            }
        }
    }
}
