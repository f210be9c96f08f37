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

//! Mixed-radix Cooley-Tukey transform.
//!
//! Each level splits the length-`n` DFT into `r` DFTs of length `m = n/r`
//! along the greedy radix chain: unshuffle into `r` groups, run the `r`
//! sub-transforms as one parallel group (ping-ponging between the two
//! buffers), then a twiddle-and-combine pass folds the groups back. Sizes
//! with an unrolled butterfly short-circuit the whole level.

use crate::butterflies::BaseKernels;
use crate::combine::twiddle_pass;
use crate::err::KernelError;
use crate::factorize::factor_sequence;
use crate::parallel::{self, ExecutionMode};
use crate::traits::FftSample;
use crate::twiddles::build_twiddle_table;
use crate::unshuffle::unshuffle;
use crate::FftDirection;
use num_complex::Complex;
use num_traits::AsPrimitive;

/// Forward DFT of `input` into `output`; `input` is consumed as scratch.
///
/// Both buffers must have the same length `n ≥ 1`. No normalization is
/// applied in either direction.
pub fn fft_forward<T: FftSample>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
) -> Result<(), KernelError>
where
    f64: AsPrimitive<T>,
{
    fft_execute(input, output, FftDirection::Forward, ExecutionMode::default())
}

/// [`fft_forward`] with an explicit execution mode.
pub fn fft_forward_with_mode<T: FftSample>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
    mode: ExecutionMode,
) -> Result<(), KernelError>
where
    f64: AsPrimitive<T>,
{
    fft_execute(input, output, FftDirection::Forward, mode)
}

/// Unnormalized inverse DFT; `fft_inverse(fft_forward(x))` yields `n · x`.
pub fn fft_inverse<T: FftSample>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
) -> Result<(), KernelError>
where
    f64: AsPrimitive<T>,
{
    fft_execute(input, output, FftDirection::Inverse, ExecutionMode::default())
}

/// [`fft_inverse`] with an explicit execution mode.
pub fn fft_inverse_with_mode<T: FftSample>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
    mode: ExecutionMode,
) -> Result<(), KernelError>
where
    f64: AsPrimitive<T>,
{
    fft_execute(input, output, FftDirection::Inverse, mode)
}

fn fft_execute<T: FftSample>(
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
    direction: FftDirection,
    mode: ExecutionMode,
) -> Result<(), KernelError>
where
    f64: AsPrimitive<T>,
{
    let n = input.len();
    if n == 0 {
        return Err(KernelError::ZeroSizedFft);
    }
    if output.len() != n {
        return Err(KernelError::MismatchedLengths(n, output.len()));
    }
    if n == 1 {
        output[0] = input[0];
        return Ok(());
    }

    // The table fill and the factorization are independent.
    let (w, factors) = parallel::join(
        mode,
        || build_twiddle_table::<T>(n, direction, mode),
        || factor_sequence(n),
    );
    let w = w?;
    let kernels = BaseKernels::new(direction);
    fft_aux(mode, input, output, &factors, &w, n, &kernels);
    Ok(())
}

fn fft_aux<T: FftSample>(
    mode: ExecutionMode,
    src: &mut [Complex<T>],
    dst: &mut [Complex<T>],
    factors: &[usize],
    w: &[Complex<T>],
    n_w: usize,
    kernels: &BaseKernels<T>,
) where
    f64: AsPrimitive<T>,
{
    let n = src.len();
    if kernels.execute_out_of_place(src, dst) {
        return;
    }

    let r = factors[0];
    let m = n / r;

    if r < n {
        unshuffle(mode, src, dst, r, m);
        let pairs: Vec<(&mut [Complex<T>], &mut [Complex<T>])> = dst
            .chunks_exact_mut(m)
            .zip(src.chunks_exact_mut(m))
            .collect();
        sub_transforms(mode, pairs, &factors[1..], w, n_w, kernels);
    }
    twiddle_pass(mode, r, src, dst, w, n_w, n_w / n, m, kernels);
}

/// Fans the `r` sub-transforms out as a balanced fork-join tree. Each pair
/// is (sub-input, sub-output): the unshuffled groups sit in the destination
/// buffer and their transforms land back in the source, which the combine
/// pass then reads.
fn sub_transforms<T: FftSample>(
    mode: ExecutionMode,
    mut pairs: Vec<(&mut [Complex<T>], &mut [Complex<T>])>,
    factors: &[usize],
    w: &[Complex<T>],
    n_w: usize,
    kernels: &BaseKernels<T>,
) where
    f64: AsPrimitive<T>,
{
    if pairs.len() == 1 {
        if let Some((sub_src, sub_dst)) = pairs.pop() {
            fft_aux(mode, sub_src, sub_dst, factors, w, n_w, kernels);
        }
        return;
    }
    let tail = pairs.split_off(pairs.len() / 2);
    parallel::join(
        mode,
        || sub_transforms(mode, pairs, factors, w, n_w, kernels),
        || sub_transforms(mode, tail, factors, w, n_w, kernels),
    );
}
