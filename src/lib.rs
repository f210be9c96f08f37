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

//! Fork-join parallel numerical kernels: a mixed-radix Cooley-Tukey FFT,
//! block-recursive LU decomposition without pivoting, and Strassen matrix
//! multiplication. Every kernel is a recursive fork-join decomposition and
//! produces bit-identical output in [`ExecutionMode::Parallel`] and
//! [`ExecutionMode::Sequential`].

mod butterflies;
mod combine;
mod err;
mod factorize;
mod fft;
mod lu;
mod parallel;
mod strassen;
mod traits;
mod twiddles;
mod unshuffle;
mod view;

pub use err::KernelError;
pub use fft::{fft_forward, fft_forward_with_mode, fft_inverse, fft_inverse_with_mode};
pub use lu::{lu_decompose, lu_decompose_with_mode, Block, BLOCK_SIZE};
pub use parallel::ExecutionMode;
pub use strassen::{
    strassen_multiply, strassen_multiply_strided, strassen_multiply_strided_with_mode,
    strassen_multiply_with_mode,
};
pub use traits::FftSample;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum FftDirection {
    Forward,
    Inverse,
}
