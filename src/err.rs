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
use std::error::Error;
use std::fmt::Formatter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    OutOfMemory(usize),
    ZeroSizedFft,
    MismatchedLengths(usize, usize),
    InvalidStride(usize, usize),
    NotPowerOfTwo(usize),
    NotBlockAligned(usize, usize),
    SingularPivot(usize),
}

impl Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::OutOfMemory(length) => {
                f.write_fmt(format_args!("Cannot allocate {length} elements"))
            }
            KernelError::ZeroSizedFft => {
                f.write_str("Cannot execute a transform on zero-sized buffers")
            }
            KernelError::MismatchedLengths(expected, got) => f.write_fmt(format_args!(
                "Buffer length expected to be {expected}, but it was {got}"
            )),
            KernelError::InvalidStride(stride, n) => f.write_fmt(format_args!(
                "Row stride {stride} cannot hold rows of {n} elements"
            )),
            KernelError::NotPowerOfTwo(n) => {
                f.write_fmt(format_args!("Size {n} must be a power of two"))
            }
            KernelError::NotBlockAligned(n, block) => f.write_fmt(format_args!(
                "Size {n} must be a multiple of the block size {block}"
            )),
            KernelError::SingularPivot(k) => f.write_fmt(format_args!(
                "Pivot {k} is zero or not representable, matrix cannot be factored without pivoting"
            )),
        }
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::KernelError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
