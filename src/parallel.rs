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

//! Fork-join substrate shared by all three engines.
//!
//! Every recursive routine in this crate splits its range or quadrant at the
//! midpoint, forks the independent halves, and joins before any step that
//! reads their combined output. Base cases are straight loops with no
//! further fork. `ExecutionMode::Sequential` runs the exact same recursion
//! on the calling thread, which the concurrency-insensitivity tests rely on.

/// Whether fork points actually hand work to the rayon pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ExecutionMode {
    #[default]
    Parallel,
    Sequential,
}

#[inline]
pub(crate) fn join<A, B, RA, RB>(mode: ExecutionMode, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    match mode {
        ExecutionMode::Parallel => rayon::join(a, b),
        ExecutionMode::Sequential => (a(), b()),
    }
}

#[inline]
pub(crate) fn join4<F0, F1, F2, F3, R0, R1, R2, R3>(
    mode: ExecutionMode,
    f0: F0,
    f1: F1,
    f2: F2,
    f3: F3,
) -> (R0, R1, R2, R3)
where
    F0: FnOnce() -> R0 + Send,
    F1: FnOnce() -> R1 + Send,
    F2: FnOnce() -> R2 + Send,
    F3: FnOnce() -> R3 + Send,
    R0: Send,
    R1: Send,
    R2: Send,
    R3: Send,
{
    match mode {
        ExecutionMode::Parallel => {
            let ((r0, r1), (r2, r3)) =
                rayon::join(|| rayon::join(f0, f1), || rayon::join(f2, f3));
            (r0, r1, r2, r3)
        }
        ExecutionMode::Sequential => (f0(), f1(), f2(), f3()),
    }
}

/// Split a set of row windows at column `mid`, yielding the two disjoint
/// column halves. Used by the unshuffle and twiddle-combine recursions,
/// whose concurrent tasks own column windows across all output groups.
pub(crate) fn split_columns<'a, T>(
    rows: Vec<&'a mut [T]>,
    mid: usize,
) -> (Vec<&'a mut [T]>, Vec<&'a mut [T]>) {
    let mut left = Vec::with_capacity(rows.len());
    let mut right = Vec::with_capacity(rows.len());
    for row in rows {
        let (l, r) = row.split_at_mut(mid);
        left.push(l);
        right.push(r);
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_columns_disjoint_windows() {
        let mut backing = vec![0u32; 64];
        let rows: Vec<&mut [u32]> = backing.chunks_exact_mut(16).collect();
        let (left, right) = split_columns(rows, 5);
        assert_eq!(left.len(), 4);
        assert_eq!(right.len(), 4);
        for row in &left {
            assert_eq!(row.len(), 5);
        }
        for row in &right {
            assert_eq!(row.len(), 11);
        }
    }
}
