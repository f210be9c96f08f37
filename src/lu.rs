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

//! Block-recursive LU decomposition without pivoting.
//!
//! The matrix is a power-of-two grid of 16×16 tiles. Each recursion level
//! factors the top-left quadrant, solves the two off-diagonal quadrants
//! against it in parallel, applies the Schur complement to the bottom-right
//! quadrant and recurses into it. The result is compact: `U` on and above
//! the diagonal, the sub-diagonal of `L` below it (unit diagonal implied).

use crate::err::KernelError;
use crate::parallel::{self, ExecutionMode};
use crate::view::{MatMut, MatRef};

/// Edge length of one tile.
pub const BLOCK_SIZE: usize = 16;

/// One contiguous row-major 16×16 tile.
pub type Block = [f64; BLOCK_SIZE * BLOCK_SIZE];

/// In-place LU factorization of an `n × n` matrix stored as a row-major
/// grid of row-major [`Block`]s: element `(i, j)` lives at
/// `(i/16·nb + j/16)·256 + (i%16)·16 + j%16` with `nb = n/16`.
///
/// `n` must be a multiple of [`BLOCK_SIZE`] with `n/16` a power of two.
/// There is no pivoting; a zero or non-normal pivot aborts with
/// [`KernelError::SingularPivot`], leaving the buffer partially factored.
pub fn lu_decompose(m: &mut [f64], n: usize) -> Result<(), KernelError> {
    lu_decompose_with_mode(m, n, ExecutionMode::default())
}

/// [`lu_decompose`] with an explicit execution mode.
pub fn lu_decompose_with_mode(
    m: &mut [f64],
    n: usize,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    if n == 0 || n % BLOCK_SIZE != 0 {
        return Err(KernelError::NotBlockAligned(n, BLOCK_SIZE));
    }
    let nb = n / BLOCK_SIZE;
    if !nb.is_power_of_two() {
        return Err(KernelError::NotPowerOfTwo(nb));
    }
    if m.len() != n * n {
        return Err(KernelError::MismatchedLengths(n * n, m.len()));
    }
    let blocks: &mut [Block] = bytemuck::cast_slice_mut(m);
    lu_rec(MatMut::from_slice(blocks, nb, nb, nb), 0, mode)
}

fn lu_rec(mut m: MatMut<Block>, diag: usize, mode: ExecutionMode) -> Result<(), KernelError> {
    if m.rows() == 1 {
        return block_lu(&mut m.row_mut(0)[0], diag);
    }
    let h = m.rows() / 2;
    let (mut m00, mut m01, mut m10, mut m11) = m.split_quadrants();

    lu_rec(m00.rb_mut(), diag, mode)?;

    let f00 = m00.rb();
    let (_, upper) = parallel::join(
        mode,
        || lower_solve(m01.rb_mut(), f00, mode),
        || upper_solve(m10.rb_mut(), f00, diag, mode),
    );
    upper?;

    schur(m11.rb_mut(), m10.rb(), m01.rb(), mode);
    lu_rec(m11, diag + h * BLOCK_SIZE, mode)
}

/// `M -= V·W` over block quadrants: two sequential rounds of four
/// independent updates.
fn schur(mut m: MatMut<Block>, v: MatRef<Block>, w: MatRef<Block>, mode: ExecutionMode) {
    if m.rows() == 1 {
        block_schur(&mut m.row_mut(0)[0], v.at(0, 0), w.at(0, 0));
        return;
    }
    let (mut m00, mut m01, mut m10, mut m11) = m.split_quadrants();
    let (v00, v01, v10, v11) = v.split_quadrants();
    let (w00, w01, w10, w11) = w.split_quadrants();

    parallel::join4(
        mode,
        || schur(m00.rb_mut(), v00, w00, mode),
        || schur(m01.rb_mut(), v00, w01, mode),
        || schur(m10.rb_mut(), v10, w00, mode),
        || schur(m11.rb_mut(), v10, w01, mode),
    );
    parallel::join4(
        mode,
        || schur(m00.rb_mut(), v01, w10, mode),
        || schur(m01.rb_mut(), v01, w11, mode),
        || schur(m10.rb_mut(), v11, w10, mode),
        || schur(m11.rb_mut(), v11, w11, mode),
    );
}

/// Solves `L·X = A` in place over `m`, with `L` the unit-lower part of a
/// factored quadrant. The two column halves of `m` are independent.
fn lower_solve(mut m: MatMut<Block>, l: MatRef<Block>, mode: ExecutionMode) {
    if m.rows() == 1 {
        block_lower_solve(&mut m.row_mut(0)[0], l.at(0, 0));
        return;
    }
    let (m00, m01, m10, m11) = m.split_quadrants();
    parallel::join(
        mode,
        || aux_lower_solve(m00, m10, l, mode),
        || aux_lower_solve(m01, m11, l, mode),
    );
}

fn aux_lower_solve(
    mut ma: MatMut<Block>,
    mut mb: MatMut<Block>,
    l: MatRef<Block>,
    mode: ExecutionMode,
) {
    let (l00, _, l10, l11) = l.split_quadrants();
    lower_solve(ma.rb_mut(), l00, mode);
    schur(mb.rb_mut(), l10, ma.rb(), mode);
    lower_solve(mb, l11, mode);
}

/// Solves `X·U = A` in place over `m`. The two row halves of `m` are
/// independent; `diag` is the global index of the first diagonal entry of
/// `u`, used only for error reporting.
fn upper_solve(
    mut m: MatMut<Block>,
    u: MatRef<Block>,
    diag: usize,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    if m.rows() == 1 {
        return block_upper_solve(&mut m.row_mut(0)[0], u.at(0, 0), diag);
    }
    let (m00, m01, m10, m11) = m.split_quadrants();
    let (top, bottom) = parallel::join(
        mode,
        || aux_upper_solve(m00, m01, u, diag, mode),
        || aux_upper_solve(m10, m11, u, diag, mode),
    );
    top?;
    bottom
}

fn aux_upper_solve(
    mut ma: MatMut<Block>,
    mut mb: MatMut<Block>,
    u: MatRef<Block>,
    diag: usize,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    let h = u.rows() / 2;
    let (u00, u01, _, u11) = u.split_quadrants();
    upper_solve(ma.rb_mut(), u00, diag, mode)?;
    schur(mb.rb_mut(), ma.rb(), u01, mode);
    upper_solve(mb, u11, diag + h * BLOCK_SIZE, mode)
}

/// `y -= a·x`, the elementary row update everything else is built from.
#[inline]
fn daxmy(a: f64, x: &[f64], y: &mut [f64]) {
    for (y, &x) in y.iter_mut().zip(x) {
        *y -= a * x;
    }
}

fn block_lu(b: &mut Block, diag: usize) -> Result<(), KernelError> {
    for k in 0..BLOCK_SIZE {
        let pivot = b[k * BLOCK_SIZE + k];
        if !pivot.is_normal() {
            return Err(KernelError::SingularPivot(diag + k));
        }
        for i in k + 1..BLOCK_SIZE {
            let (head, tail) = b.split_at_mut(i * BLOCK_SIZE);
            let pivot_row = &head[k * BLOCK_SIZE..k * BLOCK_SIZE + BLOCK_SIZE];
            let row = &mut tail[..BLOCK_SIZE];
            row[k] /= pivot;
            let factor = row[k];
            daxmy(factor, &pivot_row[k + 1..], &mut row[k + 1..]);
        }
    }
    Ok(())
}

fn block_lower_solve(b: &mut Block, l: &Block) {
    for i in 1..BLOCK_SIZE {
        let (head, tail) = b.split_at_mut(i * BLOCK_SIZE);
        let row = &mut tail[..BLOCK_SIZE];
        for k in 0..i {
            daxmy(
                l[i * BLOCK_SIZE + k],
                &head[k * BLOCK_SIZE..k * BLOCK_SIZE + BLOCK_SIZE],
                row,
            );
        }
    }
}

fn block_upper_solve(b: &mut Block, u: &Block, diag: usize) -> Result<(), KernelError> {
    for k in 0..BLOCK_SIZE {
        if !u[k * BLOCK_SIZE + k].is_normal() {
            return Err(KernelError::SingularPivot(diag + k));
        }
    }
    for i in 0..BLOCK_SIZE {
        let row = &mut b[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE];
        for k in 0..BLOCK_SIZE {
            row[k] /= u[k * BLOCK_SIZE + k];
            let factor = row[k];
            daxmy(
                factor,
                &u[k * BLOCK_SIZE + k + 1..(k + 1) * BLOCK_SIZE],
                &mut row[k + 1..],
            );
        }
    }
    Ok(())
}

/// `b -= a·c` for single tiles.
fn block_schur(b: &mut Block, a: &Block, c: &Block) {
    for i in 0..BLOCK_SIZE {
        let row = &mut b[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE];
        for k in 0..BLOCK_SIZE {
            daxmy(
                a[i * BLOCK_SIZE + k],
                &c[k * BLOCK_SIZE..k * BLOCK_SIZE + BLOCK_SIZE],
                row,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn flat_index(n: usize, i: usize, j: usize) -> usize {
        let nb = n / BLOCK_SIZE;
        let block = (i / BLOCK_SIZE) * nb + j / BLOCK_SIZE;
        block * BLOCK_SIZE * BLOCK_SIZE + (i % BLOCK_SIZE) * BLOCK_SIZE + j % BLOCK_SIZE
    }

    fn random_diag_dominant(n: usize) -> Vec<f64> {
        let mut rng = rand::rng();
        let mut m = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                let v: f64 = rng.random::<f64>() - 0.5;
                m[flat_index(n, i, j)] = if i == j { v + 10.0 } else { v };
            }
        }
        m
    }

    fn reconstruct(factored: &[f64], n: usize) -> Vec<f64> {
        let mut product = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                let mut acc = 0.0;
                for k in 0..=i.min(j) {
                    let l = if k == i {
                        1.0
                    } else {
                        factored[flat_index(n, i, k)]
                    };
                    acc += l * factored[flat_index(n, k, j)];
                }
                product[flat_index(n, i, j)] = acc;
            }
        }
        product
    }

    #[test]
    fn test_reconstruction_across_sizes() {
        for n in [16usize, 32, 64, 128] {
            let original = random_diag_dominant(n);
            let mut factored = original.clone();
            lu_decompose(&mut factored, n).unwrap();
            let product = reconstruct(&factored, n);
            for (idx, (got, want)) in product.iter().zip(original.iter()).enumerate() {
                assert!(
                    (got - want).abs() < 1e-6,
                    "n = {}, flat index {}: {} vs {}",
                    n,
                    idx,
                    got,
                    want
                );
            }
        }
    }

    #[test]
    fn test_upper_triangular_is_fixed_point() {
        let n = 32;
        let mut m = vec![0.0f64; n * n];
        for i in 0..n {
            for j in i..n {
                m[flat_index(n, i, j)] = if i == j { 2.0 } else { 1.0 };
            }
        }
        let original = m.clone();
        lu_decompose(&mut m, n).unwrap();
        assert_eq!(m, original);
    }

    #[test]
    fn test_sequential_and_parallel_agree_bitwise() {
        let n = 64;
        let original = random_diag_dominant(n);
        let mut par = original.clone();
        lu_decompose_with_mode(&mut par, n, ExecutionMode::Parallel).unwrap();
        let mut seq = original;
        lu_decompose_with_mode(&mut seq, n, ExecutionMode::Sequential).unwrap();
        for (p, s) in par.iter().zip(seq.iter()) {
            assert_eq!(p.to_bits(), s.to_bits());
        }
    }

    #[test]
    fn test_singular_matrix_is_reported() {
        let n = 16;
        let mut zeros = vec![0.0f64; n * n];
        assert_eq!(
            lu_decompose(&mut zeros, n),
            Err(KernelError::SingularPivot(0))
        );

        let n = 32;
        let mut m = random_diag_dominant(n);
        for j in 0..n {
            m[flat_index(n, 20, j)] = 0.0;
        }
        // Elimination cannot repair a zero row; the pivot surfaces there.
        assert_eq!(
            lu_decompose(&mut m, n),
            Err(KernelError::SingularPivot(20))
        );
    }

    #[test]
    fn test_rejects_malformed_sizes() {
        let mut m = vec![0.0f64; 100];
        assert_eq!(
            lu_decompose(&mut m, 10),
            Err(KernelError::NotBlockAligned(10, BLOCK_SIZE))
        );

        let mut m = vec![0.0f64; 48 * 48];
        assert_eq!(
            lu_decompose(&mut m, 48),
            Err(KernelError::NotPowerOfTwo(3))
        );

        let mut m = vec![0.0f64; 16];
        assert_eq!(
            lu_decompose(&mut m, 16),
            Err(KernelError::MismatchedLengths(256, 16))
        );
    }
}
