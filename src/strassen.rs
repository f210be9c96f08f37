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

//! Strassen matrix multiplication.
//!
//! Above the crossover the seven quadrant products run as one parallel
//! group over per-level scratch buffers, followed by a combination pass
//! that assembles the four output quadrants from the products and two
//! running sums. At and below the crossover a sequential divide-and-conquer
//! eight-multiply scheme bottoms out in an unrolled naive kernel working
//! eight output columns at a time.

use crate::err::{try_vec, KernelError};
use crate::parallel::{self, ExecutionMode};
use crate::view::{MatMut, MatRef};

/// Below this edge length the plain eight-multiply recursion beats the
/// Strassen bookkeeping.
const DIVIDE_AND_CONQUER_CROSSOVER: usize = 64;
/// Below this edge length the unrolled triple loop takes over.
const NAIVE_CROSSOVER: usize = 16;

/// `c = a·b` for dense row-major `n × n` double-precision matrices.
///
/// `n` must be a power of two and a multiple of 16. Strassen's recurrence
/// trades a multiplication for additions, so results can cancel slightly
/// worse than the classical product; callers needing the last bits should
/// compare against a classical multiply.
pub fn strassen_multiply(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    n: usize,
) -> Result<(), KernelError> {
    strassen_multiply_with_mode(c, a, b, n, ExecutionMode::default())
}

/// [`strassen_multiply`] with an explicit execution mode.
pub fn strassen_multiply_with_mode(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    n: usize,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    check_square(n)?;
    if a.len() != n * n {
        return Err(KernelError::MismatchedLengths(n * n, a.len()));
    }
    if b.len() != n * n {
        return Err(KernelError::MismatchedLengths(n * n, b.len()));
    }
    if c.len() != n * n {
        return Err(KernelError::MismatchedLengths(n * n, c.len()));
    }
    strassen_rec(
        MatMut::from_slice(c, n, n, n),
        MatRef::from_slice(a, n, n, n),
        MatRef::from_slice(b, n, n, n),
        mode,
    )
}

/// Like [`strassen_multiply`], but each operand carries its own row
/// stride, so `n × n` windows of larger matrices multiply without
/// copying. Each slice must start at its window's first element and cover
/// at least `(n-1)·stride + n` elements.
pub fn strassen_multiply_strided(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    n: usize,
    stride_c: usize,
    stride_a: usize,
    stride_b: usize,
) -> Result<(), KernelError> {
    strassen_multiply_strided_with_mode(
        c,
        a,
        b,
        n,
        stride_c,
        stride_a,
        stride_b,
        ExecutionMode::default(),
    )
}

/// [`strassen_multiply_strided`] with an explicit execution mode.
#[allow(clippy::too_many_arguments)]
pub fn strassen_multiply_strided_with_mode(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    n: usize,
    stride_c: usize,
    stride_a: usize,
    stride_b: usize,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    check_square(n)?;
    check_window(a.len(), n, stride_a)?;
    check_window(b.len(), n, stride_b)?;
    check_window(c.len(), n, stride_c)?;
    strassen_rec(
        MatMut::from_slice(c, n, n, stride_c),
        MatRef::from_slice(a, n, n, stride_a),
        MatRef::from_slice(b, n, n, stride_b),
        mode,
    )
}

fn check_square(n: usize) -> Result<(), KernelError> {
    if !n.is_power_of_two() {
        return Err(KernelError::NotPowerOfTwo(n));
    }
    if n % 16 != 0 {
        return Err(KernelError::NotBlockAligned(n, 16));
    }
    Ok(())
}

fn check_window(len: usize, n: usize, stride: usize) -> Result<(), KernelError> {
    if stride < n {
        return Err(KernelError::InvalidStride(stride, n));
    }
    let required = (n - 1) * stride + n;
    if len < required {
        return Err(KernelError::MismatchedLengths(required, len));
    }
    Ok(())
}

fn strassen_rec(
    c: MatMut<f64>,
    a: MatRef<f64>,
    b: MatRef<f64>,
    mode: ExecutionMode,
) -> Result<(), KernelError> {
    let n = a.rows();
    if n <= DIVIDE_AND_CONQUER_CROSSOVER {
        multiply_divide_and_conquer(c, a, b, false);
        return Ok(());
    }
    let q = n / 2;
    let qq = q * q;

    let (a11, a12, a21, a22) = a.split_quadrants();
    let (b11, b12, b21, b22) = b.split_quadrants();
    let (mut c11, mut c12, mut c21, mut c22) = c.split_quadrants();

    let mut s1 = try_vec![0.0f64; qq];
    let mut s2 = try_vec![0.0f64; qq];
    let mut s3 = try_vec![0.0f64; qq];
    let mut s4 = try_vec![0.0f64; qq];
    let mut s5 = try_vec![0.0f64; qq];
    let mut s6 = try_vec![0.0f64; qq];
    let mut s7 = try_vec![0.0f64; qq];
    let mut s8 = try_vec![0.0f64; qq];
    let mut m2 = try_vec![0.0f64; qq];
    let mut m5 = try_vec![0.0f64; qq];
    let mut t1 = try_vec![0.0f64; qq];

    // One fused pass builds all eight S matrices row by row; later entries
    // reuse earlier ones, so the order below is load-bearing.
    for i in 0..q {
        let a11r = a11.row(i);
        let a12r = a12.row(i);
        let a21r = a21.row(i);
        let a22r = a22.row(i);
        let b11r = b11.row(i);
        let b12r = b12.row(i);
        let b21r = b21.row(i);
        let b22r = b22.row(i);
        let base = i * q;
        for j in 0..q {
            let s1v = a21r[j] + a22r[j];
            let s2v = s1v - a11r[j];
            s1[base + j] = s1v;
            s2[base + j] = s2v;
            s3[base + j] = a11r[j] - a21r[j];
            s4[base + j] = a12r[j] - s2v;
            let s5v = b12r[j] - b11r[j];
            let s6v = b22r[j] - s5v;
            s5[base + j] = s5v;
            s6[base + j] = s6v;
            s7[base + j] = b22r[j] - b12r[j];
            s8[base + j] = s6v - b21r[j];
        }
    }

    let s1_ref = MatRef::from_slice(&s1, q, q, q);
    let s2_ref = MatRef::from_slice(&s2, q, q, q);
    let s3_ref = MatRef::from_slice(&s3, q, q, q);
    let s4_ref = MatRef::from_slice(&s4, q, q, q);
    let s5_ref = MatRef::from_slice(&s5, q, q, q);
    let s6_ref = MatRef::from_slice(&s6, q, q, q);
    let s7_ref = MatRef::from_slice(&s7, q, q, q);
    let s8_ref = MatRef::from_slice(&s8, q, q, q);
    let mut m2_view = MatMut::from_slice(&mut m2, q, q, q);
    let mut m5_view = MatMut::from_slice(&mut m5, q, q, q);
    let mut t1_view = MatMut::from_slice(&mut t1, q, q, q);

    // All seven products are independent; one join covers the group.
    let ((r1, r2, r3, r4), (r5, r6, r7)) = parallel::join(
        mode,
        || {
            parallel::join4(
                mode,
                || strassen_rec(m2_view.rb_mut(), a11, b11, mode),
                || strassen_rec(m5_view.rb_mut(), s1_ref, s5_ref, mode),
                || strassen_rec(t1_view.rb_mut(), s2_ref, s6_ref, mode),
                || strassen_rec(c22.rb_mut(), s3_ref, s7_ref, mode),
            )
        },
        || {
            let (r5, (r6, r7)) = parallel::join(
                mode,
                || strassen_rec(c11.rb_mut(), a12, b21, mode),
                || {
                    parallel::join(
                        mode,
                        || strassen_rec(c12.rb_mut(), s4_ref, b22, mode),
                        || strassen_rec(c21.rb_mut(), a22, s8_ref, mode),
                    )
                },
            );
            (r5, r6, r7)
        },
    );
    r1?;
    r2?;
    r3?;
    r4?;
    r5?;
    r6?;
    r7?;

    for i in 0..q {
        let base = i * q;
        let c11r = c11.row_mut(i);
        for j in 0..q {
            c11r[j] += m2[base + j];
        }
        let c12r = c12.row_mut(i);
        let c21r = c21.row_mut(i);
        let c22r = c22.row_mut(i);
        for j in 0..q {
            let t1v = t1[base + j] + m2[base + j];
            let t2v = c22r[j] + t1v;
            c12r[j] += m5[base + j] + t1v;
            c22r[j] = m5[base + j] + t2v;
            c21r[j] = t2v - c21r[j];
        }
    }
    Ok(())
}

/// Classical eight-multiply quadrant recursion; `additive` accumulates into
/// `c` instead of overwriting it.
fn multiply_divide_and_conquer(c: MatMut<f64>, a: MatRef<f64>, b: MatRef<f64>, additive: bool) {
    let n = a.rows();
    if n <= NAIVE_CROSSOVER {
        naive_multiply(c, a, b, additive);
        return;
    }
    let (a11, a12, a21, a22) = a.split_quadrants();
    let (b11, b12, b21, b22) = b.split_quadrants();
    let (mut c11, mut c12, mut c21, mut c22) = c.split_quadrants();

    multiply_divide_and_conquer(c11.rb_mut(), a11, b11, additive);
    multiply_divide_and_conquer(c12.rb_mut(), a11, b12, additive);
    multiply_divide_and_conquer(c22.rb_mut(), a21, b12, additive);
    multiply_divide_and_conquer(c21.rb_mut(), a21, b11, additive);

    multiply_divide_and_conquer(c11, a12, b21, true);
    multiply_divide_and_conquer(c12, a12, b22, true);
    multiply_divide_and_conquer(c22, a22, b22, true);
    multiply_divide_and_conquer(c21, a22, b21, true);
}

/// Triple loop over eight output columns at a time, accumulating in a
/// register-sized window.
fn naive_multiply(mut c: MatMut<f64>, a: MatRef<f64>, b: MatRef<f64>, additive: bool) {
    let n = a.rows();
    for i in 0..n {
        let arow = a.row(i);
        let crow = c.row_mut(i);
        for j0 in (0..n).step_by(8) {
            let mut sums = [0.0f64; 8];
            if additive {
                sums.copy_from_slice(&crow[j0..j0 + 8]);
            }
            for (k, &av) in arow.iter().enumerate() {
                let brow = b.row(k);
                for (acc, &bv) in sums.iter_mut().zip(&brow[j0..j0 + 8]) {
                    *acc = av.mul_add(bv, *acc);
                }
            }
            crow[j0..j0 + 8].copy_from_slice(&sums);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_matrix(n: usize) -> Vec<f64> {
        let mut rng = rand::rng();
        (0..n * n).map(|_| rng.random::<f64>() - 0.5).collect()
    }

    fn classical_multiply(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
        let mut c = vec![0.0f64; n * n];
        for i in 0..n {
            for k in 0..n {
                let av = a[i * n + k];
                for j in 0..n {
                    c[i * n + j] += av * b[k * n + j];
                }
            }
        }
        c
    }

    #[test]
    fn test_matches_classical_product() {
        for n in [16usize, 32, 64, 128] {
            let a = random_matrix(n);
            let b = random_matrix(n);
            let want = classical_multiply(&a, &b, n);
            let mut c = vec![0.0f64; n * n];
            strassen_multiply(&mut c, &a, &b, n).unwrap();
            let tolerance = 1e-9 * n as f64;
            for (idx, (got, want)) in c.iter().zip(want.iter()).enumerate() {
                assert!(
                    (got - want).abs() < tolerance,
                    "n = {}, index {}: {} vs {}",
                    n,
                    idx,
                    got,
                    want
                );
            }
        }
    }

    #[test]
    fn test_identity_times_identity_is_exact() {
        let n = 128;
        let mut identity = vec![0.0f64; n * n];
        for i in 0..n {
            identity[i * n + i] = 1.0;
        }
        let mut c = vec![0.0f64; n * n];
        strassen_multiply(&mut c, &identity, &identity, n).unwrap();
        assert_eq!(c, identity);
    }

    #[test]
    fn test_freivalds_check() {
        let mut rng = rand::rng();
        let n = 128;
        let a = random_matrix(n);
        let b = random_matrix(n);
        let mut c = vec![0.0f64; n * n];
        strassen_multiply(&mut c, &a, &b, n).unwrap();

        let r: Vec<f64> = (0..n).map(|_| rng.random::<f64>() - 0.5).collect();
        let mat_vec = |m: &[f64], v: &[f64]| -> Vec<f64> {
            (0..n)
                .map(|i| m[i * n..(i + 1) * n].iter().zip(v).map(|(&x, &y)| x * y).sum())
                .collect()
        };
        let br = mat_vec(&b, &r);
        let abr = mat_vec(&a, &br);
        let cr = mat_vec(&c, &r);
        for (x, y) in abr.iter().zip(cr.iter()) {
            assert!((x - y).abs() < 1e-7 * n as f64);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree_bitwise() {
        let n = 128;
        let a = random_matrix(n);
        let b = random_matrix(n);
        let mut par = vec![0.0f64; n * n];
        strassen_multiply_with_mode(&mut par, &a, &b, n, ExecutionMode::Parallel).unwrap();
        let mut seq = vec![0.0f64; n * n];
        strassen_multiply_with_mode(&mut seq, &a, &b, n, ExecutionMode::Sequential).unwrap();
        for (p, s) in par.iter().zip(seq.iter()) {
            assert_eq!(p.to_bits(), s.to_bits());
        }
    }

    #[test]
    fn test_strided_windows_match_extracted_product() {
        let n = 32usize;
        let (stride_a, stride_b, stride_c) = (48usize, 40usize, 56usize);
        let mut rng = rand::rng();
        let fill = |stride: usize| -> Vec<f64> {
            let mut rng = rand::rng();
            (0..(n - 1) * stride + n)
                .map(|_| rng.random::<f64>() - 0.5)
                .collect()
        };
        let abuf = fill(stride_a);
        let bbuf = fill(stride_b);
        let extract = |buf: &[f64], stride: usize| -> Vec<f64> {
            let mut out = Vec::with_capacity(n * n);
            for i in 0..n {
                out.extend_from_slice(&buf[i * stride..i * stride + n]);
            }
            out
        };
        let want = classical_multiply(&extract(&abuf, stride_a), &extract(&bbuf, stride_b), n);

        let sentinel = rng.random::<f64>() + 2.0;
        let mut cbuf = vec![sentinel; (n - 1) * stride_c + n];
        strassen_multiply_strided(&mut cbuf, &abuf, &bbuf, n, stride_c, stride_a, stride_b)
            .unwrap();

        let tolerance = 1e-9 * n as f64;
        for i in 0..n {
            for j in 0..n {
                let got = cbuf[i * stride_c + j];
                assert!(
                    (got - want[i * n + j]).abs() < tolerance,
                    "({}, {}): {} vs {}",
                    i,
                    j,
                    got,
                    want[i * n + j]
                );
            }
            // Padding between rows stays untouched.
            if i < n - 1 {
                for &pad in &cbuf[i * stride_c + n..(i + 1) * stride_c] {
                    assert_eq!(pad.to_bits(), sentinel.to_bits());
                }
            }
        }
    }

    #[test]
    fn test_dense_stride_matches_dense_entry() {
        let n = 32usize;
        let a = random_matrix(n);
        let b = random_matrix(n);
        let mut dense = vec![0.0f64; n * n];
        strassen_multiply(&mut dense, &a, &b, n).unwrap();
        let mut strided = vec![0.0f64; n * n];
        strassen_multiply_strided(&mut strided, &a, &b, n, n, n, n).unwrap();
        for (d, s) in dense.iter().zip(strided.iter()) {
            assert_eq!(d.to_bits(), s.to_bits());
        }
    }

    #[test]
    fn test_strided_rejects_narrow_or_short_buffers() {
        let n = 32usize;
        let stride = 48usize;
        let len = (n - 1) * stride + n;
        let a = vec![0.0f64; len];
        let b = vec![0.0f64; len];
        let mut c = vec![0.0f64; len];

        assert_eq!(
            strassen_multiply_strided(&mut c, &a, &b, n, stride, stride, 24),
            Err(KernelError::InvalidStride(24, n))
        );

        let short_b = vec![0.0f64; len - 1];
        assert_eq!(
            strassen_multiply_strided(&mut c, &a, &short_b, n, stride, stride, stride),
            Err(KernelError::MismatchedLengths(len, len - 1))
        );
    }

    #[test]
    fn test_rejects_malformed_sizes() {
        let mut c = vec![0.0f64; 24 * 24];
        let a = vec![0.0f64; 24 * 24];
        let b = vec![0.0f64; 24 * 24];
        assert_eq!(
            strassen_multiply(&mut c, &a, &b, 24),
            Err(KernelError::NotPowerOfTwo(24))
        );

        let mut c = vec![0.0f64; 64];
        let a = vec![0.0f64; 64];
        let b = vec![0.0f64; 64];
        assert_eq!(
            strassen_multiply(&mut c, &a, &b, 8),
            Err(KernelError::NotBlockAligned(8, 16))
        );

        let mut c = vec![0.0f64; 16 * 16];
        let a = vec![0.0f64; 16 * 16];
        let b = vec![0.0f64; 8];
        assert_eq!(
            strassen_multiply(&mut c, &a, &b, 16),
            Err(KernelError::MismatchedLengths(256, 8))
        );
    }
}
