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

//! Greedy radix selection for the mixed-radix decomposition.

/// Transform sizes handled directly by an unrolled base kernel.
#[inline]
pub(crate) fn is_base_size(n: usize) -> bool {
    matches!(n, 2 | 4 | 8 | 16 | 32)
}

/// Picks the radix to split `n` by.
///
/// Power-of-two sizes prefer radix 16 except for a handful of sizes where
/// radix 8 tiles the recursion better. Odd sizes fall back to the smallest
/// odd divisor, and primes return `n` itself (a single generic DFT column
/// pass handles that level).
pub(crate) fn next_factor(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    if matches!(n, 64 | 128 | 256 | 1024 | 2048 | 4096) {
        return 8;
    }
    if n & 15 == 0 {
        return 16;
    }
    if n & 7 == 0 {
        return 8;
    }
    if n & 3 == 0 {
        return 4;
    }
    if n & 1 == 0 {
        return 2;
    }
    let mut r = 3;
    while r * r <= n {
        if n % r == 0 {
            return r;
        }
        r += 2;
    }
    n
}

/// Radix chain for size `n`, outermost split first.
///
/// Every recursion level peels one entry; the chain stops as soon as the
/// remaining sub-size is a base kernel or the level is a prime (which is
/// consumed whole by the generic column pass).
pub(crate) fn factor_sequence(n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut n = n;
    while n > 1 && !is_base_size(n) {
        let r = next_factor(n);
        factors.push(r);
        if r == n {
            break;
        }
        n /= r;
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix_table() {
        for (n, r) in [
            (64, 8),
            (128, 8),
            (256, 8),
            (512, 16),
            (1024, 8),
            (2048, 8),
            (4096, 8),
            (8192, 16),
            (48, 16),
            (24, 8),
            (12, 4),
            (6, 2),
            (10, 2),
            (15, 3),
            (35, 5),
            (81, 3),
            (509, 509),
            (1, 1),
        ] {
            assert_eq!(next_factor(n), r, "radix for {}", n);
        }
    }

    #[test]
    fn test_chain_multiplies_back() {
        for n in [6, 12, 100, 210, 243, 360, 509, 625, 800, 4096] {
            let factors = factor_sequence(n);
            let mut rem = n;
            for &r in &factors {
                assert_eq!(rem % r, 0, "chain for {} does not divide", n);
                rem /= r;
            }
            assert!(
                rem == 1 || is_base_size(rem),
                "chain for {} leaves {}",
                n,
                rem
            );
        }
    }

    #[test]
    fn test_base_sizes_have_empty_chain() {
        for n in [1, 2, 4, 8, 16, 32] {
            assert!(factor_sequence(n).is_empty());
        }
    }

    #[test]
    fn test_never_emits_radix_32() {
        for n in 2..=8192usize {
            for &r in &factor_sequence(n) {
                assert_ne!(r, 32, "size {}", n);
            }
        }
    }
}
