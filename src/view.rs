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

//! Strided matrix windows over a flat buffer.
//!
//! The quadrant recursions hand sibling tasks views into the same backing
//! allocation. `split_quadrants` is the only way such sibling views are
//! produced, and the four windows it returns are pairwise disjoint, so a
//! mutable view is the sole writer of every element it can reach. That
//! invariant is what the `unsafe impl Send` below relies on.

use std::marker::PhantomData;

pub(crate) struct MatRef<'a, T> {
    ptr: *const T,
    rows: usize,
    cols: usize,
    stride: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> Clone for MatRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatRef<'_, T> {}

unsafe impl<T: Sync> Send for MatRef<'_, T> {}
unsafe impl<T: Sync> Sync for MatRef<'_, T> {}

impl<'a, T> MatRef<'a, T> {
    pub(crate) fn from_slice(data: &'a [T], rows: usize, cols: usize, stride: usize) -> Self {
        assert!(cols <= stride);
        assert!(rows == 0 || (rows - 1) * stride + cols <= data.len());
        Self {
            ptr: data.as_ptr(),
            rows,
            cols,
            stride,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub(crate) fn row(&self, i: usize) -> &'a [T] {
        debug_assert!(i < self.rows);
        unsafe { std::slice::from_raw_parts(self.ptr.add(i * self.stride), self.cols) }
    }

    #[inline]
    pub(crate) fn at(&self, i: usize, j: usize) -> &'a T {
        &self.row(i)[j]
    }

    /// `(top-left, top-right, bottom-left, bottom-right)` halves; rows and
    /// columns must be even.
    pub(crate) fn split_quadrants(self) -> (Self, Self, Self, Self) {
        debug_assert!(self.rows % 2 == 0 && self.cols % 2 == 0);
        let h = self.rows / 2;
        let w = self.cols / 2;
        let window = |row0: usize, col0: usize| Self {
            ptr: unsafe { self.ptr.add(row0 * self.stride + col0) },
            rows: h,
            cols: w,
            stride: self.stride,
            _marker: PhantomData,
        };
        (window(0, 0), window(0, w), window(h, 0), window(h, w))
    }
}

pub(crate) struct MatMut<'a, T> {
    ptr: *mut T,
    rows: usize,
    cols: usize,
    stride: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for MatMut<'_, T> {}

impl<'a, T> MatMut<'a, T> {
    pub(crate) fn from_slice(data: &'a mut [T], rows: usize, cols: usize, stride: usize) -> Self {
        assert!(cols <= stride);
        assert!(rows == 0 || (rows - 1) * stride + cols <= data.len());
        Self {
            ptr: data.as_mut_ptr(),
            rows,
            cols,
            stride,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Shared view with the same window.
    #[inline]
    pub(crate) fn rb(&self) -> MatRef<'_, T> {
        MatRef {
            ptr: self.ptr,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            _marker: PhantomData,
        }
    }

    /// Reborrow, so the view can be consumed more than once.
    #[inline]
    pub(crate) fn rb_mut(&mut self) -> MatMut<'_, T> {
        MatMut {
            ptr: self.ptr,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [T] {
        debug_assert!(i < self.rows);
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(i * self.stride), self.cols) }
    }

    pub(crate) fn split_quadrants(self) -> (Self, Self, Self, Self) {
        debug_assert!(self.rows % 2 == 0 && self.cols % 2 == 0);
        let h = self.rows / 2;
        let w = self.cols / 2;
        let window = |row0: usize, col0: usize| Self {
            ptr: unsafe { self.ptr.add(row0 * self.stride + col0) },
            rows: h,
            cols: w,
            stride: self.stride,
            _marker: PhantomData,
        };
        (window(0, 0), window(0, w), window(h, 0), window(h, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrants_tile_the_matrix() {
        let mut data: Vec<u32> = vec![0; 16];
        let m = MatMut::from_slice(&mut data, 4, 4, 4);
        let (mut tl, mut tr, mut bl, mut br) = m.split_quadrants();
        for i in 0..2 {
            for j in 0..2 {
                tl.row_mut(i)[j] = 1;
                tr.row_mut(i)[j] = 2;
                bl.row_mut(i)[j] = 3;
                br.row_mut(i)[j] = 4;
            }
        }
        assert_eq!(
            data,
            vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn test_ref_rows_follow_stride() {
        let data: Vec<u32> = (0..12).collect();
        let m = MatRef::from_slice(&data, 3, 2, 4);
        assert_eq!(m.row(0), &[0, 1]);
        assert_eq!(m.row(1), &[4, 5]);
        assert_eq!(*m.at(2, 1), 9);
    }
}
