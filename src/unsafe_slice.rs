/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
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
use std::cell::UnsafeCell;

/// Shared view of a mutable slice handed to every worker of a pass.
///
/// Workers own disjoint row or column ranges, so no two threads ever touch the same
/// index. All writing accessors are `unsafe` because the compiler can't verify that.
#[derive(Copy, Clone, Debug)]
pub struct UnsafeSlice<'a, T> {
    pub slice: &'a [UnsafeCell<T>],
}

unsafe impl<T: Send + Sync> Send for UnsafeSlice<'_, T> {}

unsafe impl<T: Send + Sync> Sync for UnsafeSlice<'_, T> {}

impl<'a, T> UnsafeSlice<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        let ptr = slice as *mut [T] as *const [UnsafeCell<T>];
        Self {
            slice: unsafe { &*ptr },
        }
    }

    /// SAFETY: It is UB if two threads write to the same index without
    /// synchronization.
    #[inline(always)]
    pub unsafe fn write(&self, i: usize, value: T) {
        let ptr = self.slice[i].get();
        unsafe {
            *ptr = value;
        }
    }

    /// Mutable access to `start..start + len`.
    ///
    /// SAFETY: the range must not be accessed by any other thread while the
    /// returned slice is alive.
    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice_mut(&self, start: usize, len: usize) -> &mut [T] {
        let cells = &self.slice[start..start + len];
        unsafe { std::slice::from_raw_parts_mut(cells.as_ptr() as *mut T, len) }
    }
}

impl<T: Copy> UnsafeSlice<'_, T> {
    /// Copies `dst.len()` samples starting at `start`, `stride` samples apart.
    ///
    /// SAFETY: no other thread may write the strided positions concurrently.
    #[inline(always)]
    pub unsafe fn gather_strided(&self, start: usize, stride: usize, dst: &mut [T]) {
        for (i, dst) in dst.iter_mut().enumerate() {
            *dst = unsafe { *self.slice[start + i * stride].get() };
        }
    }

    /// Inverse of [UnsafeSlice::gather_strided].
    ///
    /// SAFETY: no other thread may access the strided positions concurrently.
    #[inline(always)]
    pub unsafe fn scatter_strided(&self, start: usize, stride: usize, src: &[T]) {
        for (i, &src) in src.iter().enumerate() {
            unsafe {
                self.write(start + i * stride, src);
            }
        }
    }
}
