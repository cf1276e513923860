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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline(always)]
unsafe fn _mm_fmla_pd(acc: __m128d, a: __m128d, b: __m128d) -> __m128d {
    _mm_add_pd(_mm_mul_pd(a, b), acc)
}

#[inline(always)]
unsafe fn _mm_hsum_pd(v: __m128d) -> f64 {
    _mm_cvtsd_f64(_mm_add_sd(v, _mm_unpackhi_pd(v, v)))
}

pub(crate) fn dot_sse_f32(src: &[f32], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe { dot_sse_f32_impl(src, kernel) }
}

pub(crate) fn dot_sse_f64(src: &[f64], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe { dot_sse_f64_impl(src, kernel) }
}

#[target_feature(enable = "sse4.1")]
unsafe fn dot_sse_f32_impl(src: &[f32], kernel: &[f64]) -> f64 {
    unsafe {
        let length = kernel.len();
        let mut acc0 = _mm_setzero_pd();
        let mut acc1 = _mm_setzero_pd();

        let mut cx = 0usize;

        while cx + 4 <= length {
            let v_src = _mm_loadu_ps(src.get_unchecked(cx..).as_ptr());
            let k0 = _mm_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            let k1 = _mm_loadu_pd(kernel.get_unchecked(cx + 2..).as_ptr());
            acc0 = _mm_fmla_pd(acc0, _mm_cvtps_pd(v_src), k0);
            acc1 = _mm_fmla_pd(acc1, _mm_cvtps_pd(_mm_movehl_ps(v_src, v_src)), k1);
            cx += 4;
        }

        let mut sum = _mm_hsum_pd(_mm_add_pd(acc0, acc1));

        while cx < length {
            sum += *src.get_unchecked(cx) as f64 * *kernel.get_unchecked(cx);
            cx += 1;
        }
        sum
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn dot_sse_f64_impl(src: &[f64], kernel: &[f64]) -> f64 {
    unsafe {
        let length = kernel.len();
        let mut acc0 = _mm_setzero_pd();
        let mut acc1 = _mm_setzero_pd();

        let mut cx = 0usize;

        while cx + 4 <= length {
            let s0 = _mm_loadu_pd(src.get_unchecked(cx..).as_ptr());
            let s1 = _mm_loadu_pd(src.get_unchecked(cx + 2..).as_ptr());
            let k0 = _mm_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            let k1 = _mm_loadu_pd(kernel.get_unchecked(cx + 2..).as_ptr());
            acc0 = _mm_fmla_pd(acc0, s0, k0);
            acc1 = _mm_fmla_pd(acc1, s1, k1);
            cx += 4;
        }

        while cx + 2 <= length {
            let s0 = _mm_loadu_pd(src.get_unchecked(cx..).as_ptr());
            let k0 = _mm_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            acc0 = _mm_fmla_pd(acc0, s0, k0);
            cx += 2;
        }

        let mut sum = _mm_hsum_pd(_mm_add_pd(acc0, acc1));

        while cx < length {
            sum += *src.get_unchecked(cx) * *kernel.get_unchecked(cx);
            cx += 1;
        }
        sum
    }
}
