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
unsafe fn _mm256_hsum_pd(v: __m256d) -> f64 {
    let lo = _mm256_castpd256_pd128(v);
    let hi = _mm256_extractf128_pd::<1>(v);
    let q = _mm_add_pd(lo, hi);
    _mm_cvtsd_f64(_mm_add_sd(q, _mm_unpackhi_pd(q, q)))
}

pub(crate) fn dot_avx_f32(src: &[f32], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe { dot_avx_f32_impl(src, kernel) }
}

pub(crate) fn dot_avx_f64(src: &[f64], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe { dot_avx_f64_impl(src, kernel) }
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_avx_f32_impl(src: &[f32], kernel: &[f64]) -> f64 {
    unsafe {
        let length = kernel.len();
        let mut acc0 = _mm256_setzero_pd();
        let mut acc1 = _mm256_setzero_pd();

        let mut cx = 0usize;

        while cx + 8 <= length {
            let v_src = _mm256_loadu_ps(src.get_unchecked(cx..).as_ptr());
            let k0 = _mm256_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            let k1 = _mm256_loadu_pd(kernel.get_unchecked(cx + 4..).as_ptr());
            acc0 = _mm256_fmadd_pd(_mm256_cvtps_pd(_mm256_castps256_ps128(v_src)), k0, acc0);
            acc1 = _mm256_fmadd_pd(_mm256_cvtps_pd(_mm256_extractf128_ps::<1>(v_src)), k1, acc1);
            cx += 8;
        }

        while cx + 4 <= length {
            let v_src = _mm_loadu_ps(src.get_unchecked(cx..).as_ptr());
            let k0 = _mm256_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            acc0 = _mm256_fmadd_pd(_mm256_cvtps_pd(v_src), k0, acc0);
            cx += 4;
        }

        let mut sum = _mm256_hsum_pd(_mm256_add_pd(acc0, acc1));

        while cx < length {
            sum = f64::mul_add(
                *src.get_unchecked(cx) as f64,
                *kernel.get_unchecked(cx),
                sum,
            );
            cx += 1;
        }
        sum
    }
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn dot_avx_f64_impl(src: &[f64], kernel: &[f64]) -> f64 {
    unsafe {
        let length = kernel.len();
        let mut acc0 = _mm256_setzero_pd();
        let mut acc1 = _mm256_setzero_pd();

        let mut cx = 0usize;

        while cx + 8 <= length {
            let s0 = _mm256_loadu_pd(src.get_unchecked(cx..).as_ptr());
            let s1 = _mm256_loadu_pd(src.get_unchecked(cx + 4..).as_ptr());
            let k0 = _mm256_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            let k1 = _mm256_loadu_pd(kernel.get_unchecked(cx + 4..).as_ptr());
            acc0 = _mm256_fmadd_pd(s0, k0, acc0);
            acc1 = _mm256_fmadd_pd(s1, k1, acc1);
            cx += 8;
        }

        while cx + 4 <= length {
            let s0 = _mm256_loadu_pd(src.get_unchecked(cx..).as_ptr());
            let k0 = _mm256_loadu_pd(kernel.get_unchecked(cx..).as_ptr());
            acc0 = _mm256_fmadd_pd(s0, k0, acc0);
            cx += 4;
        }

        let mut sum = _mm256_hsum_pd(_mm256_add_pd(acc0, acc1));

        while cx < length {
            sum = f64::mul_add(*src.get_unchecked(cx), *kernel.get_unchecked(cx), sum);
            cx += 1;
        }
        sum
    }
}
