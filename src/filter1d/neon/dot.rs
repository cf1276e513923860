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
use std::arch::aarch64::*;

pub(crate) fn dot_neon_f32(src: &[f32], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe {
        let length = kernel.len();
        let mut acc0 = vdupq_n_f64(0.);
        let mut acc1 = vdupq_n_f64(0.);

        let mut cx = 0usize;

        while cx + 4 <= length {
            let v_src = vld1q_f32(src.get_unchecked(cx..).as_ptr());
            let k0 = vld1q_f64(kernel.get_unchecked(cx..).as_ptr());
            let k1 = vld1q_f64(kernel.get_unchecked(cx + 2..).as_ptr());
            acc0 = vfmaq_f64(acc0, vcvt_f64_f32(vget_low_f32(v_src)), k0);
            acc1 = vfmaq_f64(acc1, vcvt_high_f64_f32(v_src), k1);
            cx += 4;
        }

        let mut sum = vaddvq_f64(vaddq_f64(acc0, acc1));

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

pub(crate) fn dot_neon_f64(src: &[f64], kernel: &[f64]) -> f64 {
    assert!(src.len() >= kernel.len());
    unsafe {
        let length = kernel.len();
        let mut acc0 = vdupq_n_f64(0.);
        let mut acc1 = vdupq_n_f64(0.);

        let mut cx = 0usize;

        while cx + 4 <= length {
            let s0 = vld1q_f64(src.get_unchecked(cx..).as_ptr());
            let s1 = vld1q_f64(src.get_unchecked(cx + 2..).as_ptr());
            let k0 = vld1q_f64(kernel.get_unchecked(cx..).as_ptr());
            let k1 = vld1q_f64(kernel.get_unchecked(cx + 2..).as_ptr());
            acc0 = vfmaq_f64(acc0, s0, k0);
            acc1 = vfmaq_f64(acc1, s1, k1);
            cx += 4;
        }

        while cx + 2 <= length {
            let s0 = vld1q_f64(src.get_unchecked(cx..).as_ptr());
            let k0 = vld1q_f64(kernel.get_unchecked(cx..).as_ptr());
            acc0 = vfmaq_f64(acc0, s0, k0);
            cx += 2;
        }

        let mut sum = vaddvq_f64(vaddq_f64(acc0, acc1));

        while cx < length {
            sum = f64::mul_add(*src.get_unchecked(cx), *kernel.get_unchecked(cx), sum);
            cx += 1;
        }
        sum
    }
}
