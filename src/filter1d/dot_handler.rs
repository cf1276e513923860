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
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
use crate::filter1d::avx::{dot_avx_f32, dot_avx_f64};
use crate::filter1d::dot::{
    dot3, dot3_indexed, dot5, dot5_indexed, dot7, dot7_indexed, dot_n, dot_n_indexed, DotFn,
    DotIndexedFn,
};
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
use crate::filter1d::neon::{dot_neon_f32, dot_neon_f64};
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
use crate::filter1d::sse::{dot_sse_f32, dot_sse_f64};

/// Resolves the inner product implementation for a sample kind and filter length once,
/// before any line is processed.
pub trait DotHandler: Sized {
    fn get_dot_handler(taps: usize) -> DotFn<Self>;

    fn get_dot_indexed_handler(taps: usize) -> DotIndexedFn<Self>;
}

macro_rules! scalar_dot {
    ($taps:expr, $generic:expr) => {
        match $taps {
            3 => dot3 as DotFn<_>,
            5 => dot5,
            7 => dot7,
            _ => $generic,
        }
    };
}

macro_rules! scalar_indexed {
    ($taps:expr) => {
        match $taps {
            3 => dot3_indexed as DotIndexedFn<_>,
            5 => dot5_indexed,
            7 => dot7_indexed,
            _ => dot_n_indexed,
        }
    };
}

macro_rules! impl_scalar_dot_handler {
    ($sample:ty) => {
        impl DotHandler for $sample {
            fn get_dot_handler(taps: usize) -> DotFn<$sample> {
                scalar_dot!(taps, dot_n)
            }

            fn get_dot_indexed_handler(taps: usize) -> DotIndexedFn<$sample> {
                scalar_indexed!(taps)
            }
        }
    };
}

impl_scalar_dot_handler!(u8);
impl_scalar_dot_handler!(u16);
impl_scalar_dot_handler!(u32);

impl DotHandler for f32 {
    #[cfg(not(any(
        all(target_arch = "aarch64", feature = "neon"),
        all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse")
    )))]
    fn get_dot_handler(taps: usize) -> DotFn<f32> {
        scalar_dot!(taps, dot_n)
    }

    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    fn get_dot_handler(taps: usize) -> DotFn<f32> {
        scalar_dot!(taps, dot_neon_f32)
    }

    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    fn get_dot_handler(taps: usize) -> DotFn<f32> {
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        if std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")
        {
            return scalar_dot!(taps, dot_avx_f32);
        }
        if std::arch::is_x86_feature_detected!("sse4.1") {
            return scalar_dot!(taps, dot_sse_f32);
        }
        scalar_dot!(taps, dot_n)
    }

    fn get_dot_indexed_handler(taps: usize) -> DotIndexedFn<f32> {
        scalar_indexed!(taps)
    }
}

impl DotHandler for f64 {
    #[cfg(not(any(
        all(target_arch = "aarch64", feature = "neon"),
        all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse")
    )))]
    fn get_dot_handler(taps: usize) -> DotFn<f64> {
        scalar_dot!(taps, dot_n)
    }

    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    fn get_dot_handler(taps: usize) -> DotFn<f64> {
        scalar_dot!(taps, dot_neon_f64)
    }

    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    fn get_dot_handler(taps: usize) -> DotFn<f64> {
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        if std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")
        {
            return scalar_dot!(taps, dot_avx_f64);
        }
        if std::arch::is_x86_feature_detected!("sse4.1") {
            return scalar_dot!(taps, dot_sse_f64);
        }
        scalar_dot!(taps, dot_n)
    }

    fn get_dot_indexed_handler(taps: usize) -> DotIndexedFn<f64> {
        scalar_indexed!(taps)
    }
}
