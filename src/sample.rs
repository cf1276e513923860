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
use crate::filter1d::DotHandler;
use crate::to_storage::ToStorage;
use num_traits::AsPrimitive;
use std::fmt::Debug;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Closed set of sample kinds a [crate::SampleImage] may hold:
/// 8/16/32-bit unsigned integers and 32/64-bit IEEE floats.
///
/// Conversions to and from the `f64` accumulation type live here so the convolution
/// core never branches on the sample kind inside a hot loop.
pub trait Sample:
    Copy + Default + Debug + PartialOrd + Send + Sync + 'static + private::Sealed + DotHandler
{
    /// Floating point kind an image of this kind is convolved in.
    ///
    /// `u8` and `u16` use `f32`, `u32` needs `f64` to keep every value exact.
    type Intermediate: Sample;

    /// Upper bound of the representable range, 1 for normalized floats.
    const RANGE_MAX: f64;

    const IS_FLOAT: bool;

    fn to_f64(self) -> f64;

    /// Rounds and saturates for integral kinds.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($sample:ty, $intermediate:ty, $range:expr, $is_float:expr) => {
        impl Sample for $sample {
            type Intermediate = $intermediate;
            const RANGE_MAX: f64 = $range;
            const IS_FLOAT: bool = $is_float;

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self.as_()
            }

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                <f64 as ToStorage<$sample>>::to_(value)
            }
        }
    };
}

impl_sample!(u8, f32, u8::MAX as f64, false);
impl_sample!(u16, f32, u16::MAX as f64, false);
impl_sample!(u32, f64, u32::MAX as f64, false);
impl_sample!(f32, f32, 1.0, true);
impl_sample!(f64, f64, 1.0, true);

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: Sample>(values: &[T]) {
        for &v in values {
            let converted = T::from_f64(v.to_f64());
            assert_eq!(converted, v, "Round trip of {v:?} produced {converted:?}");
        }
    }

    #[test]
    fn test_round_trips_exact() {
        round_trip(&[0u8, 1, 128, 255]);
        round_trip(&[0u16, 1, 32768, 65535]);
        round_trip(&[0u32, 1, 1 << 31, u32::MAX]);
        round_trip(&[0f32, 0.5, 1.0, -2.25]);
        round_trip(&[0f64, 1e-12, 1.0, -7.125]);
    }

    #[test]
    fn test_intermediate_holds_full_range() {
        let v = <u16 as Sample>::Intermediate::from_f64(65535.0);
        assert_eq!(v, 65535f32);
        let v = <u32 as Sample>::Intermediate::from_f64(u32::MAX as f64);
        assert_eq!(v as u64, u32::MAX as u64);
        assert_eq!(u8::RANGE_MAX, 255.);
        assert_eq!(f32::RANGE_MAX, 1.);
        assert!(f64::IS_FLOAT && !u32::IS_FLOAT);
    }
}
