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
/// Helper trait to convert and round if we are storing in integral type
pub trait ToStorage<T>: 'static + Copy
where
    T: 'static + Copy,
{
    /// Convert a value to another, using the `to` operator.
    fn to_(self) -> T;
}

macro_rules! impl_to_integral_storage {
    ($from:ty, $to:ty) => {
        impl ToStorage<$to> for $from {
            #[inline(always)]
            fn to_(self) -> $to {
                if self.is_nan() {
                    return 0;
                }
                self.round().max(0 as $from).min(<$to>::MAX as $from) as $to
            }
        }
    };
}

impl_to_integral_storage!(f64, u8);
impl_to_integral_storage!(f64, u16);
impl_to_integral_storage!(f64, u32);

macro_rules! impl_to_direct_storage {
    ($from:ty, $to:ty) => {
        impl ToStorage<$to> for $from {
            #[inline(always)]
            fn to_(self) -> $to {
                self as $to
            }
        }
    };
}

impl_to_direct_storage!(f64, f64);
impl_to_direct_storage!(f64, f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_rounding_and_saturation() {
        let v: u8 = 127.5f64.to_();
        assert_eq!(v, 128);
        let v: u8 = (-3.2f64).to_();
        assert_eq!(v, 0);
        let v: u8 = 1e6f64.to_();
        assert_eq!(v, 255);
        let v: u16 = 65535.7f64.to_();
        assert_eq!(v, 65535);
        let v: u32 = f64::NAN.to_();
        assert_eq!(v, 0);
        let v: u32 = 4294967295.0f64.to_();
        assert_eq!(v, u32::MAX);
    }

    #[test]
    fn test_direct_storage() {
        let v: f32 = 0.25f64.to_();
        assert_eq!(v, 0.25f32);
        let v: f64 = (-1.5f64).to_();
        assert_eq!(v, -1.5);
    }
}
