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
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConvolutionError {
    /// Convolution was requested with an empty row or column filter.
    EmptyFilter,
    OddKernel(usize),
    ZeroInterlacingDistance,
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    ChannelOutOfBounds(MismatchedSize),
    ExceedingPointerSize,
    InvalidArguments,
}

impl Error for ConvolutionError {}

impl std::fmt::Display for ConvolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConvolutionError::EmptyFilter => {
                f.write_str("Invalid access to uninitialized separable convolution")
            }
            ConvolutionError::OddKernel(size) => {
                f.write_fmt(format_args!("Kernel size must be odd, but received {size}"))
            }
            ConvolutionError::ZeroInterlacingDistance => {
                f.write_str("Interlacing distance must be at least one")
            }
            ConvolutionError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            ConvolutionError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ConvolutionError::ChannelOutOfBounds(size) => f.write_fmt(format_args!(
                "Channel index {} is out of bounds for an image with {} channels",
                size.received, size.expected
            )),
            ConvolutionError::ExceedingPointerSize => {
                f.write_str("Image bounds and filter window exceeds pointer capacity")
            }
            ConvolutionError::InvalidArguments => f.write_str("Invalid arguments"),
        }
    }
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<(), ConvolutionError> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(ConvolutionError::ZeroBaseSize);
    }
    let expected = width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(channels))
        .ok_or(ConvolutionError::ExceedingPointerSize)?;
    if arr.len() < expected {
        return Err(ConvolutionError::MinimumSliceSizeMismatch(MismatchedSize {
            expected,
            received: arr.len(),
        }));
    }
    Ok(())
}
