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
use crate::{ConvolutionError, Sample, SampleImage, SeparableConvolution, StatusMonitor};
use image::{DynamicImage, ImageBuffer, Pixel};

/// Splits an interleaved buffer into one plane per channel.
fn deinterleave<'a, T: Sample>(
    interleaved: &[T],
    width: u32,
    height: u32,
    channels: usize,
) -> SampleImage<'a, T> {
    let mut planar = SampleImage::alloc(width as usize, height as usize, channels);
    let plane_len = planar.plane_len();
    let data = planar.data.borrow_mut();
    for (i, pixel) in interleaved.chunks_exact(channels).enumerate() {
        for (c, &v) in pixel.iter().enumerate() {
            data[c * plane_len + i] = v;
        }
    }
    planar
}

fn interleave<T: Sample>(planar: &SampleImage<T>) -> Vec<T> {
    let channels = planar.channels;
    let plane_len = planar.plane_len();
    let data = planar.data.borrow();
    let mut interleaved = vec![T::default(); plane_len * channels];
    for (i, pixel) in interleaved.chunks_exact_mut(channels).enumerate() {
        for (c, dst) in pixel.iter_mut().enumerate() {
            *dst = data[c * plane_len + i];
        }
    }
    interleaved
}

fn convolve_buffer<P>(
    img: &ImageBuffer<P, Vec<P::Subpixel>>,
    convolution: &SeparableConvolution,
    status: &dyn StatusMonitor,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, ConvolutionError>
where
    P: Pixel,
    P::Subpixel: Sample,
{
    let (width, height) = img.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let mut planar = deinterleave(img.as_raw().as_slice(), width, height, channels);
    convolution.apply(&mut planar, status)?;
    ImageBuffer::from_raw(width, height, interleave(&planar))
        .ok_or(ConvolutionError::InvalidArguments)
}

/// Convolves every channel of an image provided by the `image` crate.
///
/// NOTE: alpha is convolved like any other channel.
///
/// 8 and 16 bit images keep their depth, 32 bit float images are convolved as is.
/// Other pixel layouts are converted to RGBA 32 bit float first.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `convolution`: See [SeparableConvolution] for more info.
/// * `status`: Receives progress of the convolution and may cancel it.
///
pub fn separable_convolution_image(
    image: DynamicImage,
    convolution: &SeparableConvolution,
    status: &dyn StatusMonitor,
) -> Result<DynamicImage, ConvolutionError> {
    match image {
        DynamicImage::ImageLuma8(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageLuma8(new_image))
        }
        DynamicImage::ImageLumaA8(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageLumaA8(new_image))
        }
        DynamicImage::ImageRgb8(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgb8(new_image))
        }
        DynamicImage::ImageRgba8(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
        DynamicImage::ImageLuma16(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageLuma16(new_image))
        }
        DynamicImage::ImageLumaA16(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageLumaA16(new_image))
        }
        DynamicImage::ImageRgb16(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgb16(new_image))
        }
        DynamicImage::ImageRgba16(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgba16(new_image))
        }
        DynamicImage::ImageRgb32F(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgb32F(new_image))
        }
        DynamicImage::ImageRgba32F(img) => {
            let new_image = convolve_buffer(&img, convolution, status)?;
            Ok(DynamicImage::ImageRgba32F(new_image))
        }
        other => separable_convolution_image(
            DynamicImage::ImageRgba32F(other.to_rgba32f()),
            convolution,
            status,
        ),
    }
}
