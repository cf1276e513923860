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
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use libsepconv::{
    Completion, EdgeMode, NoStatus, Rect, Sample, SampleImage, SeparableConvolution,
    SeparableFilter, ThreadingPolicy,
};
use std::num::NonZeroUsize;

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u8,
    pub src_height: u8,
    pub channels: u8,
    pub taps: u8,
    pub interlacing_distance: u8,
    pub edge_mode: u8,
    pub threads: u8,
    pub rect: (u8, u8, u8, u8),
    pub row: bool,
    pub column: bool,
}

fuzz_target!(|data: SrcImage| {
    let (width, height) = (data.src_width as usize, data.src_height as usize);
    if width == 0 || height == 0 {
        return;
    }
    let channels = (data.channels % 4) as usize + 1;
    let taps = (data.taps % 16) as u32 * 2 + 1;
    let threads = NonZeroUsize::new((data.threads % 8) as usize + 1).unwrap();
    let convolution = SeparableConvolution::new(SeparableFilter::gaussian(0., taps))
        .interlacing_distance((data.interlacing_distance % 5) as usize + 1)
        .edge_mode(EdgeMode::from((data.edge_mode % 2) as usize))
        .row_convolution(data.row)
        .column_convolution(data.column)
        .threading_policy(ThreadingPolicy::Fixed(threads));
    let rect = Rect::new(
        data.rect.0 as usize,
        data.rect.1 as usize,
        data.rect.2 as usize,
        data.rect.3 as usize,
    );
    fuzz_uniform(0.5f32, width, height, channels, rect, &convolution);
    fuzz_uniform(127u8, width, height, channels, rect, &convolution);
    fuzz_uniform(4000u16, width, height, channels, rect, &convolution);
    fuzz_uniform(0.25f64, width, height, channels, rect, &convolution);
});

fn fuzz_uniform<T: Sample>(
    value: T,
    width: usize,
    height: usize,
    channels: usize,
    rect: Rect,
    convolution: &SeparableConvolution,
) {
    let mut image = SampleImage::from_vec(
        vec![value; width * height * channels],
        width,
        height,
        channels,
    );
    image.select_rectangle(rect);
    let completion = convolution.apply(&mut image, &NoStatus).unwrap();
    if completion != Completion::Done {
        return;
    }
    let tolerance = if T::IS_FLOAT {
        value.to_f64() * 1e-4
    } else {
        1.
    };
    for &v in image.data.borrow() {
        let diff = (v.to_f64() - value.to_f64()).abs();
        assert!(
            diff <= tolerance,
            "Diff expected to be less than {tolerance} but it was {diff}"
        );
    }
}
