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
use criterion::{criterion_group, criterion_main, Criterion};
use libsepconv::{NoStatus, SampleImage, SeparableConvolution, SeparableFilter, ThreadingPolicy};

fn gradient<T: libsepconv::Sample>(width: usize, height: usize, channels: usize) -> Vec<T> {
    (0..width * height * channels)
        .map(|i| T::from_f64((i % 251) as f64 / 251. * T::RANGE_MAX))
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("Separable");
    c.sample_size(10);

    let (width, height) = (1920usize, 1080usize);

    for taps in [3u32, 7, 25] {
        let convolution = SeparableConvolution::new(SeparableFilter::gaussian(0., taps));
        let source = gradient::<u8>(width, height, 3);
        c.bench_function(&format!("u8 planar x3 gaussian: {taps}"), |b| {
            let mut data = source.clone();
            b.iter(|| {
                let mut image = SampleImage::borrow(&mut data, width, height, 3);
                convolution.apply(&mut image, &NoStatus).unwrap();
            })
        });

        let source = gradient::<f32>(width, height, 1);
        c.bench_function(&format!("f32 plane gaussian: {taps}"), |b| {
            let mut data = source.clone();
            b.iter(|| {
                let mut image = SampleImage::borrow(&mut data, width, height, 1);
                convolution.apply(&mut image, &NoStatus).unwrap();
            })
        });

        c.bench_function(&format!("f32 plane gaussian single thread: {taps}"), |b| {
            let convolution = convolution
                .clone()
                .threading_policy(ThreadingPolicy::Single);
            let mut data = source.clone();
            b.iter(|| {
                let mut image = SampleImage::borrow(&mut data, width, height, 1);
                convolution.apply(&mut image, &NoStatus).unwrap();
            })
        });
    }

    let source = gradient::<f32>(width, height, 1);
    for d in [2usize, 8] {
        let convolution =
            SeparableConvolution::new(SeparableFilter::b3_spline()).interlacing_distance(d);
        c.bench_function(&format!("f32 plane B3 spline a trous: {d}"), |b| {
            let mut data = source.clone();
            b.iter(|| {
                let mut image = SampleImage::borrow(&mut data, width, height, 1);
                convolution.apply(&mut image, &NoStatus).unwrap();
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
