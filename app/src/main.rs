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
use flexi_logger::{Duplicate, FileSpec, Logger};
use image::{DynamicImage, GrayImage, ImageReader, Luma};
use libsepconv::{
    separable_convolution_image, NoStatus, Rect, SampleImage, SeparableConvolution,
    SeparableFilter, StandardStatus, ThreadingPolicy,
};
use std::time::Instant;

fn setup_logging(base_level: &str) {
    let _ = Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
        .log_to_file(FileSpec::default().directory("logs"))
        .duplicate_to_stderr(Duplicate::Info)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e));
}

fn synthetic_image(width: u32, height: u32) -> DynamicImage {
    let gray = GrayImage::from_fn(width, height, |x, y| {
        let checker = ((x / 16) + (y / 16)) % 2 == 0;
        let ramp = (x * 255 / width.max(1)) as u8;
        Luma([if checker { ramp } else { 255 - ramp }])
    });
    DynamicImage::ImageLuma8(gray)
}

/// Splits a float image into à trous wavelet layers with the B3 spline, returns the residual.
fn starlet_layers(image: &DynamicImage, layers: usize) -> Vec<Vec<f32>> {
    let gray = image.to_luma32f();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let mut current = SampleImage::from_vec(gray.into_raw(), width, height, 1);
    let mut result = Vec::with_capacity(layers + 1);
    for layer in 0..layers {
        let before = current.data.borrow().to_vec();
        let convolution = SeparableConvolution::new(SeparableFilter::b3_spline())
            .interlacing_distance(1 << layer)
            .threading_policy(ThreadingPolicy::Adaptive);
        let start = Instant::now();
        let completion = convolution
            .apply(&mut current, &NoStatus)
            .unwrap_or_else(|e| panic!("Layer {layer} failed with {e}"));
        log::info!(
            "Layer {} (d={}) {:?} in {:?}",
            layer,
            1 << layer,
            completion,
            start.elapsed()
        );
        let smooth = current.data.borrow();
        result.push(
            before
                .iter()
                .zip(smooth.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
        );
    }
    result.push(current.data.borrow().to_vec());
    result
}

fn save_layer(layer: &[f32], width: u32, height: u32, path: &str) {
    let min = layer.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = layer.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let scale = if max > min { 255. / (max - min) } else { 0. };
    let bytes = layer
        .iter()
        .map(|&v| ((v - min) * scale).round() as u8)
        .collect::<Vec<u8>>();
    match GrayImage::from_raw(width, height, bytes) {
        Some(img) => {
            if let Err(e) = img.save(path) {
                log::warn!("Can't save {path}: {e}");
            }
        }
        None => log::warn!("Layer doesn't match {width}x{height}"),
    }
}

fn main() {
    setup_logging("info");

    let dyn_image = match std::env::args().nth(1) {
        Some(path) => ImageReader::open(&path)
            .unwrap_or_else(|e| panic!("Can't open {path}: {e}"))
            .decode()
            .unwrap_or_else(|e| panic!("Can't decode {path}: {e}")),
        None => synthetic_image(512, 384),
    };
    let (width, height) = (dyn_image.width(), dyn_image.height());
    log::info!(
        "dimensions {}x{}, type {:?}",
        width,
        height,
        dyn_image.color()
    );

    let status = StandardStatus::new();
    let gaussian = SeparableConvolution::new(SeparableFilter::gaussian(3., 19));
    let start = Instant::now();
    let blurred = separable_convolution_image(dyn_image.clone(), &gaussian, &status)
        .unwrap_or_else(|e| panic!("Gaussian failed with {e}"));
    log::info!(
        "Gaussian 19 taps: {} of {} units in {:?}",
        status.count(),
        status.total(),
        start.elapsed()
    );
    if let Err(e) = blurred.save("gaussian.png") {
        log::warn!("Can't save gaussian.png: {e}");
    }

    let luma = dyn_image.to_luma8().into_raw();
    let mut plane = SampleImage::from_vec(luma, width as usize, height as usize, 1);
    plane.select_rectangle(Rect::new(
        width as usize / 4,
        height as usize / 4,
        width as usize * 3 / 4,
        height as usize * 3 / 4,
    ));
    let sharpen = SeparableConvolution::new(SeparableFilter::symmetric(vec![-0.5, 2., -0.5]));
    match sharpen.apply(&mut plane, &NoStatus) {
        Ok(completion) => log::info!("Sharpened center: {:?}", completion),
        Err(e) => log::warn!("Sharpening failed: {e}"),
    }
    if let Some(img) = GrayImage::from_raw(width, height, plane.data.borrow().to_vec()) {
        if let Err(e) = img.save("sharpened_center.png") {
            log::warn!("Can't save sharpened_center.png: {e}");
        }
    }

    for (i, layer) in starlet_layers(&dyn_image, 4).iter().enumerate() {
        save_layer(layer, width, height, &format!("layer_{i}.png"));
    }
}
