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
use crate::SeparableFilter;

/// Normalized sampled gaussian of `width` taps centered at `width / 2`.
pub fn gaussian_kernel_1d_f64(width: u32, sigma: f64) -> Vec<f64> {
    let mut sum_norm: f64 = 0.;
    let mut kernel: Vec<f64> = vec![0.; width as usize];
    let scale = 1. / (f64::sqrt(2. * std::f64::consts::PI) * sigma);
    let mean = (width / 2) as f64;

    for (x, item) in kernel.iter_mut().enumerate() {
        let dx = (x as f64 - mean) / sigma;
        let new_weight = f64::exp(-0.5 * dx * dx) * scale;
        *item = new_weight;
        sum_norm += new_weight;
    }

    if sum_norm != 0. {
        let sum_scale = 1. / sum_norm;
        for item in kernel.iter_mut() {
            *item *= sum_scale;
        }
    }

    kernel
}

/// Computes sigma from kernel size
pub fn sigma_size_d(kernel_size: f64) -> f64 {
    let safe_kernel_size = if kernel_size <= 1. { 2. } else { kernel_size };
    0.3 * ((safe_kernel_size - 1.) * 0.5 - 1.) + 0.8
}

impl SeparableFilter {
    /// Gaussian filter with `size` taps, `size` is rounded up to the next odd number.
    ///
    /// If `sigma` is not positive it is derived from `size`.
    pub fn gaussian(sigma: f64, size: u32) -> SeparableFilter {
        let size = size.max(1) | 1;
        let sigma = if sigma > 0. {
            sigma
        } else {
            sigma_size_d(size as f64)
        };
        SeparableFilter::symmetric(gaussian_kernel_1d_f64(size, sigma)).with_name("Gaussian")
    }

    /// Cubic B-spline `[1, 4, 6, 4, 1] / 16`, the usual scaling function of the à trous
    /// wavelet transform.
    pub fn b3_spline() -> SeparableFilter {
        let coefficients = [1., 4., 6., 4., 1.].map(|x: f64| x / 16.);
        SeparableFilter::symmetric(coefficients.to_vec()).with_name("B3 Spline")
    }

    /// `[1, 2, 1] / 4`.
    pub fn linear_interpolation() -> SeparableFilter {
        SeparableFilter::symmetric(vec![0.25, 0.5, 0.25]).with_name("Linear")
    }

    /// Unnormalized box of `size` ones, `size` is rounded up to the next odd number.
    pub fn box_filter(size: usize) -> SeparableFilter {
        let size = size.max(1) | 1;
        SeparableFilter::symmetric(vec![1.; size]).with_name("Box")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_is_normalized() {
        let kernel = gaussian_kernel_1d_f64(7, 1.5);
        let sum: f64 = kernel.iter().sum();
        assert!(
            (sum - 1.).abs() < 1e-12,
            "Sum expected to be 1 but it was {sum}"
        );
        for i in 0..3 {
            assert_eq!(kernel[i], kernel[6 - i]);
            assert!(kernel[i] < kernel[i + 1]);
        }
    }

    #[test]
    fn test_generated_filters() {
        let gaussian = SeparableFilter::gaussian(0., 4);
        assert_eq!(gaussian.size(), 5);
        assert!(gaussian.is_symmetric());
        assert!((gaussian.weight() - 1.).abs() < 1e-12);
        assert_eq!(SeparableFilter::b3_spline().row_filter()[2], 0.375);
        assert_eq!(SeparableFilter::linear_interpolation().weight(), 1.);
        assert_eq!(SeparableFilter::box_filter(3).weight(), 9.);
        assert_eq!(SeparableFilter::box_filter(4).size(), 5);
    }
}
