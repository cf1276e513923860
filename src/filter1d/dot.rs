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
use num_traits::AsPrimitive;

/// Contiguous inner product `Σ src[i] * kernel[i]`, `src` holds at least `kernel.len()` samples.
pub type DotFn<T> = fn(&[T], &[f64]) -> f64;

/// Interlaced inner product `Σ src[index[i]] * kernel[i]`.
pub type DotIndexedFn<T> = fn(&[T], &[f64], &[usize]) -> f64;

#[inline(always)]
fn w<T: AsPrimitive<f64>>(src: &[T], i: usize) -> f64 {
    src[i].as_()
}

pub(crate) fn dot3<T: Copy + 'static + AsPrimitive<f64>>(src: &[T], kernel: &[f64]) -> f64 {
    let src = &src[..3];
    let kernel = &kernel[..3];
    w(src, 0) * kernel[0] + w(src, 1) * kernel[1] + w(src, 2) * kernel[2]
}

pub(crate) fn dot5<T: Copy + 'static + AsPrimitive<f64>>(src: &[T], kernel: &[f64]) -> f64 {
    let src = &src[..5];
    let kernel = &kernel[..5];
    w(src, 0) * kernel[0]
        + w(src, 1) * kernel[1]
        + w(src, 2) * kernel[2]
        + w(src, 3) * kernel[3]
        + w(src, 4) * kernel[4]
}

pub(crate) fn dot7<T: Copy + 'static + AsPrimitive<f64>>(src: &[T], kernel: &[f64]) -> f64 {
    let src = &src[..7];
    let kernel = &kernel[..7];
    w(src, 0) * kernel[0]
        + w(src, 1) * kernel[1]
        + w(src, 2) * kernel[2]
        + w(src, 3) * kernel[3]
        + w(src, 4) * kernel[4]
        + w(src, 5) * kernel[5]
        + w(src, 6) * kernel[6]
}

pub(crate) fn dot_n<T: Copy + 'static + AsPrimitive<f64>>(src: &[T], kernel: &[f64]) -> f64 {
    let mut sum = 0f64;
    for (&s, &k) in src.iter().zip(kernel.iter()) {
        let s: f64 = s.as_();
        sum += s * k;
    }
    sum
}

pub(crate) fn dot3_indexed<T: Copy + 'static + AsPrimitive<f64>>(
    src: &[T],
    kernel: &[f64],
    index: &[usize],
) -> f64 {
    let index = &index[..3];
    w(src, index[0]) * kernel[0] + w(src, index[1]) * kernel[1] + w(src, index[2]) * kernel[2]
}

pub(crate) fn dot5_indexed<T: Copy + 'static + AsPrimitive<f64>>(
    src: &[T],
    kernel: &[f64],
    index: &[usize],
) -> f64 {
    let index = &index[..5];
    w(src, index[0]) * kernel[0]
        + w(src, index[1]) * kernel[1]
        + w(src, index[2]) * kernel[2]
        + w(src, index[3]) * kernel[3]
        + w(src, index[4]) * kernel[4]
}

pub(crate) fn dot7_indexed<T: Copy + 'static + AsPrimitive<f64>>(
    src: &[T],
    kernel: &[f64],
    index: &[usize],
) -> f64 {
    let index = &index[..7];
    w(src, index[0]) * kernel[0]
        + w(src, index[1]) * kernel[1]
        + w(src, index[2]) * kernel[2]
        + w(src, index[3]) * kernel[3]
        + w(src, index[4]) * kernel[4]
        + w(src, index[5]) * kernel[5]
        + w(src, index[6]) * kernel[6]
}

pub(crate) fn dot_n_indexed<T: Copy + 'static + AsPrimitive<f64>>(
    src: &[T],
    kernel: &[f64],
    index: &[usize],
) -> f64 {
    let mut sum = 0f64;
    for (&i, &k) in index.iter().zip(kernel.iter()) {
        sum += w(src, i) * k;
    }
    sum
}

/// Index map `0, d, 2d, ..` of an interlaced filter with `n` taps.
pub(crate) fn interlaced_index(n: usize, d: usize) -> Vec<usize> {
    (0..n).map(|i| i * d).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrolled_match_generic() {
        let src: Vec<f32> = (0..9).map(|x| x as f32 * 0.75 - 2.).collect();
        let kernel = [0.1, -0.2, 0.3, 0.4, -0.5, 0.6, 0.7];
        let pairs: [(DotFn<f32>, usize); 3] = [(dot3, 3), (dot5, 5), (dot7, 7)];
        for (dot, n) in pairs {
            let a = dot(&src, &kernel[..n]);
            let b = dot_n(&src, &kernel[..n]);
            let diff = (a - b).abs();
            assert!(
                diff < 1e-12,
                "Diff expected to be less than 1e-12 but it was {diff} for {n} taps"
            );
        }
    }

    #[test]
    fn test_identity_index_matches_contiguous() {
        let src: Vec<u16> = vec![3, 9, 27, 81, 243, 729, 2187, 6561];
        for n in [1usize, 3, 5, 7] {
            let kernel: Vec<f64> = (0..n).map(|i| 1. / (i + 1) as f64).collect();
            let index = interlaced_index(n, 1);
            let indexed = match n {
                3 => dot3_indexed(&src, &kernel, &index),
                5 => dot5_indexed(&src, &kernel, &index),
                7 => dot7_indexed(&src, &kernel, &index),
                _ => dot_n_indexed(&src, &kernel, &index),
            };
            assert_eq!(indexed, dot_n(&src, &kernel));
        }
    }

    #[test]
    fn test_interlaced_taps() {
        let src = [1u8, 100, 2, 100, 3];
        let index = interlaced_index(3, 2);
        assert_eq!(index, vec![0, 2, 4]);
        assert_eq!(dot3_indexed(&src, &[1., 1., 1.], &index), 6.);
    }
}
