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
use crate::edge_mode::{mirror_pad, EdgeMode};
use crate::filter1d::dot::{interlaced_index, DotFn, DotIndexedFn};
use crate::safe_math::overlapping_distance;
use crate::{ConvolutionError, Sample};

/// One-dimensional, possibly interlaced filter bound to a sample kind.
///
/// Dot product implementations are resolved on construction, so convolving a line never
/// dispatches on the filter length or the CPU features again.
#[derive(Clone)]
pub(crate) struct LineFilter<'k, T> {
    kernel: &'k [f64],
    index: Vec<usize>,
    pad: usize,
    edge_mode: EdgeMode,
    dot: DotFn<T>,
    dot_indexed: DotIndexedFn<T>,
}

impl<'k, T: Sample> LineFilter<'k, T> {
    pub(crate) fn new(
        kernel: &'k [f64],
        interlacing_distance: usize,
        edge_mode: EdgeMode,
    ) -> Result<Self, ConvolutionError> {
        if kernel.is_empty() {
            return Err(ConvolutionError::EmptyFilter);
        }
        if interlacing_distance == 0 {
            return Err(ConvolutionError::ZeroInterlacingDistance);
        }
        let dn = overlapping_distance(kernel.len(), interlacing_distance)?;
        let index = if interlacing_distance > 1 {
            interlaced_index(kernel.len(), interlacing_distance)
        } else {
            Vec::new()
        };
        Ok(LineFilter {
            kernel,
            index,
            pad: dn >> 1,
            edge_mode,
            dot: T::get_dot_handler(kernel.len()),
            dot_indexed: T::get_dot_indexed_handler(kernel.len()),
        })
    }

    #[inline]
    pub(crate) fn scratch_len(&self, line_length: usize) -> usize {
        line_length + 2 * self.pad
    }

    /// Replaces every sample of `line` by the filter response centered on it.
    ///
    /// `scratch` must hold at least [LineFilter::scratch_len] samples.
    pub(crate) fn convolve(&self, line: &mut [T], scratch: &mut [T]) {
        let n = line.len();
        let scratch = &mut scratch[..self.scratch_len(n)];
        mirror_pad(line, scratch, self.pad, self.edge_mode);
        if self.index.is_empty() {
            for (x, dst) in line.iter_mut().enumerate() {
                *dst = T::from_f64((self.dot)(&scratch[x..], self.kernel));
            }
        } else {
            for (x, dst) in line.iter_mut().enumerate() {
                *dst = T::from_f64((self.dot_indexed)(&scratch[x..], self.kernel, &self.index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_boundaries() {
        let kernel = [1. / 3., 1. / 3., 1. / 3.];
        let filter = LineFilter::<f64>::new(&kernel, 1, EdgeMode::Reflect101).unwrap();
        let mut line = [1., 2., 3., 4., 5.];
        let mut scratch = vec![0.; filter.scratch_len(line.len())];
        filter.convolve(&mut line, &mut scratch);
        let expected = [5. / 3., 2., 3., 4., 13. / 3.];
        for (i, (&v, &e)) in line.iter().zip(expected.iter()).enumerate() {
            let diff = (v - e).abs();
            assert!(
                diff < 1e-12,
                "Diff expected to be less than 1e-12 but it was {diff} at {i}"
            );
        }

        let filter = LineFilter::<f64>::new(&kernel, 1, EdgeMode::Reflect).unwrap();
        let mut line = [1., 2., 3., 4., 5.];
        filter.convolve(&mut line, &mut scratch);
        assert!((line[0] - 4. / 3.).abs() < 1e-12);
        assert!((line[4] - 14. / 3.).abs() < 1e-12);
    }

    #[test]
    fn test_interlaced_window() {
        let kernel = [1., 1., 1.];
        let filter = LineFilter::<f32>::new(&kernel, 2, EdgeMode::Reflect).unwrap();
        assert_eq!(filter.scratch_len(7), 11);
        let mut line = [1f32, 0., 0., 0., 0., 0., 0.];
        let mut scratch = vec![0f32; filter.scratch_len(line.len())];
        filter.convolve(&mut line, &mut scratch);
        // Padded line is [0, 1 | 1, 0, 0, 0, 0, 0, 0 | 0, 0], taps at 0, 2 and 4.
        assert_eq!(line, [1., 1., 1., 0., 0., 0., 0.]);
    }

    #[test]
    fn test_interlaced_one_matches_contiguous() {
        let kernel = [0.1, 0.2, 0.4, 0.2, 0.1];
        let contiguous = LineFilter::<f64>::new(&kernel, 1, EdgeMode::Reflect).unwrap();
        let mut indexed = contiguous.clone();
        indexed.index = interlaced_index(kernel.len(), 1);
        let source: Vec<f64> = (0..23).map(|x| ((x * 7) % 11) as f64).collect();
        let mut a = source.clone();
        let mut b = source.clone();
        let mut scratch = vec![0.; contiguous.scratch_len(source.len())];
        contiguous.convolve(&mut a, &mut scratch);
        indexed.convolve(&mut b, &mut scratch);
        for (i, (&a, &b)) in a.iter().zip(b.iter()).enumerate() {
            let diff = (a - b).abs();
            assert!(
                diff < 1e-12,
                "Diff expected to be less than 1e-12 but it was {diff} at {i}"
            );
        }
    }

    #[test]
    fn test_rejects_zero_distance() {
        let kernel = [1.];
        assert!(matches!(
            LineFilter::<u8>::new(&kernel, 0, EdgeMode::Reflect),
            Err(ConvolutionError::ZeroInterlacingDistance)
        ));
        assert!(matches!(
            LineFilter::<u8>::new(&[], 1, EdgeMode::Reflect),
            Err(ConvolutionError::EmptyFilter)
        ));
    }
}
