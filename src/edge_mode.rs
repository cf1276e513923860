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
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Declares how a line is extended past its ends before filtering
pub enum EdgeMode {
    /// If filter goes out of bounds line will be replicated with rule `fedcba|abcdefgh|hgfedcb`
    #[default]
    Reflect = 0,
    /// If filter goes out of bounds line will be replicated with rule `gfedcb|abcdefgh|gfedcba`
    Reflect101 = 1,
}

impl From<usize> for EdgeMode {
    fn from(value: usize) -> Self {
        match value {
            0 => EdgeMode::Reflect,
            1 => EdgeMode::Reflect101,
            _ => {
                panic!("Unknown edge mode for value: {}", value);
            }
        }
    }
}

impl EdgeMode {
    /// Smallest line length able to provide `pad` mirrored samples on each side.
    #[inline]
    pub(crate) fn min_line_length(self, pad: usize) -> usize {
        match self {
            EdgeMode::Reflect => pad,
            EdgeMode::Reflect101 => pad + 1,
        }
    }
}

/// Writes `src` into the middle of `dst` and mirrors `pad` samples into both margins.
///
/// `dst` must hold exactly `src.len() + 2 * pad` samples and `src` must be at least
/// [EdgeMode::min_line_length] long.
#[inline]
pub(crate) fn mirror_pad<T: Copy>(src: &[T], dst: &mut [T], pad: usize, edge_mode: EdgeMode) {
    let n = src.len();
    debug_assert_eq!(dst.len(), n + 2 * pad);
    debug_assert!(n >= edge_mode.min_line_length(pad));
    let (head, rest) = dst.split_at_mut(pad);
    let (body, tail) = rest.split_at_mut(n);
    body.copy_from_slice(src);
    match edge_mode {
        EdgeMode::Reflect => {
            for (dst, &src) in head.iter_mut().zip(src[..pad].iter().rev()) {
                *dst = src;
            }
            for (dst, &src) in tail.iter_mut().zip(src[n - pad..].iter().rev()) {
                *dst = src;
            }
        }
        EdgeMode::Reflect101 => {
            for (dst, &src) in head.iter_mut().zip(src[1..pad + 1].iter().rev()) {
                *dst = src;
            }
            for (dst, &src) in tail.iter_mut().zip(src[n - 1 - pad..n - 1].iter().rev()) {
                *dst = src;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_repeats_edge() {
        let src = [1, 2, 3, 4, 5];
        let mut dst = [0; 9];
        mirror_pad(&src, &mut dst, 2, EdgeMode::Reflect);
        assert_eq!(dst, [2, 1, 1, 2, 3, 4, 5, 5, 4]);
    }

    #[test]
    fn test_reflect101_skips_edge() {
        let src = [1, 2, 3, 4, 5];
        let mut dst = [0; 7];
        mirror_pad(&src, &mut dst, 1, EdgeMode::Reflect101);
        assert_eq!(dst, [2, 1, 2, 3, 4, 5, 4]);
    }

    #[test]
    fn test_full_length_pad() {
        let src = [7, 8, 9];
        let mut dst = [0; 9];
        mirror_pad(&src, &mut dst, 3, EdgeMode::Reflect);
        assert_eq!(dst, [9, 8, 7, 7, 8, 9, 9, 8, 7]);
        let mut dst = [0; 7];
        mirror_pad(&src, &mut dst, 2, EdgeMode::Reflect101);
        assert_eq!(dst, [9, 8, 7, 8, 9, 8, 7]);
    }

    #[test]
    fn test_zero_pad_is_copy() {
        let src = [4.5f32];
        let mut dst = [0f32; 1];
        mirror_pad(&src, &mut dst, 0, EdgeMode::Reflect101);
        assert_eq!(dst, [4.5]);
    }
}
