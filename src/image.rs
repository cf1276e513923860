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
use crate::img_size::{ImageSize, Rect};
use crate::util::check_slice_size;
use crate::{ConvolutionError, MismatchedSize, Sample};
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
    /// Reference counted storage, cloned on first mutable access while shared.
    Shared(Arc<Vec<T>>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
            Self::Shared(arc) => arc.as_slice(),
        }
    }

    /// Mutable access, detaching shared storage first.
    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
            Self::Shared(arc) => Arc::make_mut(arc).as_mut_slice(),
        }
    }

    /// Returns `true` when no other owner can observe mutations of this store.
    pub fn is_unique(&self) -> bool {
        match self {
            Self::Borrowed(_) | Self::Owned(_) => true,
            Self::Shared(arc) => Arc::strong_count(arc) == 1 && Arc::weak_count(arc) == 0,
        }
    }

    /// Makes this store exclusively owned, copying shared data if needed.
    pub fn ensure_unique(&mut self) {
        if let Self::Shared(arc) = self {
            let _ = Arc::make_mut(arc);
        }
    }
}

/// Channels and rectangle a convolution operates on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    pub rect: Rect,
    pub first_channel: usize,
    /// Inclusive.
    pub last_channel: usize,
}

/// Planar image store, one row-major plane per channel.
pub struct SampleImage<'a, T: Sample> {
    pub data: BufferStore<'a, T>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    selection: Selection,
}

impl<'a, T: Sample> SampleImage<'a, T> {
    /// Allocates zeroed image with everything selected
    pub fn alloc(width: usize, height: usize, channels: usize) -> Self {
        Self::with_store(
            BufferStore::Owned(vec![T::default(); width * height * channels]),
            width,
            height,
            channels,
        )
    }

    /// Mutable borrows existing planar data
    pub fn borrow(arr: &'a mut [T], width: usize, height: usize, channels: usize) -> Self {
        Self::with_store(BufferStore::Borrowed(arr), width, height, channels)
    }

    pub fn from_vec(data: Vec<T>, width: usize, height: usize, channels: usize) -> Self {
        Self::with_store(BufferStore::Owned(data), width, height, channels)
    }

    /// Wraps reference counted data, the first mutation detaches it from other owners.
    pub fn shared(data: Arc<Vec<T>>, width: usize, height: usize, channels: usize) -> Self {
        Self::with_store(BufferStore::Shared(data), width, height, channels)
    }

    fn with_store(data: BufferStore<'a, T>, width: usize, height: usize, channels: usize) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            selection: Selection {
                rect: Rect::new(0, 0, width, height),
                first_channel: 0,
                last_channel: channels.saturating_sub(1),
            },
        }
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    #[inline]
    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), ConvolutionError> {
        check_slice_size(self.data.borrow(), self.width, self.height, self.channels)
    }

    pub fn plane(&self, channel: usize) -> &[T] {
        let len = self.plane_len();
        &self.data.borrow()[channel * len..(channel + 1) * len]
    }

    pub fn plane_mut(&mut self, channel: usize) -> &mut [T] {
        let len = self.plane_len();
        &mut self.data.borrow_mut()[channel * len..(channel + 1) * len]
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn selected_rect(&self) -> Rect {
        self.selection.rect
    }

    /// Selects a rectangle, clipped to the image bounds.
    pub fn select_rectangle(&mut self, rect: Rect) {
        self.selection.rect = rect.clipped(self.size());
    }

    /// Selects the inclusive channel range `first..=last`.
    pub fn select_channels(&mut self, first: usize, last: usize) -> Result<(), ConvolutionError> {
        let (first, last) = (first.min(last), first.max(last));
        if last >= self.channels {
            return Err(ConvolutionError::ChannelOutOfBounds(MismatchedSize {
                expected: self.channels,
                received: last,
            }));
        }
        self.selection.first_channel = first;
        self.selection.last_channel = last;
        Ok(())
    }

    pub fn reset_selection(&mut self) {
        self.selection = Selection {
            rect: Rect::from_size(self.size()),
            first_channel: 0,
            last_channel: self.channels.saturating_sub(1),
        };
    }

    #[inline]
    pub fn selected_channels(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.selection.last_channel - self.selection.first_channel + 1
    }

    #[inline]
    pub fn is_empty_selection(&self) -> bool {
        self.selection.rect.is_empty() || self.selected_channels() == 0
    }

    #[inline]
    pub fn number_of_selected_samples(&self) -> usize {
        self.selection.rect.area() * self.selected_channels()
    }

    pub fn ensure_unique(&mut self) {
        self.data.ensure_unique();
    }

    /// Fills the selected region of every selected channel with zeros.
    pub fn zero_selection(&mut self) {
        self.fill_selection(T::default());
    }

    pub fn fill_selection(&mut self, value: T) {
        if self.is_empty_selection() {
            return;
        }
        let rect = self.selection.rect;
        let width = self.width;
        for c in self.selection.first_channel..=self.selection.last_channel {
            let plane = self.plane_mut(c);
            for row in plane.chunks_exact_mut(width).take(rect.y1).skip(rect.y0) {
                for v in row[rect.x0..rect.x1].iter_mut() {
                    *v = value;
                }
            }
        }
    }

    /// Copies the selection into a compact image of another sample kind, one plane per
    /// selected channel.
    pub fn selection_as<'f, V: Sample>(&self) -> SampleImage<'f, V> {
        let rect = self.selection.rect;
        let mut compact = SampleImage::alloc(rect.width(), rect.height(), self.selected_channels());
        if self.is_empty_selection() {
            return compact;
        }
        let dst_len = compact.plane_len();
        let dst = compact.data.borrow_mut();
        for (c, dst_plane) in (self.selection.first_channel..=self.selection.last_channel)
            .zip(dst.chunks_exact_mut(dst_len.max(1)))
        {
            let plane = self.plane(c);
            for (src_row, dst_row) in plane
                .chunks_exact(self.width)
                .take(rect.y1)
                .skip(rect.y0)
                .zip(dst_plane.chunks_exact_mut(rect.width()))
            {
                for (&src, dst) in src_row[rect.x0..rect.x1].iter().zip(dst_row.iter_mut()) {
                    *dst = V::from_f64(src.to_f64());
                }
            }
        }
        compact
    }

    /// Writes back a compact image produced by [SampleImage::selection_as].
    pub fn store_selection<V: Sample>(&mut self, compact: &SampleImage<'_, V>) {
        if self.is_empty_selection() {
            return;
        }
        let rect = self.selection.rect;
        let width = self.width;
        let src_len = compact.plane_len();
        let src = compact.data.borrow();
        for (c, src_plane) in (self.selection.first_channel..=self.selection.last_channel)
            .zip(src.chunks_exact(src_len.max(1)))
        {
            let plane = self.plane_mut(c);
            for (dst_row, src_row) in plane
                .chunks_exact_mut(width)
                .take(rect.y1)
                .skip(rect.y0)
                .zip(src_plane.chunks_exact(rect.width()))
            {
                for (dst, &src) in dst_row[rect.x0..rect.x1].iter_mut().zip(src_row.iter()) {
                    *dst = T::from_f64(src.to_f64());
                }
            }
        }
    }
}
