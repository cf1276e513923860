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
use crate::edge_mode::EdgeMode;
use crate::filter1d::{
    run_pass, LineFilter, PassDirection, PassGeometry, PassProgress, WorkerState,
};
use crate::thread_loads::optimal_thread_loads;
use crate::{
    ConvolutionError, Sample, SampleImage, SeparableFilter, StatusMonitor, ThreadingPolicy,
};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Samples accumulated by a worker before it reports to the status monitor.
pub const DEFAULT_PROGRESS_GRANULARITY: usize = 65536;

/// Rows or columns below which splitting a pass further is not worth a thread.
const OVERHEAD_LIMIT: usize = 1;

/// How [SeparableConvolution::apply] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Completion {
    /// Every enabled pass ran and the result was normalized.
    Done,
    /// The filter window doesn't fit into the selection, the selection was zeroed.
    ZeroFilled,
    /// Nothing selected, the image is untouched.
    EmptySelection,
    /// The status monitor requested cancellation, the selection holds partial results.
    Aborted,
}

/// Two-pass convolution of an image selection by a [SeparableFilter].
///
/// Rows are convolved first, then columns, each line mirrored at the selection boundaries.
/// With an interlacing distance `d > 1` the filter taps are `d` samples apart (à trous).
///
/// # Examples
///
/// ```
/// use libsepconv::{NoStatus, SampleImage, SeparableConvolution, SeparableFilter};
///
/// let mut image = SampleImage::from_vec(vec![10u8; 25], 5, 5, 1);
/// let convolution = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]));
/// convolution.apply(&mut image, &NoStatus).unwrap();
/// assert!(image.data.borrow().iter().all(|&x| x == 10));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SeparableConvolution {
    filter: SeparableFilter,
    interlacing_distance: usize,
    row_convolution: bool,
    column_convolution: bool,
    high_pass_rescaling: bool,
    raw_high_pass: bool,
    force_high_pass: bool,
    edge_mode: EdgeMode,
    threading_policy: ThreadingPolicy,
    progress_granularity: usize,
    status_initialization: bool,
}

impl SeparableConvolution {
    pub fn new(filter: SeparableFilter) -> SeparableConvolution {
        SeparableConvolution {
            filter,
            interlacing_distance: 1,
            row_convolution: true,
            column_convolution: true,
            high_pass_rescaling: false,
            raw_high_pass: false,
            force_high_pass: false,
            edge_mode: EdgeMode::default(),
            threading_policy: ThreadingPolicy::default(),
            progress_granularity: DEFAULT_PROGRESS_GRANULARITY,
            status_initialization: true,
        }
    }

    /// Distance between filter taps, 1 for an ordinary convolution.
    pub fn interlacing_distance(mut self, distance: usize) -> Self {
        self.interlacing_distance = distance;
        self
    }

    pub fn row_convolution(mut self, enabled: bool) -> Self {
        self.row_convolution = enabled;
        self
    }

    pub fn column_convolution(mut self, enabled: bool) -> Self {
        self.column_convolution = enabled;
        self
    }

    /// High-pass results are rescaled to the full sample range instead of being clipped.
    pub fn high_pass_rescaling(mut self, enabled: bool) -> Self {
        self.high_pass_rescaling = enabled;
        self
    }

    /// High-pass results are left as they come out of the normalization.
    pub fn raw_high_pass(mut self, enabled: bool) -> Self {
        self.raw_high_pass = enabled;
        self
    }

    /// Treats the filter as high-pass whatever its coefficients are.
    pub fn force_high_pass(mut self, enabled: bool) -> Self {
        self.force_high_pass = enabled;
        self
    }

    pub fn edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn threading_policy(mut self, threading_policy: ThreadingPolicy) -> Self {
        self.threading_policy = threading_policy;
        self
    }

    pub fn progress_granularity(mut self, samples: usize) -> Self {
        self.progress_granularity = samples.max(1);
        self
    }

    /// When disabled the monitor is never initialized, only incremented.
    pub fn status_initialization(mut self, enabled: bool) -> Self {
        self.status_initialization = enabled;
        self
    }

    #[inline]
    pub fn filter(&self) -> &SeparableFilter {
        &self.filter
    }

    #[inline]
    pub fn get_interlacing_distance(&self) -> usize {
        self.interlacing_distance
    }

    #[inline]
    pub fn is_row_convolution_enabled(&self) -> bool {
        self.row_convolution
    }

    #[inline]
    pub fn is_column_convolution_enabled(&self) -> bool {
        self.column_convolution
    }

    #[inline]
    pub fn get_edge_mode(&self) -> EdgeMode {
        self.edge_mode
    }

    #[inline]
    pub fn get_threading_policy(&self) -> ThreadingPolicy {
        self.threading_policy
    }

    #[inline]
    pub fn is_interlaced(&self) -> bool {
        self.interlacing_distance > 1
    }

    fn window(&self, taps: usize) -> usize {
        if taps == 0 {
            return 0;
        }
        (taps - 1)
            .saturating_mul(self.interlacing_distance)
            .saturating_add(1)
    }

    /// Samples covered by the row filter window.
    pub fn overlapping_distance_row(&self) -> usize {
        self.window(self.filter.row_filter().len())
    }

    /// Samples covered by the column filter window.
    pub fn overlapping_distance_column(&self) -> usize {
        self.window(self.filter.column_filter().len())
    }

    /// Largest window among the enabled passes.
    pub fn overlapping_distance(&self) -> usize {
        let row = if self.row_convolution {
            self.overlapping_distance_row()
        } else {
            0
        };
        let column = if self.column_convolution {
            self.overlapping_distance_column()
        } else {
            0
        };
        row.max(column)
    }

    /// Product of the coefficient sums of the enabled passes.
    pub fn filter_weight(&self) -> f64 {
        let mut weight = 1.;
        if self.row_convolution {
            weight *= self.filter.row_weight();
        }
        if self.column_convolution {
            weight *= self.filter.column_weight();
        }
        weight
    }

    pub fn is_high_pass_filter(&self) -> bool {
        self.force_high_pass || self.filter.is_high_pass()
    }

    /// Convolves the selection of `image` in place.
    ///
    /// Integer images are convolved on a floating point copy of the selection and rounded
    /// back once at the end.
    pub fn apply<T: Sample>(
        &self,
        image: &mut SampleImage<T>,
        status: &dyn StatusMonitor,
    ) -> Result<Completion, ConvolutionError> {
        self.filter.validate()?;
        if self.interlacing_distance == 0 {
            return Err(ConvolutionError::ZeroInterlacingDistance);
        }
        image.check_layout()?;

        if image.is_empty_selection() {
            return Ok(Completion::EmptySelection);
        }

        let rect = image.selected_rect();
        let row_degenerate = self.row_convolution && self.overlapping_distance_row() > rect.width();
        let column_degenerate =
            self.column_convolution && self.overlapping_distance_column() > rect.height();
        if row_degenerate || column_degenerate {
            log::debug!(
                "Filter window {} doesn't fit into {}x{} selection, zeroing",
                self.overlapping_distance(),
                rect.width(),
                rect.height()
            );
            image.ensure_unique();
            image.zero_selection();
            return Ok(Completion::ZeroFilled);
        }

        image.ensure_unique();

        let total = image.number_of_selected_samples() as u64;
        if self.status_initialization && status.is_initialization_enabled() {
            status.initialize("Convolution (separable)", total);
        }

        if T::IS_FLOAT {
            return self.convolve_selection(image, status, T::RANGE_MAX);
        }

        let mut intermediate = image.selection_as::<T::Intermediate>();
        let completion = self.convolve_selection(&mut intermediate, status, T::RANGE_MAX)?;
        if completion == Completion::Done {
            image.store_selection(&intermediate);
        }
        Ok(completion)
    }

    fn convolve_selection<F: Sample>(
        &self,
        image: &mut SampleImage<F>,
        status: &dyn StatusMonitor,
        range_max: f64,
    ) -> Result<Completion, ConvolutionError> {
        let selection = image.selection();
        let rect = selection.rect;
        let geometry = PassGeometry {
            stride: image.width,
            plane_len: image.plane_len(),
            rect,
            first_channel: selection.first_channel,
            channels: image.selected_channels(),
        };
        let total = image.number_of_selected_samples() as u64;
        let (row_budget, column_budget) = match (self.row_convolution, self.column_convolution) {
            (true, true) => (total >> 1, total - (total >> 1)),
            (true, false) => (total, 0),
            (false, true) => (0, total),
            (false, false) => (0, 0),
        };
        let max_threads = self.threading_policy.max_threads();
        let data = image.data.borrow_mut();

        if self.row_convolution {
            let filter = LineFilter::<F>::new(
                self.filter.row_filter(),
                self.interlacing_distance,
                self.edge_mode,
            )?;
            let loads = optimal_thread_loads(rect.height(), OVERHEAD_LIMIT, max_threads);
            log::debug!("Row pass over {} rows, loads {:?}", rect.height(), loads);
            let progress = PassProgress::new(status, row_budget, total, self.progress_granularity);
            let state = run_pass(
                data,
                geometry,
                PassDirection::Rows,
                &filter,
                &loads,
                &progress,
            );
            if state == WorkerState::Aborted {
                log::warn!("Separable convolution aborted during the row pass");
                return Ok(Completion::Aborted);
            }
        }

        if self.column_convolution {
            let filter = LineFilter::<F>::new(
                self.filter.column_filter(),
                self.interlacing_distance,
                self.edge_mode,
            )?;
            let loads = optimal_thread_loads(rect.width(), OVERHEAD_LIMIT, max_threads);
            log::debug!(
                "Column pass over {} columns, loads {:?}",
                rect.width(),
                loads
            );
            let progress =
                PassProgress::new(status, column_budget, total, self.progress_granularity);
            let state = run_pass(
                data,
                geometry,
                PassDirection::Columns,
                &filter,
                &loads,
                &progress,
            );
            if state == WorkerState::Aborted {
                log::warn!("Separable convolution aborted during the column pass");
                return Ok(Completion::Aborted);
            }
        }

        if self.row_convolution || self.column_convolution {
            self.normalize(data, geometry, range_max, max_threads);
        }

        Ok(Completion::Done)
    }

    /// Divides by the filter weight, then clips or rescales high-pass responses.
    fn normalize<F: Sample>(
        &self,
        data: &mut [F],
        geometry: PassGeometry,
        range_max: f64,
        max_threads: usize,
    ) {
        let pool = if max_threads > 1 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .ok()
        } else {
            None
        };

        let weight = self.filter_weight();
        if weight != 1. && weight != 0. {
            let scale = 1. / weight;
            sweep(pool.as_ref(), data, geometry, |v| v * scale);
        }

        if self.raw_high_pass || !self.is_high_pass_filter() {
            return;
        }

        if self.high_pass_rescaling {
            let (min, max) = selection_range(pool.as_ref(), data, geometry);
            if max > min {
                let scale = range_max / (max - min);
                sweep(pool.as_ref(), data, geometry, |v| (v - min) * scale);
                return;
            }
        }
        sweep(pool.as_ref(), data, geometry, |v| v.clamp(0., range_max));
    }
}

impl PassGeometry {
    /// Selected columns of the buffer row `row`, counted over all planes.
    #[inline]
    fn selected_span(&self, row: usize) -> Option<std::ops::Range<usize>> {
        let height = self.plane_len / self.stride;
        let channel = row / height;
        let y = row % height;
        if channel < self.first_channel
            || channel >= self.first_channel + self.channels
            || y < self.rect.y0
            || y >= self.rect.y1
        {
            return None;
        }
        Some(self.rect.x0..self.rect.x1)
    }
}

fn sweep<F: Sample>(
    pool: Option<&rayon::ThreadPool>,
    data: &mut [F],
    geometry: PassGeometry,
    op: impl Fn(f64) -> f64 + Send + Sync,
) {
    let apply = |(r, row): (usize, &mut [F])| {
        if let Some(span) = geometry.selected_span(r) {
            for v in row[span].iter_mut() {
                *v = F::from_f64(op(v.to_f64()));
            }
        }
    };
    if let Some(pool) = pool {
        pool.install(|| {
            data.par_chunks_exact_mut(geometry.stride)
                .enumerate()
                .for_each(apply);
        });
    } else {
        data.chunks_exact_mut(geometry.stride)
            .enumerate()
            .for_each(apply);
    }
}

fn selection_range<F: Sample>(
    pool: Option<&rayon::ThreadPool>,
    data: &[F],
    geometry: PassGeometry,
) -> (f64, f64) {
    let row_range = |(r, row): (usize, &[F])| {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        if let Some(span) = geometry.selected_span(r) {
            for v in row[span].iter() {
                let v = v.to_f64();
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min, max)
    };
    let merge = |a: (f64, f64), b: (f64, f64)| (a.0.min(b.0), a.1.max(b.1));
    let identity = (f64::INFINITY, f64::NEG_INFINITY);
    if let Some(pool) = pool {
        pool.install(|| {
            data.par_chunks_exact(geometry.stride)
                .enumerate()
                .map(row_range)
                .reduce(|| identity, merge)
        })
    } else {
        data.chunks_exact(geometry.stride)
            .enumerate()
            .map(row_range)
            .fold(identity, merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoStatus, Rect, StandardStatus};
    use std::num::NonZeroUsize;

    fn row_only(filter: SeparableFilter) -> SeparableConvolution {
        SeparableConvolution::new(filter).column_convolution(false)
    }

    #[test]
    fn test_identity_filter() {
        let data: Vec<f32> = (0..48).map(|x| (x as f32 * 0.37).sin()).collect();
        let mut image = SampleImage::from_vec(data.clone(), 8, 6, 1);
        let convolution = SeparableConvolution::new(SeparableFilter::symmetric(vec![1.]));
        let completion = convolution.apply(&mut image, &NoStatus).unwrap();
        assert_eq!(completion, Completion::Done);
        assert_eq!(image.data.borrow(), data.as_slice());

        let data: Vec<u16> = (0..48).map(|x| x * 1000).collect();
        let mut image = SampleImage::from_vec(data.clone(), 6, 8, 1);
        convolution.apply(&mut image, &NoStatus).unwrap();
        assert_eq!(image.data.borrow(), data.as_slice());
    }

    #[test]
    fn test_mirror_boundaries() {
        let average = SeparableFilter::symmetric(vec![1., 1., 1.]);
        let mut image = SampleImage::from_vec(vec![1f64, 2., 3., 4., 5.], 5, 1, 1);
        row_only(average.clone())
            .edge_mode(EdgeMode::Reflect101)
            .apply(&mut image, &NoStatus)
            .unwrap();
        let first = image.data.borrow()[0];
        assert!((first - 5. / 3.).abs() < 1e-12, "First sample was {first}");

        let mut image = SampleImage::from_vec(vec![1f64, 2., 3., 4., 5.], 5, 1, 1);
        row_only(average).apply(&mut image, &NoStatus).unwrap();
        let first = image.data.borrow()[0];
        assert!((first - 4. / 3.).abs() < 1e-12, "First sample was {first}");
    }

    #[test]
    fn test_weight_normalized_once() {
        let data: Vec<f64> = (0..90).map(|x| ((x * 13) % 17) as f64 / 17.).collect();
        let raw = SeparableFilter::new(vec![1., 2., 1.], vec![1., 4., 6., 4., 1.]);
        let scaled = SeparableFilter::new(
            vec![0.25, 0.5, 0.25],
            vec![1. / 16., 4. / 16., 6. / 16., 4. / 16., 1. / 16.],
        );
        let mut a = SampleImage::from_vec(data.clone(), 10, 9, 1);
        let mut b = SampleImage::from_vec(data, 10, 9, 1);
        SeparableConvolution::new(raw)
            .apply(&mut a, &NoStatus)
            .unwrap();
        SeparableConvolution::new(scaled)
            .apply(&mut b, &NoStatus)
            .unwrap();
        for (i, (&a, &b)) in a
            .data
            .borrow()
            .iter()
            .zip(b.data.borrow().iter())
            .enumerate()
        {
            let diff = (a - b).abs();
            assert!(
                diff < 1e-12,
                "Diff expected to be less than 1e-12 but it was {diff} at {i}"
            );
        }
    }

    fn check_degenerate<T: Sample>(value: T) {
        let mut image = SampleImage::from_vec(vec![value; 4 * 3 * 2], 4, 3, 2);
        let convolution = SeparableConvolution::new(SeparableFilter::symmetric(vec![1.; 5]));
        let completion = convolution.apply(&mut image, &NoStatus).unwrap();
        assert_eq!(completion, Completion::ZeroFilled);
        assert!(image.data.borrow().iter().all(|&x| x == T::default()));
    }

    #[test]
    fn test_degenerate_window_zero_fills() {
        check_degenerate(200u8);
        check_degenerate(60000u16);
        check_degenerate(7u32);
        check_degenerate(0.5f32);
        check_degenerate(0.25f64);

        // 3 taps 2 apart need 5 samples.
        let mut image = SampleImage::from_vec(vec![1f32; 4 * 9], 4, 9, 1);
        let completion = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]))
            .interlacing_distance(2)
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::ZeroFilled);
    }

    #[test]
    fn test_degenerate_only_inside_selection() {
        let mut image = SampleImage::from_vec(vec![3u8; 8 * 8], 8, 8, 1);
        image.select_rectangle(Rect::new(2, 2, 5, 8));
        let completion = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]))
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::Done);
        image.select_rectangle(Rect::new(2, 2, 3, 8));
        let completion = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]))
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::ZeroFilled);
        let data = image.data.borrow();
        assert_eq!(data[2 * 8 + 2], 0);
        assert_eq!(data[2 * 8 + 3], 3);
        assert_eq!(data[0], 3);
    }

    #[test]
    fn test_progress_total_matches_samples() {
        for (rows, columns) in [(true, true), (true, false), (false, true)] {
            let mut image = SampleImage::<f32>::alloc(37, 23, 3);
            image.select_rectangle(Rect::new(1, 2, 36, 21));
            let status = StandardStatus::new();
            let completion = SeparableConvolution::new(SeparableFilter::gaussian(1.2, 5))
                .row_convolution(rows)
                .column_convolution(columns)
                .progress_granularity(50)
                .threading_policy(ThreadingPolicy::Fixed(NonZeroUsize::new(4).unwrap()))
                .apply(&mut image, &status)
                .unwrap();
            assert_eq!(completion, Completion::Done);
            let expected = (35 * 19 * 3) as u64;
            assert_eq!(status.total(), expected);
            assert_eq!(status.count(), expected);
            assert_eq!(status.description(), "Convolution (separable)");
        }
    }

    #[test]
    fn test_status_initialization_switch() {
        let status = StandardStatus::new();
        status.initialize("Outer task", 1_000_000);
        let mut image = SampleImage::<u8>::alloc(16, 16, 1);
        SeparableConvolution::new(SeparableFilter::b3_spline())
            .status_initialization(false)
            .apply(&mut image, &status)
            .unwrap();
        assert_eq!(status.initializations(), 1);
        assert_eq!(status.total(), 1_000_000);
        assert_eq!(status.count(), 256);

        let status = StandardStatus::new();
        status.set_initialization_enabled(false);
        SeparableConvolution::new(SeparableFilter::b3_spline())
            .apply(&mut image, &status)
            .unwrap();
        assert_eq!(status.initializations(), 0);
        assert_eq!(status.count(), 256);
    }

    #[test]
    fn test_uniform_integer_image_is_invariant() {
        let mut image = SampleImage::from_vec(vec![10u8; 25], 5, 5, 1);
        let convolution = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]));
        assert_eq!(convolution.filter_weight(), 9.);
        let completion = convolution.apply(&mut image, &NoStatus).unwrap();
        assert_eq!(completion, Completion::Done);
        assert!(image.data.borrow().iter().all(|&x| x == 10));
    }

    #[test]
    fn test_impulse_row_blur() {
        let mut image = SampleImage::from_vec(vec![0f32, 0., 0., 10., 0., 0., 0.], 7, 1, 1);
        let convolution = row_only(SeparableFilter::symmetric(vec![1., 2., 1.]));
        assert_eq!(convolution.filter_weight(), 4.);
        assert_eq!(convolution.overlapping_distance(), 3);
        convolution.apply(&mut image, &NoStatus).unwrap();
        let expected = [0f32, 0., 2.5, 5., 2.5, 0., 0.];
        for (i, (&v, &e)) in image.data.borrow().iter().zip(expected.iter()).enumerate() {
            let diff = (v - e).abs();
            assert!(
                diff < 1e-6,
                "Diff expected to be less than 1e-6 but it was {diff} at {i}"
            );
        }
    }

    #[test]
    fn test_interlaced_distance_one_is_plain_convolution() {
        let data: Vec<f64> = (0..64).map(|x| ((x * 29) % 31) as f64).collect();
        let mut a = SampleImage::from_vec(data.clone(), 8, 8, 1);
        let mut b = SampleImage::from_vec(data, 8, 8, 1);
        let plain = SeparableConvolution::new(SeparableFilter::b3_spline());
        assert!(!plain.is_interlaced());
        plain.apply(&mut a, &NoStatus).unwrap();
        plain
            .clone()
            .interlacing_distance(1)
            .apply(&mut b, &NoStatus)
            .unwrap();
        assert_eq!(a.data.borrow(), b.data.borrow());

        let interlaced = plain.interlacing_distance(2);
        assert!(interlaced.is_interlaced());
        assert_eq!(interlaced.overlapping_distance(), 9);
    }

    #[test]
    fn test_a_trous_two_dimensional() {
        let mut data = vec![0f64; 5 * 5];
        data[5 + 1] = 16.;
        let mut image = SampleImage::from_vec(data, 5, 5, 1);
        let completion = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 2., 1.]))
            .interlacing_distance(2)
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::Done);
        // Mirrored line around an impulse at 1 is [1, 0 | 0, 1, 0, 0, 0 | 0, 0],
        // taps at 0, 2 and 4 give [1, 2, 0, 1, 0].
        let response = [1f64, 2., 0., 1., 0.];
        for y in 0..5 {
            for x in 0..5 {
                let v = image.data.borrow()[y * 5 + x];
                let expected = response[y] * response[x];
                let diff = (v - expected).abs();
                assert!(
                    diff < 1e-12,
                    "Diff expected to be less than 1e-12 but it was {diff} at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_cancellation_aborts() {
        let data = vec![100u16; 32 * 32];
        let mut image = SampleImage::from_vec(data.clone(), 32, 32, 1);
        let status = StandardStatus::new();
        status.cancel();
        let completion = SeparableConvolution::new(SeparableFilter::gaussian(2., 7))
            .apply(&mut image, &status)
            .unwrap();
        assert_eq!(completion, Completion::Aborted);
        assert_eq!(status.count(), 0);
        assert_eq!(image.data.borrow(), data.as_slice());
    }

    struct CancelOnIncrement(StandardStatus);

    impl StatusMonitor for CancelOnIncrement {
        fn initialize(&self, description: &str, total: u64) {
            self.0.initialize(description, total);
        }

        fn increment(&self, amount: u64) {
            self.0.increment(amount);
            self.0.cancel();
        }

        fn is_cancelled(&self) -> bool {
            self.0.is_cancelled()
        }
    }

    #[test]
    fn test_cancellation_during_row_pass() {
        let data: Vec<u8> = (0..24 * 16).map(|x| ((x * 37) % 256) as u8).collect();
        let mut image = SampleImage::from_vec(data.clone(), 24, 16, 1);
        let status = CancelOnIncrement(StandardStatus::new());
        let completion = SeparableConvolution::new(SeparableFilter::gaussian(1., 5))
            .threading_policy(ThreadingPolicy::Single)
            .progress_granularity(1)
            .apply(&mut image, &status)
            .unwrap();
        assert_eq!(completion, Completion::Aborted);
        let count = status.0.count();
        assert!(count > 0, "Expected at least one row to be reported");
        assert!(
            count < (24 * 16) as u64,
            "Count expected to be less than 384 but it was {count}"
        );
        assert_eq!(image.data.borrow(), data.as_slice());
    }

    #[test]
    fn test_threads_do_not_change_result() {
        let data: Vec<u8> = (0..57 * 41 * 2).map(|x| ((x * 97) % 251) as u8).collect();
        let mut single = SampleImage::from_vec(data.clone(), 57, 41, 2);
        let mut parallel = SampleImage::from_vec(data, 57, 41, 2);
        let convolution = SeparableConvolution::new(SeparableFilter::gaussian(1.5, 7));
        convolution
            .clone()
            .threading_policy(ThreadingPolicy::Single)
            .apply(&mut single, &NoStatus)
            .unwrap();
        convolution
            .threading_policy(ThreadingPolicy::Fixed(NonZeroUsize::new(6).unwrap()))
            .apply(&mut parallel, &NoStatus)
            .unwrap();
        assert_eq!(single.data.borrow(), parallel.data.borrow());
    }

    #[test]
    fn test_high_pass_clipping_and_rescaling() {
        let mut data = vec![0.5f32; 9 * 9];
        data[4 * 9 + 4] = 1.;
        let laplacian = SeparableFilter::symmetric(vec![-1., 3., -1.]);
        let mut clipped = SampleImage::from_vec(data.clone(), 9, 9, 1);
        SeparableConvolution::new(laplacian.clone())
            .apply(&mut clipped, &NoStatus)
            .unwrap();
        assert!(clipped
            .data
            .borrow()
            .iter()
            .all(|&x| (0. ..=1.).contains(&x)));
        assert_eq!(clipped.data.borrow()[4 * 9 + 4], 1.);

        let mut rescaled = SampleImage::from_vec(data.clone(), 9, 9, 1);
        SeparableConvolution::new(laplacian.clone())
            .high_pass_rescaling(true)
            .apply(&mut rescaled, &NoStatus)
            .unwrap();
        let values = rescaled.data.borrow();
        let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < 1e-6, "Minimum was {min}");
        assert!((max - 1.).abs() < 1e-6, "Maximum was {max}");

        let mut raw = SampleImage::from_vec(data, 9, 9, 1);
        SeparableConvolution::new(laplacian)
            .raw_high_pass(true)
            .apply(&mut raw, &NoStatus)
            .unwrap();
        assert!(raw.data.borrow().iter().any(|&x| x < 0.));
    }

    #[test]
    fn test_forced_high_pass_clips_integer_range() {
        let mut image = SampleImage::from_vec(vec![200u8; 25], 5, 5, 1);
        let convolution = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1., 1.]))
            .force_high_pass(true);
        assert!(convolution.is_high_pass_filter());
        convolution.apply(&mut image, &NoStatus).unwrap();
        assert!(image.data.borrow().iter().all(|&x| x == 200));
    }

    #[test]
    fn test_opposite_sign_axes_are_high_pass() {
        let data: Vec<f32> = (0..81).map(|x| 0.2 + (x % 9) as f32 * 0.05).collect();
        let mut image = SampleImage::from_vec(data, 9, 9, 1);
        let filter = SeparableFilter::new(vec![1., 2., 1.], vec![-1., -2., -1.]);
        let convolution = SeparableConvolution::new(filter).high_pass_rescaling(true);
        assert!(convolution.is_high_pass_filter());
        assert_eq!(convolution.filter_weight(), -16.);
        convolution.apply(&mut image, &NoStatus).unwrap();
        let values = image.data.borrow();
        let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < 1e-6, "Minimum was {min}");
        assert!((max - 1.).abs() < 1e-6, "Maximum was {max}");
    }

    #[test]
    fn test_selected_channels_only() {
        let mut data = vec![0u16; 6 * 6 * 3];
        for (i, v) in data.iter_mut().enumerate() {
            *v = (i % 7) as u16 * 1000;
        }
        let mut image = SampleImage::from_vec(data.clone(), 6, 6, 3);
        image.select_channels(1, 1).unwrap();
        let completion = SeparableConvolution::new(SeparableFilter::linear_interpolation())
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::Done);
        let out = image.data.borrow();
        assert_eq!(&out[..36], &data[..36]);
        assert_eq!(&out[72..], &data[72..]);
        assert_ne!(&out[36..72], &data[36..72]);
    }

    #[test]
    fn test_preconditions() {
        let mut image = SampleImage::<f32>::alloc(4, 4, 1);
        let empty = SeparableConvolution::new(SeparableFilter::default());
        assert_eq!(
            empty.apply(&mut image, &NoStatus),
            Err(ConvolutionError::EmptyFilter)
        );
        let even = SeparableConvolution::new(SeparableFilter::symmetric(vec![1., 1.]));
        assert_eq!(
            even.apply(&mut image, &NoStatus),
            Err(ConvolutionError::OddKernel(2))
        );
        let zero = SeparableConvolution::new(SeparableFilter::symmetric(vec![1.]))
            .interlacing_distance(0);
        assert_eq!(
            zero.apply(&mut image, &NoStatus),
            Err(ConvolutionError::ZeroInterlacingDistance)
        );
        image.select_rectangle(Rect::new(2, 2, 2, 4));
        let completion = SeparableConvolution::new(SeparableFilter::symmetric(vec![1.]))
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(completion, Completion::EmptySelection);
    }

    #[test]
    fn test_shared_image_is_detached() {
        let data = std::sync::Arc::new(vec![0f32, 0., 0., 10., 0., 0., 0.]);
        let mut image = SampleImage::shared(data.clone(), 7, 1, 1);
        row_only(SeparableFilter::symmetric(vec![1., 2., 1.]))
            .apply(&mut image, &NoStatus)
            .unwrap();
        assert_eq!(data[3], 10.);
        assert_eq!(image.data.borrow()[3], 5.);
    }
}
