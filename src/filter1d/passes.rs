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
use crate::filter1d::convolve_1d::LineFilter;
use crate::filter1d::worker::{PassProgress, WorkerState};
use crate::img_size::Rect;
use crate::unsafe_slice::UnsafeSlice;
use crate::Sample;

/// Where the selected samples live inside a planar buffer.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PassGeometry {
    /// Samples per image row.
    pub(crate) stride: usize,
    pub(crate) plane_len: usize,
    pub(crate) rect: Rect,
    pub(crate) first_channel: usize,
    pub(crate) channels: usize,
}

impl PassGeometry {
    #[inline]
    fn origin(&self, channel: usize) -> usize {
        (self.first_channel + channel) * self.plane_len + self.rect.y0 * self.stride + self.rect.x0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum PassDirection {
    Rows,
    Columns,
}

/// Runs one pass with a worker per entry of `loads`, blocking until every worker is done.
///
/// `loads` splits the selected rows (or columns) into consecutive ranges, one per worker.
/// Returns [WorkerState::Aborted] if any worker observed a cancellation.
pub(crate) fn run_pass<T: Sample>(
    data: &mut [T],
    geometry: PassGeometry,
    direction: PassDirection,
    filter: &LineFilter<T>,
    loads: &[usize],
    progress: &PassProgress,
) -> WorkerState {
    if loads.is_empty() {
        return WorkerState::Completed;
    }

    let mut starts = Vec::with_capacity(loads.len());
    let mut start = 0usize;
    for &load in loads.iter() {
        starts.push(start);
        start += load;
    }

    let unsafe_data = UnsafeSlice::new(data);
    let mut states = vec![WorkerState::Created; loads.len()];
    let unsafe_states = UnsafeSlice::new(&mut states);

    let pool = novtb::ThreadPool::new(loads.len());
    pool.parallel_for(|thread_index| {
        unsafe {
            unsafe_states.write(thread_index, WorkerState::Running);
        }
        let first = starts[thread_index];
        let count = loads[thread_index];
        log::trace!(
            "{:?} worker {} started on [{}, {})",
            direction,
            thread_index,
            first,
            first + count
        );
        let state = match direction {
            PassDirection::Rows => {
                row_worker(&unsafe_data, geometry, filter, first, count, progress)
            }
            PassDirection::Columns => {
                column_worker(&unsafe_data, geometry, filter, first, count, progress)
            }
        };
        log::trace!(
            "{:?} worker {} finished: {:?}",
            direction,
            thread_index,
            state
        );
        unsafe {
            unsafe_states.write(thread_index, state);
        }
    });

    if states.iter().any(|&x| x == WorkerState::Aborted) {
        WorkerState::Aborted
    } else {
        WorkerState::Completed
    }
}

fn row_worker<T: Sample>(
    data: &UnsafeSlice<T>,
    geometry: PassGeometry,
    filter: &LineFilter<T>,
    first_row: usize,
    rows: usize,
    progress: &PassProgress,
) -> WorkerState {
    let len = geometry.rect.width();
    let height = geometry.rect.height();
    let mut scratch = vec![T::default(); filter.scratch_len(len)];
    let mut reporter = progress.reporter();

    for y in first_row..first_row + rows {
        for c in 0..geometry.channels {
            if progress.is_cancelled() {
                reporter.flush();
                return WorkerState::Aborted;
            }
            let start = geometry.origin(c) + y * geometry.stride;
            // Rows of one worker never intersect rows of another.
            let line = unsafe { data.slice_mut(start, len) };
            filter.convolve(line, &mut scratch);
            let line_index = (c * height + y) as u64;
            reporter.line_done(line_index * len as u64, len as u64);
        }
    }

    reporter.flush();
    WorkerState::Completed
}

fn column_worker<T: Sample>(
    data: &UnsafeSlice<T>,
    geometry: PassGeometry,
    filter: &LineFilter<T>,
    first_column: usize,
    columns: usize,
    progress: &PassProgress,
) -> WorkerState {
    let len = geometry.rect.height();
    let width = geometry.rect.width();
    let mut column = vec![T::default(); len];
    let mut scratch = vec![T::default(); filter.scratch_len(len)];
    let mut reporter = progress.reporter();

    for x in first_column..first_column + columns {
        for c in 0..geometry.channels {
            if progress.is_cancelled() {
                reporter.flush();
                return WorkerState::Aborted;
            }
            let start = geometry.origin(c) + x;
            unsafe {
                data.gather_strided(start, geometry.stride, &mut column);
            }
            filter.convolve(&mut column, &mut scratch);
            unsafe {
                data.scatter_strided(start, geometry.stride, &column);
            }
            let line_index = (c * width + x) as u64;
            reporter.line_done(line_index * len as u64, len as u64);
        }
    }

    reporter.flush();
    WorkerState::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_mode::EdgeMode;
    use crate::thread_loads::optimal_thread_loads;
    use crate::StandardStatus;
    use crate::StatusMonitor;

    fn geometry(width: usize, height: usize, rect: Rect) -> PassGeometry {
        PassGeometry {
            stride: width,
            plane_len: width * height,
            rect,
            first_channel: 0,
            channels: 1,
        }
    }

    #[test]
    fn test_row_and_column_passes_touch_only_selection() {
        let (width, height) = (9usize, 7usize);
        let mut data = vec![0f32; width * height];
        for y in 1..6 {
            for x in 2..8 {
                data[y * width + x] = 9.;
            }
        }
        let rect = Rect::new(2, 1, 8, 6);
        let kernel = [1. / 3., 1. / 3., 1. / 3.];
        let filter = LineFilter::<f32>::new(&kernel, 1, EdgeMode::Reflect).unwrap();
        let status = StandardStatus::new();
        status.initialize("Passes", 60);
        let progress = PassProgress::new(&status, 30, 30, 1);
        let loads = optimal_thread_loads(rect.height(), 1, 3);
        let state = run_pass(
            &mut data,
            geometry(width, height, rect),
            PassDirection::Rows,
            &filter,
            &loads,
            &progress,
        );
        assert_eq!(state, WorkerState::Completed);
        let loads = optimal_thread_loads(rect.width(), 1, 4);
        let state = run_pass(
            &mut data,
            geometry(width, height, rect),
            PassDirection::Columns,
            &filter,
            &loads,
            &progress,
        );
        assert_eq!(state, WorkerState::Completed);
        assert_eq!(status.count(), 60);
        for y in 0..height {
            for x in 0..width {
                let v = data[y * width + x];
                let expected = if rect.x0 <= x && x < rect.x1 && rect.y0 <= y && y < rect.y1 {
                    9.
                } else {
                    0.
                };
                let diff = (v - expected).abs();
                assert!(
                    diff < 1e-5,
                    "Diff expected to be less than 1e-5 but it was {diff} at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_cancelled_pass_aborts() {
        let mut data = vec![1f64; 16 * 16];
        let kernel = [1.];
        let filter = LineFilter::<f64>::new(&kernel, 1, EdgeMode::Reflect).unwrap();
        let status = StandardStatus::new();
        status.cancel();
        let progress = PassProgress::new(&status, 256, 256, 1);
        let state = run_pass(
            &mut data,
            geometry(16, 16, Rect::new(0, 0, 16, 16)),
            PassDirection::Columns,
            &filter,
            &[8, 8],
            &progress,
        );
        assert_eq!(state, WorkerState::Aborted);
        assert_eq!(status.count(), 0);
    }
}
