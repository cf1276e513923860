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
use crate::StatusMonitor;

/// Lifecycle of a single pass worker.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) enum WorkerState {
    #[default]
    Created,
    Running,
    Completed,
    Aborted,
}

/// Shares of a progress budget spread over the lines of one pass.
///
/// A line covering samples `[offset, offset + len)` of the pass is worth
/// `⌊(offset + len)·budget / samples⌋ - ⌊offset·budget / samples⌋` units, so the shares of all
/// lines add up to exactly `budget` whatever the partitioning is.
pub(crate) struct PassProgress<'a> {
    status: &'a dyn StatusMonitor,
    budget: u64,
    samples: u64,
    granularity: u64,
}

impl<'a> PassProgress<'a> {
    pub(crate) fn new(
        status: &'a dyn StatusMonitor,
        budget: u64,
        samples: u64,
        granularity: usize,
    ) -> PassProgress<'a> {
        PassProgress {
            status,
            budget,
            samples,
            granularity: granularity.max(1) as u64,
        }
    }

    #[inline]
    fn units_before(&self, offset: u64) -> u64 {
        if self.samples == 0 {
            return 0;
        }
        (offset as u128 * self.budget as u128 / self.samples as u128) as u64
    }

    #[inline]
    pub(crate) fn share(&self, offset: u64, len: u64) -> u64 {
        self.units_before(offset + len) - self.units_before(offset)
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    pub(crate) fn reporter(&self) -> ProgressReporter<'_, 'a> {
        ProgressReporter {
            progress: self,
            pending_units: 0,
            pending_samples: 0,
        }
    }
}

/// Per worker accumulator, increments the monitor once per `granularity` samples.
pub(crate) struct ProgressReporter<'p, 'a> {
    progress: &'p PassProgress<'a>,
    pending_units: u64,
    pending_samples: u64,
}

impl ProgressReporter<'_, '_> {
    pub(crate) fn line_done(&mut self, offset: u64, len: u64) {
        self.pending_units += self.progress.share(offset, len);
        self.pending_samples += len;
        if self.pending_samples >= self.progress.granularity {
            self.flush();
        }
    }

    pub(crate) fn flush(&mut self) {
        if self.pending_units > 0 {
            self.progress.status.increment(self.pending_units);
        }
        self.pending_units = 0;
        self.pending_samples = 0;
    }
}
