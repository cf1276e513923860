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
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Progress and cancellation contract between a long running operation and its caller.
///
/// Increments arrive concurrently from every worker of a pass.
pub trait StatusMonitor: Send + Sync {
    /// Announces a new operation of `total` work units.
    fn initialize(&self, description: &str, total: u64);

    fn increment(&self, amount: u64);

    /// Polled by workers between lines, a `true` makes them stop as soon as they can.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// When `false` the operation must not call [StatusMonitor::initialize],
    /// the caller has already done it for a larger composite task.
    fn is_initialization_enabled(&self) -> bool {
        true
    }
}

/// Monitor that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoStatus;

impl StatusMonitor for NoStatus {
    fn initialize(&self, _: &str, _: u64) {}

    fn increment(&self, _: u64) {}
}

/// Thread-safe counter with cancellation, logs every tenth of the way.
#[derive(Debug, Default)]
pub struct StandardStatus {
    description: Mutex<String>,
    total: AtomicU64,
    count: AtomicU64,
    cancelled: AtomicBool,
    initialization: AtomicBool,
    initializations: AtomicU64,
}

impl StandardStatus {
    pub fn new() -> StandardStatus {
        StandardStatus {
            initialization: AtomicBool::new(true),
            ..Default::default()
        }
    }

    /// Requests cancellation of the running operation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Sum of all increments since the last initialization.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// How many times [StatusMonitor::initialize] was called.
    pub fn initializations(&self) -> u64 {
        self.initializations.load(Ordering::Acquire)
    }

    pub fn description(&self) -> String {
        match self.description.lock() {
            Ok(description) => description.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_initialization_enabled(&self, enabled: bool) {
        self.initialization.store(enabled, Ordering::Release);
    }
}

impl StatusMonitor for StandardStatus {
    fn initialize(&self, description: &str, total: u64) {
        match self.description.lock() {
            Ok(mut guard) => *guard = description.to_string(),
            Err(poisoned) => *poisoned.into_inner() = description.to_string(),
        }
        self.total.store(total, Ordering::Release);
        self.count.store(0, Ordering::Release);
        self.initializations.fetch_add(1, Ordering::AcqRel);
        log::info!("{description}: {total} units");
    }

    fn increment(&self, amount: u64) {
        let previous = self.count.fetch_add(amount, Ordering::AcqRel);
        let total = self.total.load(Ordering::Acquire);
        if total == 0 {
            return;
        }
        let now = previous + amount;
        let before_decile = previous as u128 * 10 / total as u128;
        let after_decile = now as u128 * 10 / total as u128;
        if after_decile > before_decile {
            log::info!("{} of {} units done", now, total);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn is_initialization_enabled(&self) -> bool {
        self.initialization.load(Ordering::Acquire)
    }
}
