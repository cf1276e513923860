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
use crate::ThreadingPolicy;

/// Number of workers worth spawning for `total` work units.
///
/// Splitting stops paying off once a worker would receive fewer than `overhead_limit`
/// units, unless `overhead_limit` is below 2, in which case every allowed worker is used.
fn number_of_threads(total: usize, overhead_limit: usize, max_threads: usize) -> usize {
    if total <= overhead_limit || max_threads < 2 {
        return 1;
    }
    if overhead_limit < 2 || total / max_threads >= overhead_limit {
        return max_threads;
    }
    (total / overhead_limit).max(1)
}

/// Splits `total` work units into balanced, contiguous chunks, one per worker.
///
/// # Arguments
///
/// * `total`: Number of rows or columns to distribute.
/// * `overhead_limit`: Minimum chunk size worth a dedicated worker.
/// * `max_threads`: Upper bound on the chunk count, `0` means every available CPU.
///
/// Chunk sizes sum to `total`, never exceed `max_threads` in count, differ by at most one
/// and the remainder goes to the leading chunks. Returns an empty vector for zero work.
pub fn optimal_thread_loads(total: usize, overhead_limit: usize, max_threads: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let max_threads = if max_threads == 0 {
        ThreadingPolicy::Adaptive.max_threads()
    } else {
        max_threads
    };
    let threads = number_of_threads(total, overhead_limit, max_threads).min(total);
    let per_thread = total / threads;
    let remainder = total - per_thread * threads;
    let mut loads = vec![per_thread; threads];
    for load in loads.iter_mut().take(remainder) {
        *load += 1;
    }
    loads
}

/// Same as [optimal_thread_loads], but every chunk except the last one is a multiple
/// of `align`.
///
/// Empty chunks produced by moving units forward are dropped.
pub fn optimal_thread_loads_aligned(
    total: usize,
    align: usize,
    overhead_limit: usize,
    max_threads: usize,
) -> Vec<usize> {
    let align = align.max(1);
    let mut loads = optimal_thread_loads(total, overhead_limit.max(align), max_threads);
    let len = loads.len();
    let mut j = 1usize;
    for i in 0..len.saturating_sub(1) {
        if j <= i {
            j = i + 1;
        }
        while loads[i] % align != 0 {
            while j < len && loads[j] == 0 {
                j += 1;
            }
            if j == len {
                break;
            }
            loads[j] -= 1;
            loads[i] += 1;
        }
    }
    loads.retain(|&x| x > 0);
    loads
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_loads(total: usize, overhead_limit: usize, max_threads: usize) {
        let loads = optimal_thread_loads(total, overhead_limit, max_threads);
        assert_eq!(
            loads.iter().sum::<usize>(),
            total,
            "Loads {loads:?} must sum to {total}"
        );
        assert!(loads.iter().all(|&x| x > 0), "Zero chunk in {loads:?}");
        if max_threads > 0 {
            assert!(
                loads.len() <= max_threads,
                "{} chunks exceed {max_threads} threads",
                loads.len()
            );
        }
        if loads.len() > 1 {
            let min = *loads.iter().min().unwrap();
            let max = *loads.iter().max().unwrap();
            assert!(max - min <= 1, "Unbalanced loads {loads:?}");
            assert!(
                min >= overhead_limit.min(total),
                "Chunk {min} below overhead limit {overhead_limit}"
            );
        }
    }

    #[test]
    fn test_partition_sum_invariant() {
        for total in [1usize, 2, 3, 7, 16, 100, 1023, 4096] {
            for overhead_limit in [0usize, 1, 2, 5, 64, 5000] {
                for max_threads in [1usize, 2, 3, 8, 17, 64] {
                    check_loads(total, overhead_limit, max_threads);
                }
            }
        }
    }

    #[test]
    fn test_remainder_goes_first() {
        assert_eq!(optimal_thread_loads(10, 1, 4), vec![3, 3, 2, 2]);
        assert_eq!(optimal_thread_loads(3, 1, 8), vec![1, 1, 1]);
        assert_eq!(optimal_thread_loads(100, 40, 8), vec![50, 50]);
        assert_eq!(optimal_thread_loads(5, 1, 1), vec![5]);
        assert!(optimal_thread_loads(0, 1, 4).is_empty());
    }

    #[test]
    fn test_unbounded_uses_hardware() {
        let loads = optimal_thread_loads(1 << 16, 1, 0);
        assert_eq!(loads.iter().sum::<usize>(), 1 << 16);
        assert!(loads.len() <= ThreadingPolicy::Adaptive.max_threads());
    }

    #[test]
    fn test_aligned_loads() {
        let loads = optimal_thread_loads_aligned(100, 8, 1, 4);
        assert_eq!(loads.iter().sum::<usize>(), 100);
        for &load in loads.iter().take(loads.len() - 1) {
            assert_eq!(load % 8, 0, "Load {load} is not aligned in {loads:?}");
        }
        assert!(loads.iter().all(|&x| x > 0));
    }
}
