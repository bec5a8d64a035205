//! Work partitioning
//!
//! Splits `0..count` into contiguous, non-overlapping ranges that the worker
//! pool processes independently. Every index lands in exactly one range. All
//! ranges have [`Partition::chunk_size`] items except the last, so the same
//! split is what `par_chunks` produces for that chunk size.

use std::ops::Range;

use crate::config::{CHUNKS_PER_WORKER, MIN_CHUNK_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    count: usize,
    chunk_size: usize,
}

impl Partition {
    /// Size ranges from the worker count, with a floor so tiny populations
    /// are not split into tasks that cost more to schedule than to run.
    pub fn with_heuristic(
        count: usize,
        workers: usize,
        chunks_per_worker: usize,
        min_chunk: usize,
    ) -> Self {
        let target = workers.max(1) * chunks_per_worker.max(1);
        let chunk_size = (count / target).max(min_chunk).max(1);
        Self { count, chunk_size }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of ranges
    #[inline]
    pub fn len(&self) -> usize {
        self.count.div_ceil(self.chunk_size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn range(&self, index: usize) -> Range<usize> {
        let start = (index * self.chunk_size).min(self.count);
        let end = (start + self.chunk_size).min(self.count);
        start..end
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.len()).map(|i| self.range(i))
    }
}

/// Split `0..count` for `workers` threads: two ranges per worker, none
/// smaller than [`MIN_CHUNK_SIZE`] unless it is the remainder.
pub fn partition(count: usize, workers: usize) -> Vec<Range<usize>> {
    Partition::with_heuristic(count, workers, CHUNKS_PER_WORKER, MIN_CHUNK_SIZE)
        .ranges()
        .collect()
}
