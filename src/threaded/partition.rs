//! Splitting output rows between workers.

use std::ops::Range;

/// Half-open range `[start, end)` of output rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Assigns worker `t` of `workers` the rows
/// `[t * rows / workers, (t + 1) * rows / workers)`.
///
/// Row counts differ by at most one between workers. When there are more
/// workers than rows some ranges are empty. `workers == 0` is treated as 1.
pub fn partition_rows(rows: usize, workers: usize) -> Vec<RowRange> {
    let workers = workers.max(1);
    (0..workers)
        .map(|t| RowRange {
            start: t * rows / workers,
            end: (t + 1) * rows / workers,
        })
        .collect()
}

/// One worker's share of a multiply: its id, rows, and the matching slice of C.
#[derive(Debug)]
pub struct Task<'c> {
    pub id: usize,
    pub rows: RowRange,
    pub c_rows: &'c mut [f64],
}

/// Cuts `c` into one exclusive slice per non-empty range.
///
/// `ranges` must be contiguous from row 0 in order, as produced by
/// [`partition_rows`].
pub fn split_tasks<'c>(c: &'c mut [f64], ranges: &[RowRange], cols: usize) -> Vec<Task<'c>> {
    let mut rest = c;
    let mut tasks = Vec::with_capacity(ranges.len());
    for (id, &rows) in ranges.iter().enumerate() {
        let (c_rows, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * cols);
        rest = tail;
        if !rows.is_empty() {
            tasks.push(Task { id, rows, c_rows });
        }
    }
    tasks
}
