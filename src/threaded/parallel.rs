//! Row-parallel multiply on scoped OS threads.

use std::io;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::blocked::tiled::matmul_tiled_rows;
use crate::config::{Kernel, MultiplyConfig};
use crate::error::{MatmulError, Result};
use crate::matrix::naive_ijk::matmul_naive_ijk_rows;
use crate::matrix::naive_ikj::matmul_naive_ikj_rows;
use crate::threaded::partition::{RowRange, partition_rows, split_tasks};

/// Runs `work` once per worker over disjoint row slices of `c`.
///
/// `c` is `rows × cols`. Worker `t` receives its id, its [`RowRange`] and the
/// sub-slice of `c` holding exactly those rows. Threads are spawned fresh and
/// all of them are joined before this returns, error or not. A single
/// non-empty range runs inline on the calling thread.
///
/// # Errors
///
/// [`MatmulError::WorkerSpawn`] if the OS refuses a thread (workers already
/// running still finish first), [`MatmulError::WorkerPanicked`] if `work`
/// panics, whether on a spawned thread or inline.
pub fn run_partitioned<F>(
    c: &mut [f64],
    rows: usize,
    cols: usize,
    workers: NonZeroUsize,
    work: F,
) -> Result<()>
where
    F: Fn(usize, RowRange, &mut [f64]) + Sync,
{
    run_partitioned_with(c, rows, cols, workers, |_| Ok(()), work)
}

/// [`run_partitioned`] with a hook that runs before each worker is spawned.
///
/// An `Err` from `before_spawn` is treated exactly like the OS refusing the
/// thread.
pub(crate) fn run_partitioned_with<S, F>(
    c: &mut [f64],
    rows: usize,
    cols: usize,
    workers: NonZeroUsize,
    mut before_spawn: S,
    work: F,
) -> Result<()>
where
    S: FnMut(usize) -> io::Result<()>,
    F: Fn(usize, RowRange, &mut [f64]) + Sync,
{
    let ranges = partition_rows(rows, workers.get());
    let mut tasks = split_tasks(c, &ranges, cols);

    if tasks.len() <= 1 {
        if let Some(task) = tasks.pop() {
            let id = task.id;
            panic::catch_unwind(AssertUnwindSafe(|| work(task.id, task.rows, task.c_rows)))
                .map_err(|_| MatmulError::WorkerPanicked { worker: id })?;
        }
        return Ok(());
    }

    thread::scope(|s| {
        let work = &work;
        let mut handles = Vec::with_capacity(tasks.len());
        let mut result = Ok(());

        for task in tasks {
            let id = task.id;
            let spawned = before_spawn(id).and_then(|()| {
                thread::Builder::new()
                    .name(format!("matmul-worker-{id}"))
                    .spawn_scoped(s, move || {
                        log::trace!("worker {} started on rows {:?}", task.id, task.rows);
                        work(task.id, task.rows, task.c_rows);
                        log::trace!("worker {} finished", task.id);
                    })
            });

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(source) => {
                    log::warn!("could not spawn worker {id}: {source}");
                    result = Err(MatmulError::WorkerSpawn { worker: id, source });
                    break;
                }
            }
        }

        // Barrier: nothing is observable until every started worker is done
        for (id, handle) in handles {
            if handle.join().is_err() && result.is_ok() {
                result = Err(MatmulError::WorkerPanicked { worker: id });
            }
        }
        result
    })
}

/// Multi-threaded matrix multiplication.
///
/// Splits the rows of C across `config.workers` threads, each running
/// `config.kernel` on its own rows. A and B are shared read-only; every
/// worker writes only its own rows of C, so no locking is needed.
///
/// # Arguments
///
/// * `c` - Output C (a_rows × b_cols), row-major, overwritten
/// * `a` - Matrix A (a_rows × a_cols), row-major
/// * `b` - Matrix B (a_cols × b_cols), row-major
pub fn matmul_parallel(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
    config: &MultiplyConfig,
) -> Result<()> {
    log::debug!(
        "multiply {a_rows}x{a_cols} * {a_cols}x{b_cols}: kernel={} workers={} tile={}",
        config.kernel,
        config.workers,
        config.tile_size
    );

    let kernel = config.kernel;
    let tile = config.tile_size.get();

    run_partitioned(c, a_rows, b_cols, config.workers, |_, rows, c_rows| {
        let rows = rows.as_range();
        match kernel {
            Kernel::Reference => matmul_naive_ijk_rows(c_rows, a, b, rows, a_cols, b_cols),
            Kernel::Reordered => matmul_naive_ikj_rows(c_rows, a, b, rows, a_cols, b_cols),
            Kernel::Tiled => matmul_tiled_rows(c_rows, a, b, rows, a_cols, b_cols, tile),
        }
    })
}
