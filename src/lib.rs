//! Cache-blocked, multithreaded dense matrix multiplication.
//!
//! Every optimized path is checked against a plain triple loop. The speedups
//! come from two places: walking B and C row-wise in small tiles so cache
//! lines get reused, and splitting the rows of C between OS threads.
//!
//! ## Usage
//!
//! ```
//! use tilemul::{multiply_optimized, multiply_reference};
//!
//! let a = vec![1.0, 2.0, 3.0, 4.0];
//! let b = vec![5.0, 6.0, 7.0, 8.0];
//! let mut c_ref = vec![0.0; 4];
//! let mut c_fast = vec![0.0; 4];
//!
//! multiply_reference(&mut c_ref, &a, &b, 2, 2, 2);
//! multiply_optimized(&mut c_fast, &a, &b, 2, 2, 2).unwrap();
//!
//! assert_eq!(c_ref, vec![19.0, 22.0, 43.0, 50.0]);
//! assert_eq!(c_ref, c_fast);
//! ```
//!
//! To pick the worker count, tile size or per-worker kernel yourself:
//!
//! ```
//! use tilemul::{multiply_with, Kernel, MultiplyConfig};
//!
//! let n = 64;
//! let a = vec![1.0f64; n * n];
//! let b = vec![1.0f64; n * n];
//! let mut c = vec![0.0f64; n * n];
//!
//! let config = MultiplyConfig::default()
//!     .with_workers(4)
//!     .with_tile_size(16)
//!     .with_kernel(Kernel::Tiled);
//! multiply_with(&config, &mut c, &a, &b, n, n, n).unwrap();
//! assert!(c.iter().all(|&v| v == n as f64));
//! ```
//!
//! ## What's inside
//!
//! - Reference i-j-p kernel and the i-p-j reordering
//! - Tiled kernel with a tunable tile edge (default 8)
//! - Row-partitioned scoped threads, joined before returning
//! - Tolerance-based verification helpers

pub mod blocked;
pub mod config;
pub mod error;
pub mod matrix;
pub mod threaded;
pub mod verify;

pub use config::{DEFAULT_TILE_SIZE, Kernel, MultiplyConfig};
pub use error::{MatmulError, Result};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use threaded::parallel::run_partitioned;
pub use threaded::partition::{RowRange, partition_rows};

/// Reference multiply: C = A * B.
///
/// Matrices are row-major: A is a_rows×a_cols, B is a_cols×b_cols, C is
/// a_rows×b_cols. C is overwritten, never read.
///
/// # Panics
///
/// Panics if the slice sizes don't match the dimensions.
pub fn multiply_reference(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) {
    assert_dims(c, a, b, a_rows, a_cols, b_cols);
    matrix::naive_ijk::matmul_naive_ijk(c, a, b, a_rows, a_cols, b_cols);
}

/// Optimized multiply: C = A * B, tiled and spread over all hardware threads.
///
/// Same contract as [`multiply_reference`]. Uses [`MultiplyConfig::default`].
///
/// # Errors
///
/// Fails only if a worker thread can't be started or panics. C is then
/// incomplete and must not be used; [`multiply_tiled`] is the
/// single-threaded fallback.
///
/// # Panics
///
/// Panics if the slice sizes don't match the dimensions.
pub fn multiply_optimized(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) -> Result<()> {
    multiply_with(&MultiplyConfig::default(), c, a, b, a_rows, a_cols, b_cols)
}

/// Same as [`multiply_optimized`] with an explicit configuration.
pub fn multiply_with(
    config: &MultiplyConfig,
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) -> Result<()> {
    assert_dims(c, a, b, a_rows, a_cols, b_cols);
    threaded::parallel::matmul_parallel(c, a, b, a_rows, a_cols, b_cols, config)
}

/// Single-threaded i-p-j multiply.
pub fn multiply_reordered(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) {
    assert_dims(c, a, b, a_rows, a_cols, b_cols);
    matrix::naive_ikj::matmul_naive_ikj(c, a, b, a_rows, a_cols, b_cols);
}

/// Single-threaded tiled multiply with a `tile × tile` block size.
pub fn multiply_tiled(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
    tile: usize,
) {
    assert_dims(c, a, b, a_rows, a_cols, b_cols);
    blocked::tiled::matmul_tiled(c, a, b, a_rows, a_cols, b_cols, tile);
}

fn assert_dims(c: &[f64], a: &[f64], b: &[f64], a_rows: usize, a_cols: usize, b_cols: usize) {
    assert_eq!(
        a.len(),
        a_rows * a_cols,
        "A: expected {}x{}={} elements",
        a_rows,
        a_cols,
        a_rows * a_cols
    );
    assert_eq!(
        b.len(),
        a_cols * b_cols,
        "B: expected {}x{}={} elements",
        a_cols,
        b_cols,
        a_cols * b_cols
    );
    assert_eq!(
        c.len(),
        a_rows * b_cols,
        "C: expected {}x{}={} elements",
        a_rows,
        b_cols,
        a_rows * b_cols
    );
}
