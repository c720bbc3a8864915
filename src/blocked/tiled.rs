//! Tiled i-p-j multiplication.

use std::ops::Range;

/// Cache-blocked matrix multiplication with square `tile × tile` blocks of C.
///
/// Rows and columns of C are cut into tiles. For each row tile, every `p`
/// streams one row of B through all column tiles, so the handful of C and B
/// cache lines a tile touches stay in L1 while they are reused. Tiles on the
/// bottom and right edges are clamped to the real dimensions.
///
/// Every `(i, p, j)` triple is visited exactly once and accumulated, and for
/// a fixed cell `p` still ascends, so the result is the reference result.
///
/// # Arguments
///
/// * `c` - Output C (a_rows × b_cols), row-major, overwritten
/// * `tile` - Tile edge; 0 is treated as 1
pub fn matmul_tiled(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
    tile: usize,
) {
    matmul_tiled_rows(c, a, b, 0..a_rows, a_cols, b_cols, tile);
}

/// Same as [`matmul_tiled`] restricted to output rows `rows`.
///
/// Row tiles start at `rows.start`, so each worker tiles its own range.
#[allow(clippy::too_many_arguments)]
pub fn matmul_tiled_rows(
    c_rows: &mut [f64],
    a: &[f64],
    b: &[f64],
    rows: Range<usize>,
    a_cols: usize,
    b_cols: usize,
    tile: usize,
) {
    debug_assert_eq!(c_rows.len(), rows.len() * b_cols);
    let tile = tile.max(1);
    let base = rows.start;

    // Accumulation below needs every cell at zero first
    c_rows.fill(0.0);

    for ii in rows.clone().step_by(tile) {
        let i_stop = (ii + tile).min(rows.end);

        for p in 0..a_cols {
            let b_row = &b[p * b_cols..][..b_cols];

            for jj in (0..b_cols).step_by(tile) {
                let j_stop = (jj + tile).min(b_cols);
                let b_tile = &b_row[jj..j_stop];

                for i in ii..i_stop {
                    let a_ip = a[i * a_cols + p];
                    let row = (i - base) * b_cols;
                    let c_tile = &mut c_rows[row + jj..row + j_stop];
                    for (c_ij, &b_pj) in c_tile.iter_mut().zip(b_tile) {
                        *c_ij += a_ip * b_pj;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    fn check(m: usize, k: usize, n: usize, tile: usize) {
        let a: Vec<f64> = (0..m * k).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();
        let b: Vec<f64> = (0..k * n).map(|i| ((i * 5) % 11) as f64 * 0.5).collect();

        let mut c_naive = vec![0.0; m * n];
        let mut c_tiled = vec![f64::NAN; m * n];
        matmul_naive_ijk(&mut c_naive, &a, &b, m, k, n);
        matmul_tiled(&mut c_tiled, &a, &b, m, k, n, tile);

        assert_eq!(c_naive, c_tiled, "{m}x{k}x{n} tile {tile}");
    }

    #[test]
    fn test_tile_boundaries() {
        for size in [1, 7, 8, 9, 15, 16, 17] {
            check(size, size, size, 8);
        }
    }

    #[test]
    fn test_non_square_and_odd_tiles() {
        check(13, 17, 19, 8);
        check(3, 40, 2, 4);
        check(20, 1, 20, 3);
        check(5, 5, 5, 64);
    }

    #[test]
    fn test_zero_tile_is_clamped() {
        check(4, 4, 4, 0);
    }

    #[test]
    fn test_row_range_tiles_from_its_own_start() {
        let (m, k, n) = (10, 6, 9);
        let a: Vec<f64> = (0..m * k).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i % 4) as f64).collect();

        let mut full = vec![0.0; m * n];
        matmul_naive_ijk(&mut full, &a, &b, m, k, n);

        let mut part = vec![0.0; 5 * n];
        matmul_tiled_rows(&mut part, &a, &b, 3..8, k, n, 4);

        assert_eq!(&full[3 * n..8 * n], part.as_slice());
    }
}
