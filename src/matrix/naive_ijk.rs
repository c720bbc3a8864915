use std::ops::Range;

/// Reference matrix multiplication using i-j-p loop order.
///
/// This is the textbook triple loop. Each cell of C is finished in one pass:
/// the dot product starts from zero and sums `A[i][p] * B[p][j]` for
/// `p = 0..a_cols` in order, then overwrites `C[i][j]`. The inner loop walks
/// B with stride `b_cols` (column-wise), which is why it's slow.
///
/// It defines ground truth for every other kernel in the crate.
///
/// # Arguments
///
/// * `c` - Output C (a_rows × b_cols), row-major, overwritten
/// * `a` - Matrix A (a_rows × a_cols), row-major
/// * `b` - Matrix B (a_cols × b_cols), row-major
pub fn matmul_naive_ijk(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) {
    matmul_naive_ijk_rows(c, a, b, 0..a_rows, a_cols, b_cols);
}

/// Same as [`matmul_naive_ijk`] restricted to output rows `rows`.
///
/// `c_rows` holds only those rows: row `rows.start` of C is `c_rows[0..b_cols]`.
pub fn matmul_naive_ijk_rows(
    c_rows: &mut [f64],
    a: &[f64],
    b: &[f64],
    rows: Range<usize>,
    a_cols: usize,
    b_cols: usize,
) {
    debug_assert_eq!(c_rows.len(), rows.len() * b_cols);

    for (local, i) in rows.enumerate() {
        let a_row = &a[i * a_cols..][..a_cols];
        let c_row = &mut c_rows[local * b_cols..][..b_cols];
        for (j, c_ij) in c_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (p, &a_ip) in a_row.iter().enumerate() {
                sum += a_ip * b[p * b_cols + j];
            }
            *c_ij = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrites_stale_output() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];
        let mut c = vec![100.0; 4];

        matmul_naive_ijk(&mut c, &a, &b, 2, 2, 2);

        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_row_range_only_touches_its_rows() {
        // 3×2 times 2×2
        let a = vec![1.0, 0.0, 0.0, 1.0, 2.0, 2.0];
        let b = vec![1.0, 2.0, 3.0, 4.0];
        let mut c_rows = vec![0.0; 2];

        matmul_naive_ijk_rows(&mut c_rows, &a, &b, 2..3, 2, 2);

        assert_eq!(c_rows, vec![8.0, 12.0]);
    }

    #[test]
    fn test_empty_inner_dimension_gives_zeros() {
        let mut c = vec![7.0; 6];
        matmul_naive_ijk(&mut c, &[], &[], 2, 0, 3);
        assert_eq!(c, vec![0.0; 6]);
    }
}
