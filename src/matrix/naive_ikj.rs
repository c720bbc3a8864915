use std::ops::Range;

/// Cache-friendly matrix multiplication using i-p-j loop order.
///
/// By swapping the j and p loops, the innermost loop accesses both
/// B and C sequentially (stride 1). Partial sums now live in C across many
/// `p` iterations, so each output row is zeroed before accumulation starts.
///
/// Each cell still sums `p` in ascending order, so the result matches
/// [`matmul_naive_ijk`](super::naive_ijk::matmul_naive_ijk) exactly.
///
/// # Arguments
///
/// * `c` - Output C (a_rows × b_cols), row-major, overwritten
/// * `a` - Matrix A (a_rows × a_cols), row-major
/// * `b` - Matrix B (a_cols × b_cols), row-major
pub fn matmul_naive_ikj(
    c: &mut [f64],
    a: &[f64],
    b: &[f64],
    a_rows: usize,
    a_cols: usize,
    b_cols: usize,
) {
    matmul_naive_ikj_rows(c, a, b, 0..a_rows, a_cols, b_cols);
}

/// Same as [`matmul_naive_ikj`] restricted to output rows `rows`.
pub fn matmul_naive_ikj_rows(
    c_rows: &mut [f64],
    a: &[f64],
    b: &[f64],
    rows: Range<usize>,
    a_cols: usize,
    b_cols: usize,
) {
    debug_assert_eq!(c_rows.len(), rows.len() * b_cols);
    c_rows.fill(0.0);

    for (local, i) in rows.enumerate() {
        let a_row = &a[i * a_cols..][..a_cols];
        let c_row = &mut c_rows[local * b_cols..][..b_cols];
        for (p, &a_ip) in a_row.iter().enumerate() {
            let b_row = &b[p * b_cols..][..b_cols];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    #[test]
    fn test_matches_ijk_exactly() {
        let (m, k, n) = (7, 11, 5);
        let a: Vec<f64> = (0..m * k).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i as f64 * 0.11).cos()).collect();

        let mut c_ijk = vec![0.0; m * n];
        let mut c_ikj = vec![0.0; m * n];
        matmul_naive_ijk(&mut c_ijk, &a, &b, m, k, n);
        matmul_naive_ikj(&mut c_ikj, &a, &b, m, k, n);

        assert_eq!(c_ijk, c_ikj);
    }

    #[test]
    fn test_zeroes_before_accumulating() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2×3
        let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3×2
        let mut c = vec![5.0; 4];

        matmul_naive_ikj(&mut c, &a, &b, 2, 3, 2);

        assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
    }
}
