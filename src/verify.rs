//! Tolerance-based comparison of two products.
//!
//! Floating-point addition is not associative, so a kernel that reorders the
//! reduction may legitimately differ from the reference in the last bits.
//! The bound used here grows with the reduction length `k` and the size of
//! the trusted result:
//!
//! ```text
//! tolerance = EPSILON * k * max|C_ref|
//! ```

use crate::error::{MatmulError, Result};

/// Largest absolute value in `values`, 0 for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Allowed element-wise difference from `reference`, a product whose
/// reductions are `a_cols` long.
pub fn tolerance(reference: &[f64], a_cols: usize) -> f64 {
    f64::EPSILON * a_cols as f64 * max_abs(reference)
}

/// Largest element-wise absolute difference.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn max_abs_diff(expected: &[f64], actual: &[f64]) -> f64 {
    assert_eq!(expected.len(), actual.len(), "length mismatch");
    expected
        .iter()
        .zip(actual)
        .fold(0.0_f64, |acc, (e, a)| acc.max((e - a).abs()))
}

/// Checks `actual` against `expected` cell by cell.
///
/// Returns the first cell (row-major) whose difference exceeds `tolerance`.
/// A NaN in either buffer is always a mismatch.
pub fn compare(expected: &[f64], actual: &[f64], cols: usize, tolerance: f64) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(MatmulError::DimensionMismatch {
            what: "compared output",
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    for (idx, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        let within = (e - a).abs() <= tolerance;
        if !within {
            let (row, col) = if cols == 0 { (0, 0) } else { (idx / cols, idx % cols) };
            return Err(MatmulError::Mismatch {
                row,
                col,
                expected: e,
                actual: a,
                tolerance,
            });
        }
    }
    Ok(())
}
