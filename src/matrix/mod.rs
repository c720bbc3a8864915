//! Matrix storage and the scalar baselines.
//!
//! [`Matrix`] is a single contiguous row-major buffer with stride `cols`.
//! The kernels themselves work on raw slices, so the type is a convenience
//! for callers and the harness, not a requirement.

pub mod naive_ijk;
pub mod naive_ikj;

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::config::MultiplyConfig;
use crate::error::{MatmulError, Result};

/// Dense row-major `f64` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatmulError::DimensionMismatch {
                what: "matrix buffer",
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Uniform values in `[-1, 1)`.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..][..self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..][..self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Largest absolute entry, 0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        crate::verify::max_abs(&self.data)
    }

    /// `a × b` with the reference kernel.
    pub fn multiply_reference(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_product_shape(a, b)?;
        let mut c = Matrix::zeros(a.rows, b.cols);
        naive_ijk::matmul_naive_ijk(&mut c.data, &a.data, &b.data, a.rows, a.cols, b.cols);
        Ok(c)
    }

    /// `a × b` with the optimized multiplier configured by `config`.
    pub fn multiply(a: &Matrix, b: &Matrix, config: &MultiplyConfig) -> Result<Matrix> {
        check_product_shape(a, b)?;
        let mut c = Matrix::zeros(a.rows, b.cols);
        crate::threaded::parallel::matmul_parallel(
            &mut c.data,
            &a.data,
            &b.data,
            a.rows,
            a.cols,
            b.cols,
            config,
        )?;
        Ok(c)
    }
}

fn check_product_shape(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols != b.rows {
        return Err(MatmulError::DimensionMismatch {
            what: "rows of B",
            expected: a.cols,
            actual: b.rows,
        });
    }
    Ok(())
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        &mut self.data[i * self.cols + j]
    }
}
