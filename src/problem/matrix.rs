//! Dense square integer matrix.

use crate::error::{QapError, Result};

/// Row-major `n×n` matrix of `i64`.
///
/// Distance and flow matrices are read-only once a problem is built and are
/// shared across bees workers by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Creates an all-zero `n×n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Builds a matrix from row vectors.
    ///
    /// Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(QapError::DimensionMismatch {
                    expected: n,
                    rows: n,
                    cols: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix from `n * n` row-major values.
    pub fn from_flat(n: usize, data: Vec<i64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(QapError::DimensionMismatch {
                expected: n,
                rows: if n == 0 { 0 } else { data.len() / n },
                cols: n,
            });
        }
        Ok(Self { n, data })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.n + col]
    }

    /// Borrows one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.n..(row + 1) * self.n]
    }
}
