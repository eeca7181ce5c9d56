//! Dense matrix and vector containers.
//!
//! Only what the tableau needs: indexed access, row views, transposition and
//! tolerance-aware comparison. Storage is row-major and 0-based.

use std::ops::{Index, IndexMut};

use crate::lcp::error::LcpError;
use crate::lcp::scalar::Scalar;

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Create a `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Build a matrix from nested rows.
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, LcpError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let num_rows = rows.len();

        for row in rows {
            if row.len() != cols {
                return Err(LcpError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: num_rows,
            cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow one row as a slice.
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out[(c, r)] = self[(r, c)].clone();
            }
        }
        out
    }

    /// Apply `f` to every entry.
    pub fn map<F: Fn(&T) -> T>(&self, f: F) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min_entry(&self) -> Option<T> {
        self.data.iter().fold(None, |acc: Option<T>, v| match acc {
            Some(m) if m <= *v => Some(m),
            _ => Some(v.clone()),
        })
    }

    /// Entry-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: &T) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(b, eps))
    }

    /// Subtract `factor * row(src)` from `row(dst)`.
    pub(crate) fn row_axpy(&mut self, dst: usize, src: usize, factor: &T) {
        for c in 0..self.cols {
            let delta = factor.clone() * self.data[src * self.cols + c].clone();
            let cell = &mut self.data[dst * self.cols + c];
            *cell = cell.clone() - delta;
        }
    }

    /// Divide every entry of `row(r)` by `divisor`.
    pub(crate) fn scale_row(&mut self, r: usize, divisor: &T) {
        for c in 0..self.cols {
            let cell = &mut self.data[r * self.cols + c];
            *cell = cell.clone() / divisor.clone();
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.data[r * self.cols + c]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        &mut self.data[r * self.cols + c]
    }
}

/// Dense vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    /// Vector of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Sum of all entries.
    pub fn sum(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, v| acc + v.clone())
    }

    /// Entry-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: &T) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(b, eps))
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_index() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            LcpError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_transpose_and_min() {
        let m = Matrix::from_rows(vec![vec![1.0, -2.0], vec![3.0, 4.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t[(0, 1)], 3.0);
        assert_eq!(t[(1, 0)], -2.0);
        assert_eq!(m.min_entry(), Some(-2.0));
        assert_eq!(Matrix::<f64>::zeros(0, 0).min_entry(), None);
    }

    #[test]
    fn test_row_operations() {
        let mut m = Matrix::from_rows(vec![vec![2.0, 4.0], vec![1.0, 3.0]]).unwrap();
        m.scale_row(0, &2.0);
        assert_eq!(m.row(0), &[1.0, 2.0]);
        m.row_axpy(1, 0, &1.0);
        assert_eq!(m.row(1), &[0.0, 1.0]);
    }

    #[test]
    fn test_vector_sum_and_approx_eq() {
        let v: Vector<f64> = vec![0.25, 0.25, 0.5].into();
        assert_eq!(v.sum(), 1.0);
        let w: Vector<f64> = vec![0.25, 0.25, 0.5 + 1e-12].into();
        assert!(v.approx_eq(&w, &1e-9));
        assert!(!v.approx_eq(&Vector::zeros(3), &1e-9));
    }
}
