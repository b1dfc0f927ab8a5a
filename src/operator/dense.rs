//! Dense-matrix operator on top of faer.
//!
//! [`DenseOperator`] wraps an explicit `faer::Mat<T>`; `times` is the matrix-vector
//! product and `trans` the conjugate-transpose product. With the `rayon` feature, large
//! forward products are split across rows; every output entry is still summed in
//! column order, so serial and parallel runs agree bit for bit.

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use faer::Mat;

#[cfg(feature = "rayon")]
const PAR_MIN_ENTRIES: usize = 1 << 16;

/// Explicitly stored `m × n` matrix.
#[derive(Clone, Debug)]
pub struct DenseOperator<T: Scalar> {
    mat: Mat<T>,
}

impl<T: Scalar> DenseOperator<T> {
    pub fn new(mat: Mat<T>) -> Self {
        Self { mat }
    }

    pub fn from_fn(nrows: usize, ncols: usize, f: impl FnMut(usize, usize) -> T) -> Self {
        Self { mat: Mat::from_fn(nrows, ncols, f) }
    }

    /// Construct from raw column-major storage.
    pub fn from_column_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, SpError> {
        if data.len() != nrows * ncols {
            return Err(SpError::shape(format!(
                "{} values cannot fill a {}x{} matrix",
                data.len(),
                nrows,
                ncols
            )));
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| data[j * nrows + i]))
    }

    /// Construct from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, SpError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(SpError::shape(format!(
                "row {} has {} entries, expected {}",
                i,
                r.len(),
                ncols
            )));
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| rows[i][j]))
    }

    pub fn matrix(&self) -> &Mat<T> {
        &self.mat
    }

    pub fn into_matrix(self) -> Mat<T> {
        self.mat
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<T> {
        (0..self.mat.nrows()).map(|i| self.mat[(i, j)]).collect()
    }

    fn row_dot(&self, i: usize, x: &[T]) -> T {
        let mut acc = T::zero();
        for (j, &xj) in x.iter().enumerate() {
            acc += self.mat[(i, j)] * xj;
        }
        acc
    }
}

impl<T: Scalar> From<Mat<T>> for DenseOperator<T> {
    fn from(mat: Mat<T>) -> Self {
        Self::new(mat)
    }
}

impl<T: Scalar> LinearOperator<T> for DenseOperator<T> {
    fn shape(&self) -> (usize, usize) {
        (self.mat.nrows(), self.mat.ncols())
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.mat.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.mat.ncols(), x.len(), "Input vector x has incorrect length");
        #[cfg(feature = "rayon")]
        {
            if self.mat.nrows() * self.mat.ncols() >= PAR_MIN_ENTRIES {
                use rayon::prelude::*;
                y.par_iter_mut()
                    .enumerate()
                    .for_each(|(i, yi)| *yi = self.row_dot(i, x));
                return;
            }
        }
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = self.row_dot(i, x);
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        assert_eq!(self.mat.ncols(), x.len(), "Output vector x has incorrect length");
        assert_eq!(self.mat.nrows(), y.len(), "Input vector y has incorrect length");
        for (j, xj) in x.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (i, &yi) in y.iter().enumerate() {
                acc += self.mat[(i, j)].conj() * yi;
            }
            *xj = acc;
        }
    }
}
