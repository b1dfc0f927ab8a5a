//! Least squares restricted to a support: `min_z ‖A_S z − b‖₂`.
//!
//! `A_S` is materialized column by column through `times` on unit vectors, so any
//! [`LinearOperator`] works, not only dense matrices.

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use crate::linalg::LeastSquares;
use crate::operator::{to_matrix, ColumnSubset};
use faer::Mat;

/// Fails on an index `≥ n` or a repeated index.
pub fn validate_support(support: &[usize], n: usize) -> Result<(), SpError> {
    let mut seen = vec![false; n];
    for &j in support {
        if j >= n {
            return Err(SpError::SupportOutOfRange { index: j, len: n });
        }
        if seen[j] {
            return Err(SpError::DuplicateSupport(j));
        }
        seen[j] = true;
    }
    Ok(())
}

/// Dense `m × |S|` matrix of the columns of `op` listed in `support`.
pub fn restricted_matrix<T, O>(op: &O, support: &[usize]) -> Mat<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    to_matrix(&ColumnSubset::new(op, support.to_vec()))
}

/// Coefficients `z` (one per support entry, in support order) minimizing `‖A_S z − b‖₂`.
///
/// Rank-deficient restrictions get the minimum-norm solution from the backend.
pub fn solve_on_support<T, O>(
    op: &O,
    b: &[T],
    support: &[usize],
    solver: &dyn LeastSquares<T>,
) -> Result<Vec<T>, SpError>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let (m, n) = op.shape();
    if b.len() != m {
        return Err(SpError::shape(format!(
            "measurement has {} entries, operator has {} rows",
            b.len(),
            m
        )));
    }
    validate_support(support, n)?;
    if support.is_empty() {
        return Ok(Vec::new());
    }
    let a_s = restricted_matrix(op, support);
    solver.solve(&a_s, b)
}

/// [`solve_on_support`] scattered back into a length-`n` vector.
pub fn solve_on_support_dense<T, O>(
    op: &O,
    b: &[T],
    support: &[usize],
    solver: &dyn LeastSquares<T>,
) -> Result<Vec<T>, SpError>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let z = solve_on_support(op, b, support, solver)?;
    Ok(crate::core::vector::embed(op.ncols(), support, &z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::SvdSolver;
    use crate::operator::DenseOperator;

    #[test]
    fn validation_catches_bad_supports() {
        assert_eq!(validate_support(&[0, 2], 3), Ok(()));
        assert_eq!(
            validate_support(&[0, 3], 3),
            Err(SpError::SupportOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(validate_support(&[1, 1], 3), Err(SpError::DuplicateSupport(1)));
    }

    #[test]
    fn empty_support_gives_empty_solution() {
        let a = DenseOperator::from_fn(3, 4, |i, j| (i + j) as f64);
        let z = solve_on_support(&a, &[1.0, 2.0, 3.0], &[], &SvdSolver).unwrap();
        assert!(z.is_empty());
    }

    #[test]
    fn restricted_matrix_matches_columns() {
        let a = DenseOperator::from_fn(3, 4, |i, j| (10 * i + j) as f64);
        let sub = restricted_matrix(&a, &[3, 1]);
        for i in 0..3 {
            assert_eq!(sub[(i, 0)], (10 * i + 3) as f64);
            assert_eq!(sub[(i, 1)], (10 * i + 1) as f64);
        }
    }
}
