//! Structural checks on explicit matrices.
//!
//! The orthogonality predicates compare a Gram matrix with the identity using an
//! absolute tolerance of `k · 1e-6` (`k` the Gram dimension) plus a relative `1e-5` on
//! the diagonal. Symmetry checks are exact.

use crate::core::traits::Scalar;
use crate::operator::DenseOperator;
use faer::linalg::solvers::Llt;
use faer::traits::ComplexField;
use faer::{Mat, Side};

/// `Aᵀ`.
pub fn transpose<T: Scalar>(a: &DenseOperator<T>) -> DenseOperator<T> {
    let m = a.matrix();
    DenseOperator::from_fn(m.ncols(), m.nrows(), |i, j| m[(j, i)])
}

/// `Aᴴ`, the conjugate transpose.
pub fn hermitian<T: Scalar>(a: &DenseOperator<T>) -> DenseOperator<T> {
    let m = a.matrix();
    DenseOperator::from_fn(m.ncols(), m.nrows(), |i, j| m[(j, i)].conj())
}

pub fn is_square<T: Scalar>(a: &DenseOperator<T>) -> bool {
    a.matrix().nrows() == a.matrix().ncols()
}

/// `A == Aᵀ`, entry for entry.
pub fn is_symmetric<T: Scalar>(a: &DenseOperator<T>) -> bool {
    let m = a.matrix();
    is_square(a) && (0..m.nrows()).all(|i| (0..i).all(|j| m[(i, j)] == m[(j, i)]))
}

/// `A == Aᴴ`, entry for entry (real diagonal included).
pub fn is_hermitian<T: Scalar>(a: &DenseOperator<T>) -> bool {
    let m = a.matrix();
    is_square(a) && (0..m.nrows()).all(|i| (0..=i).all(|j| m[(i, j)] == m[(j, i)].conj()))
}

/// Hermitian with a successful Cholesky factorization.
pub fn is_positive_definite<T>(a: &DenseOperator<T>) -> bool
where
    T: Scalar + ComplexField,
{
    is_hermitian(a) && Llt::new(a.matrix().as_ref(), Side::Lower).is_ok()
}

/// `AᵀA ≈ I`.
pub fn has_orthogonal_columns<T>(a: &DenseOperator<T>) -> bool
where
    T: Scalar + ComplexField,
{
    let m = a.matrix();
    is_near_identity(&(m.transpose() * m.as_ref()))
}

/// `AAᵀ ≈ I`.
pub fn has_orthogonal_rows<T>(a: &DenseOperator<T>) -> bool
where
    T: Scalar + ComplexField,
{
    let m = a.matrix();
    is_near_identity(&(m.as_ref() * m.transpose()))
}

/// `AᴴA ≈ I`.
pub fn has_unitary_columns<T>(a: &DenseOperator<T>) -> bool
where
    T: Scalar + ComplexField,
{
    let h = hermitian(a);
    is_near_identity(&(h.matrix().as_ref() * a.matrix().as_ref()))
}

/// `AAᴴ ≈ I`.
pub fn has_unitary_rows<T>(a: &DenseOperator<T>) -> bool
where
    T: Scalar + ComplexField,
{
    let h = hermitian(a);
    is_near_identity(&(a.matrix().as_ref() * h.matrix().as_ref()))
}

fn is_near_identity<T: Scalar>(g: &Mat<T>) -> bool {
    let k = g.nrows();
    let atol = T::Real::from_f64(k as f64 * 1e-6);
    let rtol = T::Real::from_f64(1e-5);
    (0..k).all(|i| {
        (0..k).all(|j| {
            let delta = if i == j { T::one() } else { T::zero() };
            (g[(i, j)] - delta).modulus() <= atol + rtol * delta.modulus()
        })
    })
}
