//! Dense vector primitives used for residual and norm bookkeeping.
//!
//! All reductions run sequentially in index order so that two runs on the same
//! input produce bit-identical results.

use crate::core::traits::{LinearOperator, Scalar};
use num_traits::{Float, Zero};

/// Inner product `<x, y> = Σ conj(xᵢ) yᵢ`.
pub fn dot<T: Scalar>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter()
        .zip(y.iter())
        .fold(T::zero(), |acc, (&xi, &yi)| acc + xi.conj() * yi)
}

/// Squared Euclidean norm `‖x‖₂²`.
pub fn norm_sqr<T: Scalar>(x: &[T]) -> T::Real {
    x.iter()
        .fold(T::Real::zero(), |acc, &xi| acc + xi.modulus_sqr())
}

/// Euclidean norm `‖x‖₂`.
pub fn norm<T: Scalar>(x: &[T]) -> T::Real {
    norm_sqr(x).sqrt()
}

/// `y ← y + alpha · x`
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi += alpha * xi;
    }
}

/// `x ← alpha · x`
pub fn scale<T: Scalar>(alpha: T, x: &mut [T]) {
    for xi in x.iter_mut() {
        *xi *= alpha;
    }
}

/// Euclidean distance `‖x − y‖₂`.
pub fn distance<T: Scalar>(x: &[T], y: &[T]) -> T::Real {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter()
        .zip(y.iter())
        .fold(T::Real::zero(), |acc, (&xi, &yi)| acc + (xi - yi).modulus_sqr())
        .sqrt()
}

/// Residual `r = b − A·x`, always recomputed from scratch.
pub fn residual<T, O>(op: &O, b: &[T], x: &[T]) -> Vec<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let mut r = op.apply(x);
    for (ri, &bi) in r.iter_mut().zip(b.iter()) {
        *ri = bi - *ri;
    }
    r
}

/// Scatter `values` into a zero vector of length `n` at `support`.
pub fn embed<T: Scalar>(n: usize, support: &[usize], values: &[T]) -> Vec<T> {
    assert_eq!(support.len(), values.len(), "Support and values must have the same length");
    let mut x = vec![T::zero(); n];
    for (&i, &v) in support.iter().zip(values.iter()) {
        x[i] = v;
    }
    x
}

/// Gather the entries of `x` at `support`.
pub fn gather<T: Scalar>(x: &[T], support: &[usize]) -> Vec<T> {
    support.iter().map(|&i| x[i]).collect()
}

/// Indices of the nonzero entries of `x`, ascending.
pub fn nonzero_support<T: Scalar>(x: &[T]) -> Vec<usize> {
    x.iter()
        .enumerate()
        .filter(|(_, v)| !v.is_zero())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn complex_dot_conjugates_first_argument() {
        let x = vec![Complex64::new(0.0, 1.0), Complex64::new(2.0, 0.0)];
        let y = vec![Complex64::new(0.0, 1.0), Complex64::new(1.0, 1.0)];
        // conj(i)·i + 2·(1+i) = 1 + 2 + 2i
        assert_eq!(dot(&x, &y), Complex64::new(3.0, 2.0));
        assert!((norm(&x) - 5.0f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn embed_and_gather_are_inverse_on_support() {
        let x = embed(6, &[1, 4], &[2.0, -3.0]);
        assert_eq!(x, vec![0.0, 2.0, 0.0, 0.0, -3.0, 0.0]);
        assert_eq!(gather(&x, &[1, 4]), vec![2.0, -3.0]);
        assert_eq!(nonzero_support(&x), vec![1, 4]);
    }

    #[test]
    fn axpy_and_distance() {
        let mut y: Vec<f64> = vec![1.0, 1.0];
        axpy(2.0, &[1.0, -1.0], &mut y);
        assert_eq!(y, vec![3.0, -1.0]);
        assert!((distance(&y, &[0.0, 3.0]) - 5.0).abs() < 1e-15);
    }
}
