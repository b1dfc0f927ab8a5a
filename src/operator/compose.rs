//! Operator algebra and simple structured operators.
//!
//! Combinators never materialize anything: each stores its operands and applies them in
//! sequence, so `Composed<Fourier, RowSelect>` stays matrix-free.

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;

/// `A · B`: `times` applies `B` then `A`, `trans` applies `Aᴴ` then `Bᴴ`.
#[derive(Clone, Debug)]
pub struct Composed<A, B> {
    outer: A,
    inner: B,
}

impl<A, B> Composed<A, B> {
    /// Compose `outer · inner`; fails unless `outer.ncols() == inner.nrows()`.
    pub fn new<T: Scalar>(outer: A, inner: B) -> Result<Self, SpError>
    where
        A: LinearOperator<T>,
        B: LinearOperator<T>,
    {
        let (_, k_out) = outer.shape();
        let (k_in, _) = inner.shape();
        if k_out != k_in {
            return Err(SpError::shape(format!(
                "cannot compose {:?} with {:?}: inner dimensions {} and {} differ",
                outer.shape(),
                inner.shape(),
                k_out,
                k_in
            )));
        }
        Ok(Self { outer, inner })
    }
}

impl<T: Scalar, A: LinearOperator<T>, B: LinearOperator<T>> LinearOperator<T> for Composed<A, B> {
    fn shape(&self) -> (usize, usize) {
        (self.outer.nrows(), self.inner.ncols())
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        let tmp = self.inner.apply(x);
        self.outer.times(&tmp, y);
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        let tmp = self.outer.apply_adjoint(y);
        self.inner.trans(&tmp, x);
    }
}

/// `α · A`. The adjoint is `conj(α) · Aᴴ`.
#[derive(Clone, Debug)]
pub struct Scaled<A, T> {
    op: A,
    alpha: T,
}

impl<A, T: Scalar> Scaled<A, T> {
    pub fn new(op: A, alpha: T) -> Self {
        Self { op, alpha }
    }

    /// `−A`
    pub fn negate(op: A) -> Self {
        Self::new(op, -T::one())
    }

    pub fn factor(&self) -> T {
        self.alpha
    }
}

impl<T: Scalar, A: LinearOperator<T>> LinearOperator<T> for Scaled<A, T> {
    fn shape(&self) -> (usize, usize) {
        self.op.shape()
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        self.op.times(x, y);
        for yi in y.iter_mut() {
            *yi *= self.alpha;
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        self.op.trans(y, x);
        let a = self.alpha.conj();
        for xi in x.iter_mut() {
            *xi *= a;
        }
    }
}

/// `Aᴴ` as an operator in its own right (shape transposed, maps swapped).
#[derive(Clone, Debug)]
pub struct Adjoint<A> {
    op: A,
}

impl<A> Adjoint<A> {
    pub fn new(op: A) -> Self {
        Self { op }
    }

    pub fn into_inner(self) -> A {
        self.op
    }
}

impl<T: Scalar, A: LinearOperator<T>> LinearOperator<T> for Adjoint<A> {
    fn shape(&self) -> (usize, usize) {
        let (m, n) = self.op.shape();
        (n, m)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        self.op.trans(x, y)
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        self.op.times(y, x)
    }
}

/// `A + B` for operators of identical shape.
#[derive(Clone, Debug)]
pub struct Sum<A, B> {
    lhs: A,
    rhs: B,
}

impl<A, B> Sum<A, B> {
    pub fn new<T: Scalar>(lhs: A, rhs: B) -> Result<Self, SpError>
    where
        A: LinearOperator<T>,
        B: LinearOperator<T>,
    {
        if lhs.shape() != rhs.shape() {
            return Err(SpError::shape(format!(
                "cannot add operators of shape {:?} and {:?}",
                lhs.shape(),
                rhs.shape()
            )));
        }
        Ok(Self { lhs, rhs })
    }
}

impl<T: Scalar, A: LinearOperator<T>, B: LinearOperator<T>> LinearOperator<T> for Sum<A, B> {
    fn shape(&self) -> (usize, usize) {
        self.lhs.shape()
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        self.lhs.times(x, y);
        let other = self.rhs.apply(x);
        for (yi, oi) in y.iter_mut().zip(other) {
            *yi += oi;
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        self.lhs.trans(y, x);
        let other = self.rhs.apply_adjoint(y);
        for (xi, oi) in x.iter_mut().zip(other) {
            *xi += oi;
        }
    }
}

/// `n × n` identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity {
    n: usize,
}

impl Identity {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl<T: Scalar> LinearOperator<T> for Identity {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        y.copy_from_slice(x);
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        x.copy_from_slice(y);
    }
}

/// Diagonal scaling `y_i = d_i x_i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagonal<T> {
    diag: Vec<T>,
}

impl<T: Scalar> Diagonal<T> {
    pub fn new(diag: Vec<T>) -> Self {
        Self { diag }
    }

    pub fn entries(&self) -> &[T] {
        &self.diag
    }
}

impl<T: Scalar> LinearOperator<T> for Diagonal<T> {
    fn shape(&self) -> (usize, usize) {
        (self.diag.len(), self.diag.len())
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        for ((yi, &xi), &di) in y.iter_mut().zip(x).zip(&self.diag) {
            *yi = di * xi;
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        for ((xi, &yi), &di) in x.iter_mut().zip(y).zip(&self.diag) {
            *xi = di.conj() * yi;
        }
    }
}

/// Keeps the entries `rows` of a length-`n` vector; the adjoint scatters them back.
///
/// Composing a transform with a `RowSelect` gives the usual partial-measurement
/// operators (partial Fourier, partial Hadamard).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSelect {
    rows: Vec<usize>,
    n: usize,
}

impl RowSelect {
    /// `rows` may be in any order but must be distinct and below `n`.
    pub fn new(rows: Vec<usize>, n: usize) -> Result<Self, SpError> {
        let mut seen = vec![false; n];
        for &r in &rows {
            if r >= n {
                return Err(SpError::SupportOutOfRange { index: r, len: n });
            }
            if seen[r] {
                return Err(SpError::DuplicateSupport(r));
            }
            seen[r] = true;
        }
        Ok(Self { rows, n })
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

impl<T: Scalar> LinearOperator<T> for RowSelect {
    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.n)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        for (yi, &r) in y.iter_mut().zip(&self.rows) {
            *yi = x[r];
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        x.fill(T::zero());
        for (&yi, &r) in y.iter().zip(&self.rows) {
            x[r] = yi;
        }
    }
}

/// Restriction `A_S` of an operator to the columns in `support`:
/// `A_S z = A · embed(z)`, `A_Sᴴ y = (Aᴴ y)_S`.
#[derive(Clone, Debug)]
pub struct ColumnSubset<A> {
    op: A,
    support: Vec<usize>,
}

impl<A> ColumnSubset<A> {
    /// The support is assumed validated (distinct, in range).
    pub fn new(op: A, support: Vec<usize>) -> Self {
        Self { op, support }
    }

    pub fn support(&self) -> &[usize] {
        &self.support
    }
}

impl<T: Scalar, A: LinearOperator<T>> LinearOperator<T> for ColumnSubset<A> {
    fn shape(&self) -> (usize, usize) {
        (self.op.nrows(), self.support.len())
    }

    fn times(&self, z: &[T], y: &mut [T]) {
        let full = crate::core::vector::embed(self.op.ncols(), &self.support, z);
        self.op.times(&full, y);
    }

    fn trans(&self, y: &[T], z: &mut [T]) {
        let full = self.op.apply_adjoint(y);
        for (zi, &j) in z.iter_mut().zip(&self.support) {
            *zi = full[j];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::DenseOperator;
    use num_complex::Complex64;

    fn small() -> DenseOperator<f64> {
        DenseOperator::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap()
    }

    #[test]
    fn composition_checks_inner_dimension() {
        let a = small();
        assert!(Composed::new(&a, &a).is_err());
        let c = Composed::new(&a, Identity::new(2)).unwrap();
        assert_eq!(c.shape(), (3, 2));
        assert_eq!(c.apply(&[1.0, 1.0]), vec![3.0, 7.0, 11.0]);
    }

    #[test]
    fn complex_scaling_conjugates_in_adjoint() {
        let i = Complex64::new(0.0, 1.0);
        let s = Scaled::new(Identity::new(1), i);
        assert_eq!(s.apply(&[Complex64::new(1.0, 0.0)]), vec![i]);
        assert_eq!(s.apply_adjoint(&[Complex64::new(1.0, 0.0)]), vec![-i]);
    }

    #[test]
    fn row_select_scatters_on_adjoint() {
        let p = RowSelect::new(vec![3, 0], 4).unwrap();
        assert_eq!(p.apply(&[1.0f64, 2.0, 3.0, 4.0]), vec![4.0, 1.0]);
        assert_eq!(p.apply_adjoint(&[4.0f64, 1.0]), vec![1.0, 0.0, 0.0, 4.0]);
        assert_eq!(RowSelect::new(vec![1, 1], 4), Err(SpError::DuplicateSupport(1)));
        assert!(matches!(
            RowSelect::new(vec![4], 4),
            Err(SpError::SupportOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn sum_and_negation_cancel() {
        let a = small();
        let z = Sum::new(&a, Scaled::negate(&a)).unwrap();
        assert_eq!(z.apply(&[0.5, -2.0]), vec![0.0; 3]);
        assert!(Sum::new(&a, Identity::new(2)).is_err());
    }

    #[test]
    fn column_subset_picks_columns() {
        let a = small();
        let sub = ColumnSubset::new(&a, vec![1]);
        assert_eq!(sub.shape(), (3, 1));
        assert_eq!(sub.apply(&[1.0]), vec![2.0, 4.0, 6.0]);
        assert_eq!(sub.apply_adjoint(&[1.0, 0.0, 1.0]), vec![8.0]);
    }
}
