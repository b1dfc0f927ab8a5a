//! Operator diagnostics: adjoint dot test, materialization, spectral-norm estimate.
//!
//! None of these run inside a recovery loop except [`norm_estimate`], which the
//! operator-norm step size calls once per `recover`.

use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{dot, norm, scale};
use faer::Mat;
use num_traits::{Float, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NORM_ESTIMATE_SEED: u64 = 0x5eed_0f_a11;

/// Outcome of a [`dot_test`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotTest<T: Scalar> {
    /// `<A u, v>`
    pub forward: T,
    /// `<u, Aᴴ v>`
    pub adjoint: T,
    /// `|forward − adjoint|` relative to `max(‖A u‖‖v‖, ‖u‖‖Aᴴ v‖)`.
    pub error: T::Real,
    pub passed: bool,
}

/// Check `<A u, v> = <u, Aᴴ v>` for standard-normal random `u` and `v`.
///
/// Passes when the relative mismatch is at most `tol`. A failing test means `trans` is
/// not the adjoint of `times`, which breaks every recovery algorithm.
pub fn dot_test<T, O, R>(op: &O, rng: &mut R, tol: T::Real) -> DotTest<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
    R: Rng + ?Sized,
{
    let (m, n) = op.shape();
    let u: Vec<T> = (0..n).map(|_| T::sample_normal(rng)).collect();
    let v: Vec<T> = (0..m).map(|_| T::sample_normal(rng)).collect();
    let au = op.apply(&u);
    let ahv = op.apply_adjoint(&v);

    let forward = dot(&v, &au).conj();
    let adjoint = dot(&u, &ahv);
    let scale_ref = (norm(&au) * norm(&v)).max(norm(&u) * norm(&ahv));
    let diff = (forward - adjoint).modulus();
    let error = if scale_ref > T::Real::zero() { diff / scale_ref } else { diff };
    DotTest {
        forward,
        adjoint,
        error,
        passed: error <= tol,
    }
}

/// Dense matrix of `A`, built column by column from `times` on unit vectors.
pub fn to_matrix<T, O>(op: &O) -> Mat<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let (m, n) = op.shape();
    let mut cols = Vec::with_capacity(n);
    let mut e = vec![T::zero(); n];
    for j in 0..n {
        e[j] = T::one();
        cols.push(op.apply(&e));
        e[j] = T::zero();
    }
    Mat::from_fn(m, n, |i, j| cols[j][i])
}

/// Dense matrix of `Aᴴ`, built from `trans` on unit vectors.
///
/// Comparing it with the conjugate transpose of [`to_matrix`] is a deterministic
/// alternative to the randomized dot test.
pub fn to_adjoint_matrix<T, O>(op: &O) -> Mat<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let (m, n) = op.shape();
    let mut cols = Vec::with_capacity(m);
    let mut e = vec![T::zero(); m];
    for i in 0..m {
        e[i] = T::one();
        cols.push(op.apply_adjoint(&e));
        e[i] = T::zero();
    }
    Mat::from_fn(n, m, |i, j| cols[j][i])
}

/// Estimate `‖A‖₂` by power iteration on `AᴴA`.
///
/// The start vector comes from a fixed-seed generator so the estimate is reproducible.
/// Returns zero for the zero operator.
pub fn norm_estimate<T, O>(op: &O, iters: usize) -> T::Real
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let n = op.ncols();
    if n == 0 || op.nrows() == 0 {
        return T::Real::zero();
    }
    let mut rng = StdRng::seed_from_u64(NORM_ESTIMATE_SEED);
    let mut v: Vec<T> = (0..n).map(|_| T::sample_normal(&mut rng)).collect();
    let nv = norm(&v);
    scale(T::from_real(nv.recip()), &mut v);

    let mut sigma_sqr = T::Real::zero();
    for _ in 0..iters.max(1) {
        let w = op.apply_adjoint(&op.apply(&v));
        let lambda = norm(&w);
        if lambda.is_zero() || !lambda.is_finite() {
            return T::Real::zero();
        }
        sigma_sqr = lambda;
        v = w;
        scale(T::from_real(lambda.recip()), &mut v);
    }
    sigma_sqr.sqrt()
}
