//! Gradient step `x ← H_K(x + μ · Aᴴ r)` for IHT and HTP.
//!
//! # References
//! - Blumensath & Davies, "Normalized Iterative Hard Thresholding: Guaranteed
//!   Stability and Performance", IEEE J. Sel. Topics Signal Process., 2010.

use crate::config::{RecoveryOptions, StepSize};
use crate::core::traits::{LinearOperator, RealScalar, Scalar};
use crate::core::vector::{embed, gather, norm_sqr};
use crate::operator::norm_estimate;
use crate::support::{hard_threshold, largest_indices, Thresholded};
use num_traits::{One, Zero};

/// Halvings allowed when the normalized step overshoots.
const MAX_BACKTRACK: usize = 30;
/// Shrinkage `c` in the backtracking bound `μ ≤ (1 − c) ‖Δx‖² / ‖A Δx‖²`.
const BACKTRACK_SHRINK: f64 = 0.01;

pub(crate) struct GradientStep<R> {
    rule: StepSize<R>,
    mu: R,
}

impl<R: RealScalar> GradientStep<R> {
    /// Resolve the step policy; the operator-norm rule estimates `‖A‖` once here.
    pub(crate) fn new<T, O>(op: &O, options: &RecoveryOptions<R>) -> Self
    where
        T: Scalar<Real = R>,
        O: LinearOperator<T> + ?Sized,
    {
        let mu = match options.step {
            StepSize::Fixed(mu) => mu,
            StepSize::OperatorNorm => {
                let a_norm = norm_estimate(op, options.norm_iters);
                if a_norm.is_zero() {
                    R::one()
                } else {
                    R::from_f64(0.9) / (a_norm * a_norm)
                }
            }
            StepSize::Normalized => R::one(),
        };
        log::debug!("gradient step {:?}, initial μ = {}", options.step, mu);
        Self { rule: options.step, mu }
    }

    /// One thresholded gradient step from `x` (support `support`) along `g = Aᴴ r`.
    pub(crate) fn advance<T, O>(&self, op: &O, x: &[T], support: &[usize], g: &[T], k: usize) -> Thresholded<T>
    where
        T: Scalar<Real = R>,
        O: LinearOperator<T> + ?Sized,
    {
        match self.rule {
            StepSize::Fixed(_) | StepSize::OperatorNorm => take_step(x, g, self.mu, k),
            StepSize::Normalized => normalized_step(op, x, support, g, k),
        }
    }
}

fn take_step<T: Scalar>(x: &[T], g: &[T], mu: T::Real, k: usize) -> Thresholded<T> {
    let moved: Vec<T> = x
        .iter()
        .zip(g.iter())
        .map(|(&xi, &gi)| xi + gi.scale_real(mu))
        .collect();
    hard_threshold(&moved, k)
}

fn normalized_step<T, O>(op: &O, x: &[T], support: &[usize], g: &[T], k: usize) -> Thresholded<T>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    let n = x.len();
    let s: Vec<usize> = if support.is_empty() {
        largest_indices(g, k)
    } else {
        support.to_vec()
    };
    let g_s = embed(n, &s, &gather(g, &s));
    let num = norm_sqr(&g_s);
    let den = norm_sqr(&op.apply(&g_s));
    let mut mu = if num.is_zero() || den.is_zero() {
        T::Real::one()
    } else {
        num / den
    };

    let mut next = take_step(x, g, mu, k);
    let shrink = T::Real::one() - T::Real::from_f64(BACKTRACK_SHRINK);
    let two = T::Real::from_f64(2.0);
    for _ in 0..MAX_BACKTRACK {
        if next.indices == s {
            break;
        }
        let dx: Vec<T> = next
            .to_dense()
            .iter()
            .zip(x.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        let ndx = norm_sqr(&dx);
        let nadx = norm_sqr(&op.apply(&dx));
        if nadx.is_zero() {
            break;
        }
        let omega = shrink * ndx / nadx;
        if mu <= omega {
            break;
        }
        mu = mu / two;
        next = take_step(x, g, mu, k);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Identity;

    #[test]
    fn identity_operator_normalized_step_lands_on_target() {
        // for A = I, b = x_true: one normalized step from x = 0 recovers the top-k of b
        let op = Identity::new(4);
        let b = [0.0, 3.0, 0.0, -1.0];
        let step = GradientStep::new::<f64, _>(&op, &RecoveryOptions::default());
        let th = step.advance(&op, &[0.0; 4], &[], &b, 2);
        assert_eq!(th.indices, vec![1, 3]);
        assert_eq!(th.values, vec![3.0, -1.0]);
    }

    #[test]
    fn fixed_step_scales_gradient() {
        let op = Identity::new(3);
        let opts = RecoveryOptions::<f64>::default().with_step(StepSize::Fixed(0.5));
        let step = GradientStep::new::<f64, _>(&op, &opts);
        let th = step.advance(&op, &[1.0, 0.0, 0.0], &[0], &[2.0, 4.0, 0.0], 2);
        assert_eq!(th.to_dense(), vec![2.0, 2.0, 0.0]);
    }
}
