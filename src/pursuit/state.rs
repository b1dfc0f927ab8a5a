//! Per-call iteration bookkeeping shared by the pursuit algorithms.

use super::{PursuitConfig, RecoveryResult};
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{norm, residual};
use crate::error::SpError;
use crate::support::solve_on_support;
use crate::utils::convergence::{Convergence, StopReason};
use num_traits::Zero;

/// Outcome of the entry checks: either the answer is already known or iteration starts.
pub(crate) enum Start<T: Scalar> {
    Done(RecoveryResult<T>),
    Iterate(IterationState<T>),
}

/// Validate inputs and settle the cases that need no iteration.
///
/// - `b = 0`: the zero vector, converged.
/// - `k = 0`: the zero vector, converged only if `‖b‖ ≤ tolerance`.
/// - `k = n`: plain least squares over every column.
pub(crate) fn start<T, O>(
    name: &'static str,
    config: &PursuitConfig<T>,
    op: &O,
    b: &[T],
    k: usize,
) -> Result<Start<T>, SpError>
where
    T: Scalar,
    O: LinearOperator<T> + ?Sized,
{
    config.options.validate()?;
    let (m, n) = op.shape();
    if b.len() != m {
        return Err(SpError::shape(format!(
            "measurement has {} entries, operator has {} rows",
            b.len(),
            m
        )));
    }
    if k > n {
        return Err(SpError::shape(format!(
            "sparsity {} exceeds the signal length {}",
            k, n
        )));
    }
    if let Some(i) = b.iter().position(|v| !v.finite()) {
        return Err(SpError::param(format!("measurement entry {} is not finite", i)));
    }

    let b_norm = norm(b);
    let zero = vec![T::zero(); n];
    if b_norm.is_zero() {
        log::debug!("{}: zero measurement, returning zero vector", name);
        return Ok(Start::Done(RecoveryResult::direct(zero, Vec::new(), b_norm, true)));
    }
    if k == 0 {
        let converged = b_norm <= config.options.tolerance;
        log::debug!("{}: sparsity 0, ‖b‖ = {}", name, b_norm);
        return Ok(Start::Done(RecoveryResult::direct(zero, Vec::new(), b_norm, converged)));
    }
    if k == n {
        log::debug!("{}: sparsity equals signal length, solving full least squares", name);
        let support: Vec<usize> = (0..n).collect();
        let x = solve_on_support(op, b, &support, config.solver.as_ref())?;
        let res_norm = norm(&residual(op, b, &x));
        let mut result = RecoveryResult::direct(x, support, res_norm, true);
        result.iterations = 1;
        result.residual_norms = vec![res_norm];
        return Ok(Start::Done(result));
    }

    Ok(Start::Iterate(IterationState::new(
        name,
        config.options.convergence(),
        b_norm,
        n,
    )))
}

/// Residual history plus the best estimate seen so far.
pub(crate) struct IterationState<T: Scalar> {
    name: &'static str,
    conv: Convergence<T::Real>,
    b_norm: T::Real,
    prev_norm: T::Real,
    prev_support: Vec<usize>,
    residual_norms: Vec<T::Real>,
    best_x: Vec<T>,
    best_support: Vec<usize>,
    best_norm: T::Real,
}

impl<T: Scalar> IterationState<T> {
    fn new(name: &'static str, conv: Convergence<T::Real>, b_norm: T::Real, n: usize) -> Self {
        Self {
            name,
            conv,
            b_norm,
            prev_norm: b_norm,
            prev_support: Vec::new(),
            residual_norms: Vec::with_capacity(conv.max_iters.min(1024)),
            best_x: vec![T::zero(); n],
            best_support: Vec::new(),
            best_norm: b_norm,
        }
    }

    pub(crate) fn max_iters(&self) -> usize {
        self.conv.max_iters
    }

    /// Support accepted on the previous iteration (empty before the first).
    pub(crate) fn previous_support(&self) -> &[usize] {
        &self.prev_support
    }

    /// Record iteration `i` and return the stopping rules that fired.
    pub(crate) fn record(&mut self, i: usize, x: &[T], support: &[usize], res_norm: T::Real) -> StopReason {
        log::debug!("{} iter {}: ‖r‖ = {} (|S| = {})", self.name, i, res_norm, support.len());
        if support != self.prev_support.as_slice() {
            log::trace!("{} iter {}: support {:?}", self.name, i, support);
        }
        self.residual_norms.push(res_norm);
        if res_norm < self.best_norm {
            self.best_norm = res_norm;
            self.best_x.clear();
            self.best_x.extend_from_slice(x);
            self.best_support.clear();
            self.best_support.extend_from_slice(support);
        }
        let reason = self.conv.check(res_norm, self.prev_norm, self.b_norm, i);
        self.prev_norm = res_norm;
        self.prev_support.clear();
        self.prev_support.extend_from_slice(support);
        reason
    }

    pub(crate) fn finish(self, reason: StopReason) -> RecoveryResult<T> {
        let converged = reason.is_converged();
        let iterations = self.residual_norms.len();
        if converged {
            log::debug!(
                "{} converged after {} iterations ({:?}), ‖r‖ = {}",
                self.name,
                iterations,
                reason,
                self.best_norm
            );
        } else {
            log::warn!(
                "{} reached max_iters = {} without converging, best ‖r‖ = {}",
                self.name,
                self.conv.max_iters,
                self.best_norm
            );
        }
        RecoveryResult {
            x: self.best_x,
            support: self.best_support,
            iterations,
            residual_norms: self.residual_norms,
            residual_norm: self.best_norm,
            converged,
            reason,
        }
    }
}

impl<T: Scalar> RecoveryResult<T> {
    fn direct(x: Vec<T>, support: Vec<usize>, residual_norm: T::Real, converged: bool) -> Self {
        Self {
            x,
            support,
            iterations: 0,
            residual_norms: Vec::new(),
            residual_norm,
            converged,
            reason: if converged { StopReason::DIRECT_SOLVE } else { StopReason::empty() },
        }
    }
}
