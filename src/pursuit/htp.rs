//! Hard Thresholding Pursuit.
//!
//! Takes the support of an IHT step, then replaces the coefficients with the exact
//! least-squares fit on that support. Besides the shared stopping rules, HTP stops as
//! soon as the support repeats: the next iterate would be identical.

use super::state::{start, Start};
use super::step::GradientStep;
use super::{pursuit_builders, PursuitConfig, RecoveryResult, SparseRecovery};
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{embed, norm, residual};
use crate::error::SpError;
use crate::support::solve_on_support;
use crate::utils::convergence::StopReason;

/// Hard Thresholding Pursuit.
#[derive(Clone, Debug)]
pub struct Htp<T: Scalar> {
    pub config: PursuitConfig<T>,
}

pursuit_builders!(Htp);

impl<T: Scalar> SparseRecovery<T> for Htp<T> {
    fn recover<O: LinearOperator<T> + ?Sized>(
        &self,
        op: &O,
        b: &[T],
        k: usize,
    ) -> Result<RecoveryResult<T>, SpError> {
        let mut state = match start(self.name(), &self.config, op, b, k)? {
            Start::Done(result) => return Ok(result),
            Start::Iterate(state) => state,
        };
        let step = GradientStep::new::<T, O>(op, &self.config.options);
        let n = op.ncols();

        let mut x = vec![T::zero(); n];
        let mut support: Vec<usize> = Vec::new();
        let mut r = b.to_vec();
        let mut reason = StopReason::empty();
        for i in 1..=state.max_iters() {
            let g = op.apply_adjoint(&r);
            let candidate = step.advance(op, &x, &support, &g, k).indices;
            let stable = i > 1 && candidate.as_slice() == state.previous_support();
            let z = solve_on_support(op, b, &candidate, self.config.solver.as_ref())?;
            x = embed(n, &candidate, &z);
            support = candidate;
            r = residual(op, b, &x);
            reason = state.record(i, &x, &support, norm(&r));
            if stable {
                reason |= StopReason::SUPPORT_STABLE;
            }
            if reason.should_stop() {
                break;
            }
        }
        Ok(state.finish(reason))
    }

    fn name(&self) -> &'static str {
        "htp"
    }
}
