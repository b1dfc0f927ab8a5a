//! Iterative Hard Thresholding: `x ← H_K(x + μ · Aᴴ (b − A x))`.
//!
//! No least-squares step; the quality of the iteration depends on `μ`. The default
//! normalized step adapts `μ` to the current support and backtracks when the support
//! changes, which makes IHT stable without knowing `‖A‖`.

use super::state::{start, Start};
use super::step::GradientStep;
use super::{pursuit_builders, PursuitConfig, RecoveryResult, SparseRecovery};
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{norm, residual};
use crate::error::SpError;
use crate::utils::convergence::StopReason;

/// Iterative Hard Thresholding.
#[derive(Clone, Debug)]
pub struct Iht<T: Scalar> {
    pub config: PursuitConfig<T>,
}

pursuit_builders!(Iht);

impl<T: Scalar> SparseRecovery<T> for Iht<T> {
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

        let mut x = vec![T::zero(); op.ncols()];
        let mut support: Vec<usize> = Vec::new();
        let mut r = b.to_vec();
        let mut reason = StopReason::empty();
        for i in 1..=state.max_iters() {
            let g = op.apply_adjoint(&r);
            let next = step.advance(op, &x, &support, &g, k);
            x = next.to_dense();
            support = next.indices;
            r = residual(op, b, &x);
            reason = state.record(i, &x, &support, norm(&r));
            if reason.should_stop() {
                break;
            }
        }
        Ok(state.finish(reason))
    }

    fn name(&self) -> &'static str {
        "iht"
    }
}
