//! Compressive Sampling Matching Pursuit (Needell & Tropp).
//!
//! Each round identifies up to `2K` new columns from the proxy `Aᴴ r`, solves least
//! squares on their union with the current support (at most `3K` columns), and prunes
//! the solution back to its `K` largest entries.

use super::state::{start, Start};
use super::{pursuit_builders, PursuitConfig, RecoveryResult, SparseRecovery};
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{embed, gather, norm, residual};
use crate::error::SpError;
use crate::support::{largest_indices, largest_indices_excluding, merge_supports, solve_on_support};
use crate::utils::convergence::StopReason;

/// CoSaMP.
#[derive(Clone, Debug)]
pub struct CoSaMP<T: Scalar> {
    pub config: PursuitConfig<T>,
}

pursuit_builders!(CoSaMP);

impl<T: Scalar> SparseRecovery<T> for CoSaMP<T> {
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
        let n = op.ncols();
        let solver = self.config.solver.as_ref();

        let mut support: Vec<usize> = Vec::new();
        let mut r = b.to_vec();
        let mut reason = StopReason::empty();
        for i in 1..=state.max_iters() {
            let proxy = op.apply_adjoint(&r);
            let fresh = largest_indices_excluding(&proxy, (2 * k).min(n - support.len()), &support);
            let merged = merge_supports(&support, &fresh);
            let z = solve_on_support(op, b, &merged, solver)?;

            let keep = largest_indices(&z, k);
            support = keep.iter().map(|&p| merged[p]).collect();
            let x = embed(n, &support, &gather(&z, &keep));
            r = residual(op, b, &x);
            reason = state.record(i, &x, &support, norm(&r));
            if reason.should_stop() {
                break;
            }
        }
        Ok(state.finish(reason))
    }

    fn name(&self) -> &'static str {
        "cosamp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::DenseOperator;

    #[test]
    fn recovers_two_sparse_signal_from_small_system() {
        // identity plus two dense unit columns; the signal lives on identity columns 1 and 4
        let s = 1.0 / 8f64.sqrt();
        let a = DenseOperator::from_fn(8, 10, |i, j| match j {
            8 => s,
            9 if i % 2 == 0 => s,
            9 => -s,
            _ if i == j => 1.0,
            _ => 0.0,
        });
        let x_true = [0.0, 1.5, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = a.apply(&x_true);
        let res = CoSaMP::new(1e-10, 20).recover(&a, &b, 2).unwrap();
        assert!(res.converged);
        assert_eq!(res.support, vec![1, 4]);
        for (xi, ti) in res.x.iter().zip(x_true.iter()) {
            assert!((xi - ti).abs() < 1e-8, "{:?}", res.x);
        }
    }
}
