//! Subspace Pursuit (Dai & Milenkovic).
//!
//! Like CoSaMP but with `K` new candidates per round (so at most `2K` columns in the
//! merged least-squares problem), and a second least-squares solve on the pruned
//! support so the kept coefficients are optimal for that support. The second solve is
//! the classical Dai–Milenkovic form and is kept on purpose, unlike CoSaMP.

use super::state::{start, Start};
use super::{pursuit_builders, PursuitConfig, RecoveryResult, SparseRecovery};
use crate::core::traits::{LinearOperator, Scalar};
use crate::core::vector::{embed, norm, residual};
use crate::error::SpError;
use crate::support::{largest_indices, largest_indices_excluding, merge_supports, solve_on_support};
use crate::utils::convergence::StopReason;

/// Subspace Pursuit.
#[derive(Clone, Debug)]
pub struct SubspacePursuit<T: Scalar> {
    pub config: PursuitConfig<T>,
}

pursuit_builders!(SubspacePursuit);

impl<T: Scalar> SparseRecovery<T> for SubspacePursuit<T> {
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
            let fresh = largest_indices_excluding(&proxy, k.min(n - support.len()), &support);
            let merged = merge_supports(&support, &fresh);
            let z = solve_on_support(op, b, &merged, solver)?;

            let keep = largest_indices(&z, k);
            let z = if keep.len() == merged.len() {
                support = merged;
                z
            } else {
                support = keep.iter().map(|&p| merged[p]).collect();
                solve_on_support(op, b, &support, solver)?
            };
            let x = embed(n, &support, &z);
            r = residual(op, b, &x);
            reason = state.record(i, &x, &support, norm(&r));
            if reason.should_stop() {
                break;
            }
        }
        Ok(state.finish(reason))
    }

    fn name(&self) -> &'static str {
        "subspace-pursuit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::DenseOperator;
    use num_complex::Complex64;

    #[test]
    fn complex_signal_on_orthogonal_columns() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let a = DenseOperator::from_fn(4, 4, |i, j| if i == j { one } else { zero });
        let x_true = vec![zero, Complex64::new(0.5, -2.0), zero, Complex64::new(0.0, 1.0)];
        let b = a.apply(&x_true);
        let res = SubspacePursuit::new(1e-12, 10).recover(&a, &b, 2).unwrap();
        assert!(res.converged);
        assert_eq!(res.support, vec![1, 3]);
        for (xi, ti) in res.x.iter().zip(x_true.iter()) {
            assert!((xi - ti).norm() < 1e-12);
        }
    }

    #[test]
    fn pruned_support_is_solved_again() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let a = DenseOperator::from_rows(&[vec![1.0, 0.0, h], vec![0.0, 1.0, h]]).unwrap();
        let b = [1.0, 0.5];
        let res = SubspacePursuit::new(1e-12, 10).recover(&a, &b, 1).unwrap();
        // round 2 merges {0, 2}, prunes back to {2} and re-solves, so the residual repeats
        assert_eq!(res.support, vec![2]);
        assert_eq!(res.iterations, 2);
        assert_eq!(res.reason, StopReason::STAGNATION);
        assert_eq!(res.residual_norms[0], res.residual_norms[1]);
        let r = residual(&a, &b, &res.x);
        assert!(a.apply_adjoint(&r)[2].abs() < 1e-12);
    }
}
