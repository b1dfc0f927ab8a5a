//! Greedy sparse-recovery algorithms.
//!
//! Each algorithm estimates a K-sparse `x` with `A x ≈ b` using only `A.times` and
//! `A.trans`. All four share the same contract:
//!
//! - `x` starts at zero and `r = b`; the residual is recomputed from scratch each round.
//! - the estimate with the smallest residual seen is returned, whether or not the
//!   stopping rules report convergence.
//! - rank-deficient restricted least squares get the minimum-norm solution.
//!
//! | algorithm | per-iteration step |
//! |-----------|--------------------|
//! | [`Iht`]     | `x ← H_K(x + μ Aᴴ r)` |
//! | [`Htp`]     | support of `H_K(x + μ Aᴴ r)`, then least squares on it |
//! | [`CoSaMP`]  | 2K new candidates from `Aᴴ r`, least squares on ≤ 3K, prune to K |
//! | [`SubspacePursuit`] | K new candidates, least squares on ≤ 2K, prune to K, re-solve |
//!
//! # References
//! - Needell & Tropp, "CoSaMP: Iterative signal recovery from incomplete and inaccurate
//!   samples", 2009.
//! - Dai & Milenkovic, "Subspace Pursuit for Compressive Sensing Signal
//!   Reconstruction", 2009.
//! - Foucart, "Hard Thresholding Pursuit: An Algorithm for Compressive Sensing", 2011.

pub mod cosamp;
pub mod htp;
pub mod iht;
pub mod sp;
mod state;
mod step;

pub use cosamp::CoSaMP;
pub use htp::Htp;
pub use iht::Iht;
pub use sp::SubspacePursuit;

use crate::config::RecoveryOptions;
use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use crate::linalg::{SvdSolver, LeastSquares};
use crate::utils::convergence::StopReason;
use std::fmt;
use std::sync::Arc;

/// Output of a recovery.
#[derive(Clone, Debug, PartialEq)]
pub struct RecoveryResult<T: Scalar> {
    /// Recovered signal (length n), the best estimate encountered.
    pub x: Vec<T>,
    /// Support of `x`, ascending.
    pub support: Vec<usize>,
    pub iterations: usize,
    /// `‖b − A x_i‖` after each iteration.
    pub residual_norms: Vec<T::Real>,
    /// `‖b − A x‖` for the returned `x`.
    pub residual_norm: T::Real,
    pub converged: bool,
    pub reason: StopReason,
}

/// Common interface for the recovery algorithms.
pub trait SparseRecovery<T: Scalar>: Send + Sync {
    /// Recover a `k`-sparse `x` from `b ≈ A x`.
    ///
    /// Fails with `ShapeMismatch` if `b.len() != A.nrows()` or `k > A.ncols()`, and with
    /// `InvalidParameter` for unusable options. Non-convergence is not an error.
    fn recover<O: LinearOperator<T> + ?Sized>(
        &self,
        op: &O,
        b: &[T],
        k: usize,
    ) -> Result<RecoveryResult<T>, SpError>;

    fn name(&self) -> &'static str;
}

/// Options and least-squares backend carried by every algorithm.
#[derive(Clone)]
pub struct PursuitConfig<T: Scalar> {
    pub options: RecoveryOptions<T::Real>,
    pub solver: Arc<dyn LeastSquares<T>>,
}

impl<T: Scalar> Default for PursuitConfig<T> {
    fn default() -> Self {
        Self {
            options: RecoveryOptions::default(),
            solver: Arc::new(SvdSolver),
        }
    }
}

impl<T: Scalar> fmt::Debug for PursuitConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PursuitConfig")
            .field("options", &self.options)
            .field("solver", &self.solver.name())
            .finish()
    }
}

macro_rules! pursuit_builders {
    ($ty:ident) => {
        impl<T: $crate::core::traits::Scalar> $ty<T> {
            /// Relative residual tolerance and iteration cap; other options keep their defaults.
            pub fn new(tol: T::Real, max_iters: usize) -> Self {
                let mut config = $crate::pursuit::PursuitConfig::default();
                config.options = config.options.with_tolerance(tol).with_max_iters(max_iters);
                Self { config }
            }

            pub fn with_options(mut self, options: $crate::config::RecoveryOptions<T::Real>) -> Self {
                self.config.options = options;
                self
            }

            pub fn with_solver(
                mut self,
                solver: std::sync::Arc<dyn $crate::linalg::LeastSquares<T>>,
            ) -> Self {
                self.config.solver = solver;
                self
            }

            pub fn options(&self) -> &$crate::config::RecoveryOptions<T::Real> {
                &self.config.options
            }
        }

        impl<T: $crate::core::traits::Scalar> Default for $ty<T> {
            fn default() -> Self {
                Self { config: $crate::pursuit::PursuitConfig::default() }
            }
        }
    };
}

pub(crate) use pursuit_builders;
