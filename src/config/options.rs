//! Options for the recovery algorithms.
//!
//! [`RecoveryOptions`] carries the stopping rules and the gradient step used by IHT and
//! HTP. Build it with `Default` and the `with_*` methods:
//!
//! ```rust,ignore
//! let opts = RecoveryOptions::default().with_max_iters(200).with_tolerance(1e-8);
//! ```

use crate::error::SpError;
use crate::utils::convergence::Convergence;
use num_traits::Float;
use std::fmt::Display;

/// Gradient step `μ` in `x + μ · Aᴴ r` (IHT and HTP).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSize<R> {
    /// Constant `μ`; must be positive.
    Fixed(R),
    /// `μ = 0.9 / ‖A‖²` with `‖A‖` from a power-iteration estimate.
    OperatorNorm,
    /// `μ = ‖g_S‖² / ‖A g_S‖²` on the current support, with backtracking when the
    /// support changes (normalized IHT).
    Normalized,
}

impl<R> Default for StepSize<R> {
    fn default() -> Self {
        StepSize::Normalized
    }
}

/// Stopping rules and step-size policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecoveryOptions<R> {
    /// Iteration cap; must be at least 1.
    pub max_iters: usize,
    /// Stop when `‖r‖ ≤ tolerance · ‖b‖`.
    pub tolerance: R,
    /// Stop when `|‖r_prev‖ − ‖r‖| ≤ stagnation · ‖r_prev‖`.
    pub stagnation: R,
    pub step: StepSize<R>,
    /// Power iterations for [`StepSize::OperatorNorm`].
    pub norm_iters: usize,
}

impl<R: Float> Default for RecoveryOptions<R> {
    fn default() -> Self {
        let eps = <R as num_traits::NumCast>::from(1e-6).unwrap_or_else(R::epsilon);
        Self {
            max_iters: 100,
            tolerance: eps,
            stagnation: eps,
            step: StepSize::Normalized,
            norm_iters: 50,
        }
    }
}

impl<R: Float + Display> RecoveryOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_tolerance(mut self, tolerance: R) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_stagnation(mut self, stagnation: R) -> Self {
        self.stagnation = stagnation;
        self
    }

    pub fn with_step(mut self, step: StepSize<R>) -> Self {
        self.step = step;
        self
    }

    pub fn with_norm_iters(mut self, norm_iters: usize) -> Self {
        self.norm_iters = norm_iters;
        self
    }

    /// Reject options no algorithm can run with.
    pub fn validate(&self) -> Result<(), SpError> {
        if self.max_iters == 0 {
            return Err(SpError::param("max_iters must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < R::zero() {
            return Err(SpError::param(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if self.stagnation.is_nan() || self.stagnation < R::zero() {
            return Err(SpError::param(format!(
                "stagnation must be non-negative, got {}",
                self.stagnation
            )));
        }
        if let StepSize::Fixed(mu) = self.step {
            if !(mu > R::zero()) || !mu.is_finite() {
                return Err(SpError::param(format!("fixed step must be positive, got {}", mu)));
            }
        }
        Ok(())
    }

    pub fn convergence(&self) -> Convergence<R> {
        Convergence {
            tol: self.tolerance,
            max_iters: self.max_iters,
            stagnation: self.stagnation,
        }
    }
}
