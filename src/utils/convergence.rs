//! Stopping rules shared by every recovery algorithm.

use bitflags::bitflags;
use num_traits::Float;

bitflags! {
    /// Why an iteration stopped. Several rules can fire on the same iteration.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StopReason: u32 {
        /// `‖r‖ ≤ tolerance · ‖b‖`
        const RESIDUAL_TOLERANCE = 0b0_0001;
        /// residual norm failed to drop by more than `stagnation · ‖r_prev‖`
        const STAGNATION         = 0b0_0010;
        /// support identical to the previous iteration (HTP)
        const SUPPORT_STABLE     = 0b0_0100;
        /// iteration budget exhausted
        const MAX_ITERATIONS     = 0b0_1000;
        /// answered without iterating (trivial input or full least squares)
        const DIRECT_SOLVE       = 0b1_0000;
        const CONVERGED = Self::RESIDUAL_TOLERANCE.bits()
            | Self::STAGNATION.bits()
            | Self::SUPPORT_STABLE.bits()
            | Self::DIRECT_SOLVE.bits();
    }
}

impl StopReason {
    /// True if any rule other than the iteration cap fired.
    pub fn is_converged(self) -> bool {
        self.intersects(StopReason::CONVERGED)
    }

    pub fn should_stop(self) -> bool {
        !self.is_empty()
    }
}

/// Stopping criteria.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<R> {
    /// Relative residual tolerance.
    pub tol: R,
    pub max_iters: usize,
    /// Smallest relative residual decrease that keeps the iteration going.
    pub stagnation: R,
}

impl<R: Float> Convergence<R> {
    /// Evaluate the stopping rules after iteration `i` (1-based).
    ///
    /// `prev_norm` is the residual norm after iteration `i − 1` (`‖b‖` for the first one).
    /// A residual that grows counts as stagnation.
    pub fn check(&self, res_norm: R, prev_norm: R, b_norm: R, i: usize) -> StopReason {
        let mut reason = StopReason::empty();
        if res_norm <= self.tol * b_norm {
            reason |= StopReason::RESIDUAL_TOLERANCE;
        }
        if prev_norm - res_norm <= self.stagnation * prev_norm {
            reason |= StopReason::STAGNATION;
        }
        if i >= self.max_iters {
            reason |= StopReason::MAX_ITERATIONS;
        }
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Convergence<f64> {
        Convergence { tol: 1e-6, max_iters: 10, stagnation: 1e-6 }
    }

    #[test]
    fn keeps_going_while_residual_drops() {
        let r = conv().check(0.5, 1.0, 1.0, 1);
        assert!(!r.should_stop());
    }

    #[test]
    fn tolerance_is_relative_to_measurement() {
        let r = conv().check(5e-7, 1.0, 1.0, 3);
        assert_eq!(r, StopReason::RESIDUAL_TOLERANCE);
        assert!(r.is_converged());
        assert!(!conv().check(5e-7, 1.0, 0.1, 3).contains(StopReason::RESIDUAL_TOLERANCE));
    }

    #[test]
    fn stagnation_and_cap_can_fire_together() {
        let r = conv().check(0.3, 0.3, 1.0, 10);
        assert!(r.contains(StopReason::STAGNATION | StopReason::MAX_ITERATIONS));
        assert!(r.is_converged());
        let capped = conv().check(0.3, 0.9, 1.0, 10);
        assert_eq!(capped, StopReason::MAX_ITERATIONS);
        assert!(!capped.is_converged());
    }

    #[test]
    fn growing_residual_stagnates() {
        let r = conv().check(18.0, 6.0, 2.0, 2);
        assert_eq!(r, StopReason::STAGNATION);
        assert!(r.is_converged());
        // a strict decrease below the threshold also stops
        assert!(conv().check(1.0 - 1e-9, 1.0, 1.0, 2).contains(StopReason::STAGNATION));
        let zero = Convergence { stagnation: 0.0, ..conv() };
        assert!(zero.check(1.0, 1.0, 1.0, 2).contains(StopReason::STAGNATION));
        assert!(!zero.check(0.999, 1.0, 1.0, 2).should_stop());
    }
}
