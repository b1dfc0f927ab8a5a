//! Factory and context for the recovery algorithms.
//!
//! [`RecoveryContext`] bundles an operator, an algorithm kind, options and a
//! least-squares backend, and dispatches `recover` to the chosen algorithm. The kind
//! can be parsed from a string so callers can wire the algorithm from text settings.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ctx = RecoveryContext::new("cosamp".parse()?, a).with_options(opts);
//! let result = ctx.recover(&b, 3)?;
//! let many = ctx.recover_batch(&measurements, 3);
//! ```

use crate::config::RecoveryOptions;
use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use crate::linalg::{SvdSolver, LeastSquares};
use crate::pursuit::{CoSaMP, Htp, Iht, PursuitConfig, RecoveryResult, SparseRecovery, SubspacePursuit};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Available recovery algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Iterative Hard Thresholding
    Iht,
    /// Hard Thresholding Pursuit
    Htp,
    /// Compressive Sampling Matching Pursuit
    CoSaMP,
    /// Subspace Pursuit
    SubspacePursuit,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Iht,
        Algorithm::Htp,
        Algorithm::CoSaMP,
        Algorithm::SubspacePursuit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Iht => "iht",
            Algorithm::Htp => "htp",
            Algorithm::CoSaMP => "cosamp",
            Algorithm::SubspacePursuit => "sp",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iht" => Ok(Algorithm::Iht),
            "htp" => Ok(Algorithm::Htp),
            "cosamp" => Ok(Algorithm::CoSaMP),
            "sp" | "subspace-pursuit" | "subspace_pursuit" => Ok(Algorithm::SubspacePursuit),
            other => Err(SpError::param(format!("unknown recovery algorithm '{}'", other))),
        }
    }
}

/// A configured algorithm of any kind.
#[derive(Clone, Debug)]
pub enum Recovery<T: Scalar> {
    Iht(Iht<T>),
    Htp(Htp<T>),
    CoSaMP(CoSaMP<T>),
    SubspacePursuit(SubspacePursuit<T>),
}

impl<T: Scalar> Recovery<T> {
    pub fn new(kind: Algorithm, config: PursuitConfig<T>) -> Self {
        match kind {
            Algorithm::Iht => Recovery::Iht(Iht { config }),
            Algorithm::Htp => Recovery::Htp(Htp { config }),
            Algorithm::CoSaMP => Recovery::CoSaMP(CoSaMP { config }),
            Algorithm::SubspacePursuit => Recovery::SubspacePursuit(SubspacePursuit { config }),
        }
    }

    pub fn kind(&self) -> Algorithm {
        match self {
            Recovery::Iht(_) => Algorithm::Iht,
            Recovery::Htp(_) => Algorithm::Htp,
            Recovery::CoSaMP(_) => Algorithm::CoSaMP,
            Recovery::SubspacePursuit(_) => Algorithm::SubspacePursuit,
        }
    }
}

impl<T: Scalar> SparseRecovery<T> for Recovery<T> {
    fn recover<O: LinearOperator<T> + ?Sized>(
        &self,
        op: &O,
        b: &[T],
        k: usize,
    ) -> Result<RecoveryResult<T>, SpError> {
        match self {
            Recovery::Iht(alg) => alg.recover(op, b, k),
            Recovery::Htp(alg) => alg.recover(op, b, k),
            Recovery::CoSaMP(alg) => alg.recover(op, b, k),
            Recovery::SubspacePursuit(alg) => alg.recover(op, b, k),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Recovery::Iht(alg) => alg.name(),
            Recovery::Htp(alg) => alg.name(),
            Recovery::CoSaMP(alg) => alg.name(),
            Recovery::SubspacePursuit(alg) => alg.name(),
        }
    }
}

/// Operator plus algorithm configuration.
pub struct RecoveryContext<T: Scalar, O> {
    /// Algorithm to run
    pub kind: Algorithm,
    /// Sensing operator, shared read-only by every recovery
    pub op: O,
    pub options: RecoveryOptions<T::Real>,
    /// Least-squares backend for the restricted solves
    pub solver: Arc<dyn LeastSquares<T>>,
}

impl<T: Scalar, O: LinearOperator<T>> RecoveryContext<T, O> {
    pub fn new(kind: Algorithm, op: O) -> Self {
        Self {
            kind,
            op,
            options: RecoveryOptions::default(),
            solver: Arc::new(SvdSolver),
        }
    }

    pub fn with_options(mut self, options: RecoveryOptions<T::Real>) -> Self {
        self.options = options;
        self
    }

    pub fn with_solver(mut self, solver: Arc<dyn LeastSquares<T>>) -> Self {
        self.solver = solver;
        self
    }

    /// The configured algorithm as a standalone value.
    pub fn algorithm(&self) -> Recovery<T> {
        Recovery::new(
            self.kind,
            PursuitConfig {
                options: self.options,
                solver: Arc::clone(&self.solver),
            },
        )
    }

    /// Recover a `k`-sparse signal from `b`.
    pub fn recover(&self, b: &[T], k: usize) -> Result<RecoveryResult<T>, SpError> {
        self.algorithm().recover(&self.op, b, k)
    }

    /// Recover one signal per measurement vector; results keep the input order.
    pub fn recover_batch(&self, measurements: &[Vec<T>], k: usize) -> Vec<Result<RecoveryResult<T>, SpError>> {
        crate::parallel::recover_batch(&self.algorithm(), &self.op, measurements, k)
    }
}

impl<T: Scalar, O: LinearOperator<T>> fmt::Debug for RecoveryContext<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryContext")
            .field("kind", &self.kind)
            .field("shape", &self.op.shape())
            .field("options", &self.options)
            .field("solver", &self.solver.name())
            .finish()
    }
}
