//! sparse-pursuit: greedy sparse recovery over a linear-operator abstraction.
//!
//! Recovers a K-sparse vector `x` from measurements `b ≈ A x` with IHT, HTP, CoSaMP and
//! Subspace Pursuit. Algorithms touch `A` only through its forward and adjoint maps, so
//! dense faer matrices, FFT-based transforms and composed operators are interchangeable.

pub mod parallel;

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod operator;
pub mod pursuit;
pub mod support;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use crate::core::*;
pub use error::*;
pub use linalg::{SvdSolver, LeastSquares, NormalEquations};
pub use operator::{DenseOperator, OperatorExt};
pub use pursuit::{CoSaMP, Htp, Iht, RecoveryResult, SparseRecovery, SubspacePursuit};
pub use support::{hard_threshold, solve_on_support};
pub use utils::*;
