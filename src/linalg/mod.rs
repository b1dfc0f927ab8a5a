//! Dense linear algebra backing the support-restricted solve.

pub mod lstsq;

pub use lstsq::{min_norm_lstsq, LeastSquares, NormalEquations, SvdSolver};
