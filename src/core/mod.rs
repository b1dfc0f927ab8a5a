//! Core abstractions: scalars, the linear-operator contract and vector primitives.

pub mod traits;
pub mod vector;
pub mod wrappers;

pub use traits::{LinearOperator, RealScalar, Scalar};
