//! Linear operators: dense matrices, structured transforms, and the algebra to combine them.
//!
//! Every type here implements [`LinearOperator`], so recovery algorithms accept any of
//! them interchangeably. [`OperatorExt`] adds the combinators as methods:
//!
//! ```rust,ignore
//! use sparse_pursuit::operator::{Dct, OperatorExt, RowSelect};
//! let partial_dct = RowSelect::new(rows, 64)?.compose(Dct::new(64))?;
//! ```

pub mod compose;
pub mod dense;
pub mod diagnostics;
pub mod fast;

pub use compose::{Adjoint, ColumnSubset, Composed, Diagonal, Identity, RowSelect, Scaled, Sum};
pub use dense::DenseOperator;
pub use diagnostics::{dot_test, norm_estimate, to_adjoint_matrix, to_matrix, DotTest};
pub use fast::{CircularConvolution, Dct, Fourier, WalshHadamard};

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;

/// Combinator methods available on every operator.
pub trait OperatorExt<T: Scalar>: LinearOperator<T> + Sized {
    /// `self · inner`
    fn compose<B: LinearOperator<T>>(self, inner: B) -> Result<Composed<Self, B>, SpError> {
        Composed::new(self, inner)
    }

    /// `alpha · self`
    fn scale(self, alpha: T) -> Scaled<Self, T> {
        Scaled::new(self, alpha)
    }

    /// `−self`
    fn negate(self) -> Scaled<Self, T> {
        Scaled::negate(self)
    }

    /// `selfᴴ`
    fn adjoint(self) -> Adjoint<Self> {
        Adjoint::new(self)
    }

    /// `self + other`
    fn plus<B: LinearOperator<T>>(self, other: B) -> Result<Sum<Self, B>, SpError> {
        Sum::new(self, other)
    }
}

impl<T: Scalar, O: LinearOperator<T>> OperatorExt<T> for O {}
