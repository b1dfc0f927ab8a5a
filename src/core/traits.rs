//! Core traits for sparse-pursuit: the scalar field and the linear-operator contract.

use faer::MatRef;
use num_complex::Complex;
use num_traits::{Float, One, Zero};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Field of scalars a vector or operator is defined over (real or complex).
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Underlying real type (`Self` for real scalars).
    type Real: RealScalar;

    /// True for complex scalars.
    const IS_COMPLEX: bool;

    /// Complex conjugate (identity on reals).
    fn conj(self) -> Self;
    /// |z|
    fn modulus(self) -> Self::Real;
    /// |z|²
    fn modulus_sqr(self) -> Self::Real;
    fn from_real(re: Self::Real) -> Self;
    fn real(self) -> Self::Real;
    fn from_f64(v: f64) -> Self;
    /// Draw from the standard normal distribution (unit variance; complex
    /// draws split the variance evenly between real and imaginary parts).
    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Multiply by a real factor.
    fn scale_real(self, r: Self::Real) -> Self {
        self * Self::from_real(r)
    }

    /// True if no component is NaN or infinite.
    fn finite(self) -> bool;

    /// Minimum-norm least-squares solution of `a · z ≈ b` (faer thin SVD).
    fn solve_min_norm(a: MatRef<'_, Self>, b: &[Self]) -> Vec<Self>;
}

/// A real scalar: its own real part, with the full `Float` toolbox.
pub trait RealScalar: Scalar<Real = Self> + Float + Display {}

impl<R: Scalar<Real = R> + Float + Display> RealScalar for R {}

macro_rules! impl_real_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            type Real = $t;
            const IS_COMPLEX: bool = false;

            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn modulus(self) -> Self {
                self.abs()
            }
            #[inline]
            fn modulus_sqr(self) -> Self {
                self * self
            }
            #[inline]
            fn from_real(re: Self) -> Self {
                re
            }
            #[inline]
            fn real(self) -> Self {
                self
            }
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
                StandardNormal.sample(rng)
            }
            #[inline]
            fn finite(self) -> bool {
                self.is_finite()
            }
            fn solve_min_norm(a: MatRef<'_, Self>, b: &[Self]) -> Vec<Self> {
                crate::linalg::min_norm_lstsq(a, b)
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty) => {
        impl Scalar for Complex<$t> {
            type Real = $t;
            const IS_COMPLEX: bool = true;

            #[inline]
            fn conj(self) -> Self {
                Complex::new(self.re, -self.im)
            }
            #[inline]
            fn modulus(self) -> $t {
                self.re.hypot(self.im)
            }
            #[inline]
            fn modulus_sqr(self) -> $t {
                self.re * self.re + self.im * self.im
            }
            #[inline]
            fn from_real(re: $t) -> Self {
                Complex::new(re, 0.0)
            }
            #[inline]
            fn real(self) -> $t {
                self.re
            }
            #[inline]
            fn from_f64(v: f64) -> Self {
                Complex::new(v as $t, 0.0)
            }
            fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let s = std::f64::consts::FRAC_1_SQRT_2 as $t;
                let re: $t = StandardNormal.sample(rng);
                let im: $t = StandardNormal.sample(rng);
                Complex::new(re * s, im * s)
            }
            #[inline]
            fn finite(self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
            fn solve_min_norm(a: MatRef<'_, Self>, b: &[Self]) -> Vec<Self> {
                crate::linalg::min_norm_lstsq(a, b)
            }
        }
    };
}

impl_real_scalar!(f32);
impl_real_scalar!(f64);
impl_complex_scalar!(f32);
impl_complex_scalar!(f64);

/// A linear map `A: Tⁿ → Tᵐ` together with its adjoint.
///
/// `trans` must be the exact adjoint of `times` with respect to the standard
/// inner product `<u, v> = Σ conj(uᵢ) vᵢ`. Recovery algorithms only ever touch
/// an operator through these two maps, so structured operators (FFT-based,
/// Hadamard, convolutions) are drop-in replacements for dense matrices.
pub trait LinearOperator<T: Scalar>: Send + Sync {
    /// `(m, n)`: number of outputs, number of inputs.
    fn shape(&self) -> (usize, usize);

    /// Forward map: `y = A · x`. `x.len() == n`, `y.len() == m`.
    fn times(&self, x: &[T], y: &mut [T]);

    /// Adjoint map: `x = Aᴴ · y`. `y.len() == m`, `x.len() == n`.
    fn trans(&self, y: &[T], x: &mut [T]);

    fn nrows(&self) -> usize {
        self.shape().0
    }

    fn ncols(&self) -> usize {
        self.shape().1
    }

    fn is_complex(&self) -> bool {
        T::IS_COMPLEX
    }

    fn is_real(&self) -> bool {
        !self.is_complex()
    }

    /// Allocating forward map.
    fn apply(&self, x: &[T]) -> Vec<T> {
        let mut y = vec![T::zero(); self.nrows()];
        self.times(x, &mut y);
        y
    }

    /// Allocating adjoint map.
    fn apply_adjoint(&self, y: &[T]) -> Vec<T> {
        let mut x = vec![T::zero(); self.ncols()];
        self.trans(y, &mut x);
        x
    }
}
