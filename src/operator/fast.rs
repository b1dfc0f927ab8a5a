//! Matrix-free structured operators.
//!
//! Every transform here is orthonormal (or unitary), so its adjoint is also its inverse.
//! Combined with [`RowSelect`](super::RowSelect) they give the partial-transform
//! sensing operators common in compressed sensing.

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Orthonormal Walsh–Hadamard transform (Sylvester ordering), `n` a power of two.
///
/// The matrix is real and symmetric, so `trans` runs the same butterfly as `times`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalshHadamard {
    n: usize,
}

impl WalshHadamard {
    pub fn new(n: usize) -> Result<Self, SpError> {
        if n == 0 || !n.is_power_of_two() {
            return Err(SpError::param(format!(
                "Walsh-Hadamard size must be a power of two, got {}",
                n
            )));
        }
        Ok(Self { n })
    }

    fn butterfly<T: Scalar>(&self, data: &mut [T]) {
        let mut h = 1;
        while h < self.n {
            for start in (0..self.n).step_by(2 * h) {
                for i in start..start + h {
                    let a = data[i];
                    let b = data[i + h];
                    data[i] = a + b;
                    data[i + h] = a - b;
                }
            }
            h *= 2;
        }
        let s = T::from_f64(1.0 / (self.n as f64).sqrt());
        for v in data.iter_mut() {
            *v *= s;
        }
    }
}

impl<T: Scalar> LinearOperator<T> for WalshHadamard {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        y.copy_from_slice(x);
        self.butterfly(y);
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        x.copy_from_slice(y);
        self.butterfly(x);
    }
}

/// Orthonormal DCT-II; the adjoint is the orthonormal DCT-III.
///
/// `y_k = c_k Σ_j x_j cos(π (2j + 1) k / 2n)` with `c_0 = √(1/n)`, `c_k = √(2/n)`.
/// Each product is a direct `O(n²)` sum over a table of the `4n` distinct cosine
/// values. Only the table is stored, but there is no fast transform behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dct {
    n: usize,
    cos: Vec<f64>,
}

impl Dct {
    pub fn new(n: usize) -> Self {
        let period = 4 * n;
        let cos = (0..period)
            .map(|t| (std::f64::consts::PI * t as f64 / (2 * n) as f64).cos())
            .collect();
        Self { n, cos }
    }

    fn coeff(&self, k: usize, j: usize) -> f64 {
        let c = if k == 0 {
            (1.0 / self.n as f64).sqrt()
        } else {
            (2.0 / self.n as f64).sqrt()
        };
        c * self.cos[((2 * j + 1) * k) % (4 * self.n)]
    }
}

impl<T: Scalar> LinearOperator<T> for Dct {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        for (k, yk) in y.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (j, &xj) in x.iter().enumerate() {
                acc += xj * T::from_f64(self.coeff(k, j));
            }
            *yk = acc;
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        for (j, xj) in x.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (k, &yk) in y.iter().enumerate() {
                acc += yk * T::from_f64(self.coeff(k, j));
            }
            *xj = acc;
        }
    }
}

/// Unitary discrete Fourier transform on `Complex<f64>` backed by `rustfft`.
///
/// `y_k = n^{-1/2} Σ_j x_j e^{-2πi jk/n}`; the adjoint is the unitary inverse transform.
#[derive(Clone)]
pub struct Fourier {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Fourier {
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        Self { n, forward, inverse }
    }

    fn run(&self, plan: &Arc<dyn Fft<f64>>, input: &[Complex64], output: &mut [Complex64]) {
        output.copy_from_slice(input);
        if self.n == 0 {
            return;
        }
        plan.process(output);
        let s = 1.0 / (self.n as f64).sqrt();
        for v in output.iter_mut() {
            *v *= s;
        }
    }
}

impl fmt::Debug for Fourier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fourier").field("n", &self.n).finish()
    }
}

impl LinearOperator<Complex64> for Fourier {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn times(&self, x: &[Complex64], y: &mut [Complex64]) {
        self.run(&self.forward, x, y);
    }

    fn trans(&self, y: &[Complex64], x: &mut [Complex64]) {
        self.run(&self.inverse, y, x);
    }
}

/// Circular convolution with a fixed kernel: `y_i = Σ_l h_l x_{(i − l) mod n}`.
///
/// The adjoint is circular correlation with the conjugated kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularConvolution<T> {
    kernel: Vec<T>,
    n: usize,
}

impl<T: Scalar> CircularConvolution<T> {
    /// `kernel` is zero-padded to length `n`; it may not be longer than `n`.
    pub fn new(kernel: Vec<T>, n: usize) -> Result<Self, SpError> {
        if kernel.len() > n {
            return Err(SpError::shape(format!(
                "kernel of length {} does not fit a signal of length {}",
                kernel.len(),
                n
            )));
        }
        Ok(Self { kernel, n })
    }

    pub fn kernel(&self) -> &[T] {
        &self.kernel
    }
}

impl<T: Scalar> LinearOperator<T> for CircularConvolution<T> {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn times(&self, x: &[T], y: &mut [T]) {
        let n = self.n;
        for (i, yi) in y.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (l, &h) in self.kernel.iter().enumerate() {
                acc += h * x[(i + n - l) % n];
            }
            *yi = acc;
        }
    }

    fn trans(&self, y: &[T], x: &mut [T]) {
        let n = self.n;
        for (j, xj) in x.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (l, &h) in self.kernel.iter().enumerate() {
                acc += h.conj() * y[(j + l) % n];
            }
            *xj = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hadamard_of_unit_vector_is_flat() {
        let h = WalshHadamard::new(4).unwrap();
        let y = h.apply(&[1.0f64, 0.0, 0.0, 0.0]);
        for v in y {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-15);
        }
        assert!(WalshHadamard::new(6).is_err());
        assert!(WalshHadamard::new(0).is_err());
    }

    #[test]
    fn dct_round_trip_and_dc_term() {
        let d = Dct::new(5);
        let x = [1.0f64, -2.0, 0.5, 3.0, 0.0];
        let y = d.apply(&x);
        let sum: f64 = x.iter().sum();
        assert_abs_diff_eq!(y[0], sum / 5f64.sqrt(), epsilon = 1e-12);
        let back = d.apply_adjoint(&y);
        for (a, b) in back.iter().zip(&x) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn fourier_is_unitary() {
        let f = Fourier::new(8);
        let x: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, -(i as f64) / 2.0)).collect();
        let y = f.apply(&x);
        let nx: f64 = x.iter().map(|v| v.norm_sqr()).sum();
        let ny: f64 = y.iter().map(|v| v.norm_sqr()).sum();
        assert_abs_diff_eq!(nx, ny, epsilon = 1e-10);
        let back = f.apply_adjoint(&y);
        for (a, b) in back.iter().zip(&x) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn convolution_shifts_with_delta_kernel() {
        let c = CircularConvolution::new(vec![0.0f64, 1.0], 4).unwrap();
        assert_eq!(c.apply(&[1.0, 2.0, 3.0, 4.0]), vec![4.0, 1.0, 2.0, 3.0]);
        assert_eq!(c.apply_adjoint(&[4.0, 1.0, 2.0, 3.0]), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(CircularConvolution::new(vec![1.0f64; 5], 4).is_err());
    }
}
