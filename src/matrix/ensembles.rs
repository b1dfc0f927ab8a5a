//! Sensing matrices, dictionaries and synthetic sparse signals.
//!
//! Random ensembles take the generator as an argument so experiments are reproducible
//! from a seed; the deterministic bases (Hadamard, DCT, Fourier) are the dense
//! counterparts of the matrix-free operators in [`crate::operator`].

use crate::core::traits::Scalar;
use crate::core::vector::norm;
use crate::error::SpError;
use crate::operator::{to_matrix, Dct, DenseOperator};
use faer::linalg::solvers::Qr;
use faer::traits::ComplexField;
use faer::Mat;
use num_complex::Complex64;
use num_traits::{Float, Zero};
use rand::Rng;

/// `m × n` matrix with i.i.d. standard normal entries.
///
/// With `normalize_columns` every column is scaled to unit norm; otherwise all entries
/// are divided by `√m`, so columns have unit norm in expectation.
pub fn gaussian_matrix<T, R>(rng: &mut R, m: usize, n: usize, normalize_columns: bool) -> DenseOperator<T>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    let mut cols: Vec<Vec<T>> = (0..n)
        .map(|_| (0..m).map(|_| T::sample_normal(rng)).collect())
        .collect();
    let sqrt_m = T::Real::from_f64((m as f64).sqrt());
    for col in cols.iter_mut() {
        let s = if normalize_columns { norm(col) } else { sqrt_m };
        if !s.is_zero() {
            for v in col.iter_mut() {
                *v = v.scale_real(s.recip());
            }
        }
    }
    DenseOperator::from_fn(m, n, |i, j| cols[j][i])
}

/// `m × n` matrix with i.i.d. entries `±1/√m`.
pub fn rademacher_matrix<T, R>(rng: &mut R, m: usize, n: usize) -> DenseOperator<T>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    let v = 1.0 / (m as f64).sqrt();
    let signs: Vec<bool> = (0..m * n).map(|_| rng.gen_bool(0.5)).collect();
    DenseOperator::from_fn(m, n, |i, j| {
        T::from_f64(if signs[j * m + i] { v } else { -v })
    })
}

/// Random `n × n` orthonormal (unitary) basis: the `Q` factor of a Gaussian matrix,
/// with column phases fixed by the diagonal of `R`.
pub fn random_orthonormal<T, R>(rng: &mut R, n: usize) -> DenseOperator<T>
where
    T: Scalar + ComplexField,
    R: Rng + ?Sized,
{
    let g = gaussian_matrix::<T, R>(rng, n, n, false);
    let qr = Qr::new(g.matrix().as_ref());
    let q = qr.compute_thin_Q();
    let r = qr.thin_R();
    let phases: Vec<T> = (0..n)
        .map(|j| {
            let d = r[(j, j)];
            let a = d.modulus();
            if a.is_zero() { T::one() } else { d / T::from_real(a) }
        })
        .collect();
    DenseOperator::from_fn(n, n, |i, j| q[(i, j)] * phases[j])
}

/// Orthonormal Hadamard basis (Sylvester construction), `n` a power of two.
pub fn hadamard_basis(n: usize) -> Result<DenseOperator<f64>, SpError> {
    if n == 0 || !n.is_power_of_two() {
        return Err(SpError::param(format!(
            "Hadamard basis size must be a power of two, got {}",
            n
        )));
    }
    let s = 1.0 / (n as f64).sqrt();
    Ok(DenseOperator::from_fn(n, n, |i, j| {
        if (i & j).count_ones() % 2 == 0 { s } else { -s }
    }))
}

/// Orthonormal DCT-II matrix; row `k` is the `k`-th cosine atom.
pub fn dct_basis(n: usize) -> DenseOperator<f64> {
    DenseOperator::new(to_matrix(&Dct::new(n)))
}

/// Fourier synthesis basis: column `k` is `e^{2πi jk/n} / √n`, the conjugate transpose
/// of the unitary DFT matrix.
pub fn fourier_basis(n: usize) -> DenseOperator<Complex64> {
    let s = 1.0 / (n as f64).sqrt();
    DenseOperator::from_fn(n, n, |j, k| {
        let phase = 2.0 * std::f64::consts::PI * ((j * k) % n) as f64 / n as f64;
        Complex64::from_polar(s, phase)
    })
}

/// Two-ortho dictionary `[I | H]` (`n × 2n`).
pub fn dirac_hadamard_basis(n: usize) -> Result<DenseOperator<f64>, SpError> {
    let h = hadamard_basis(n)?;
    Ok(dirac_concat(h.matrix()))
}

/// Two-ortho dictionary `[I | D]` with `D` the DCT synthesis basis `dct_basis(n)ᵀ` (`n × 2n`).
pub fn dirac_dct_basis(n: usize) -> DenseOperator<f64> {
    let d = dct_basis(n);
    let dt = Mat::from_fn(n, n, |i, j| d.matrix()[(j, i)]);
    dirac_concat(&dt)
}

fn dirac_concat(b: &Mat<f64>) -> DenseOperator<f64> {
    let n = b.nrows();
    DenseOperator::from_fn(n, 2 * n, |i, j| {
        if j < n {
            if i == j { 1.0 } else { 0.0 }
        } else {
            b[(i, j - n)]
        }
    })
}

/// `k`-sparse length-`n` signal: support drawn uniformly without replacement, nonzero
/// entries standard normal. Returns the signal and its (ascending) support.
pub fn sparse_vector<T, R>(rng: &mut R, n: usize, k: usize) -> Result<(Vec<T>, Vec<usize>), SpError>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    if k > n {
        return Err(SpError::shape(format!(
            "cannot place {} nonzeros in a vector of length {}",
            k, n
        )));
    }
    let mut support = rand::seq::index::sample(rng, n, k).into_vec();
    support.sort_unstable();
    let mut x = vec![T::zero(); n];
    for &i in &support {
        let mut v = T::sample_normal(rng);
        // keep the support exact
        while v.is_zero() {
            v = T::sample_normal(rng);
        }
        x[i] = v;
    }
    Ok((x, support))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::LinearOperator;
    use crate::matrix::properties::{
        has_orthogonal_columns, has_orthogonal_rows, has_unitary_columns, has_unitary_rows, is_symmetric,
    };
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn normalized_gaussian_columns_have_unit_norm() {
        let mut rng = StdRng::seed_from_u64(42);
        let a: DenseOperator<f64> = gaussian_matrix(&mut rng, 20, 50, true);
        for j in 0..50 {
            assert_abs_diff_eq!(norm(&a.column(j)), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn orthonormal_bases() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = random_orthonormal::<f64, _>(&mut rng, 6);
        assert!(has_orthogonal_columns(&q) && has_orthogonal_rows(&q));
        assert!(has_unitary_columns(&random_orthonormal::<Complex64, _>(&mut rng, 5)));
        assert!(has_orthogonal_columns(&hadamard_basis(8).unwrap()));
        assert!(is_symmetric(&hadamard_basis(8).unwrap()));
        assert!(has_orthogonal_rows(&dct_basis(7)));
        let f = fourier_basis(6);
        assert!(has_unitary_columns(&f) && has_unitary_rows(&f));
        assert!(!has_orthogonal_columns(&f));
        assert!(!has_unitary_rows(&dirac_dct_basis(4)));
        assert!(hadamard_basis(12).is_err());
    }

    #[test]
    fn rademacher_entries() {
        let mut rng = StdRng::seed_from_u64(1);
        let a: DenseOperator<f64> = rademacher_matrix(&mut rng, 4, 9);
        for j in 0..9 {
            for v in a.column(j) {
                assert_abs_diff_eq!(v.abs(), 0.5, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn sparse_vector_has_requested_support() {
        let mut rng = StdRng::seed_from_u64(9);
        let (x, support): (Vec<f64>, _) = sparse_vector(&mut rng, 30, 4).unwrap();
        assert_eq!(support.len(), 4);
        assert!(support.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(crate::core::vector::nonzero_support(&x), support);
        assert!(sparse_vector::<f64, _>(&mut rng, 3, 4).is_err());
    }

    #[test]
    fn dirac_dictionaries_are_twice_as_wide() {
        let d = dirac_dct_basis(4);
        assert_eq!(d.shape(), (4, 8));
        assert_eq!(d.column(2), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(dirac_hadamard_basis(4).unwrap().shape(), (4, 8));
    }
}
