//! Dense least-squares backends for the support-restricted solve.
//!
//! - [`SvdSolver`] (default): faer's thin SVD. Returns the minimum-norm least-squares
//!   solution, including for rank-deficient systems.
//! - [`NormalEquations`]: forms `AᵀA z = Aᵀb` and solves it with faer's full-pivot LU.
//!   Cheaper for tall, well-conditioned supports; falls back to [`SvdSolver`] whenever the
//!   LU result is not finite or does not satisfy the normal equations.

use crate::core::traits::{RealScalar, Scalar};
use crate::error::SpError;
use faer::linalg::solvers::{FullPivLu, SolveCore, Svd};
use faer::traits::ComplexField;
use faer::{Conj, Mat, MatMut, MatRef};
use num_traits::Float;

/// Pluggable dense solver for `min_z ‖A z − b‖₂`.
pub trait LeastSquares<T: Scalar>: Send + Sync {
    /// Solve the least-squares problem; `b.len() == a.nrows()`, result has `a.ncols()` entries.
    fn solve(&self, a: &Mat<T>, b: &[T]) -> Result<Vec<T>, SpError>;

    fn name(&self) -> &'static str;
}

fn check_dims<T: Scalar>(a: &Mat<T>, b: &[T]) -> Result<(), SpError> {
    if a.nrows() != b.len() {
        return Err(SpError::shape(format!(
            "right-hand side has {} entries, matrix has {} rows",
            b.len(),
            a.nrows()
        )));
    }
    Ok(())
}

/// Minimum-norm least squares through the singular value decomposition.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvdSolver;

impl SvdSolver {
    pub fn new() -> Self {
        SvdSolver
    }
}

impl<T: Scalar> LeastSquares<T> for SvdSolver {
    fn solve(&self, a: &Mat<T>, b: &[T]) -> Result<Vec<T>, SpError> {
        check_dims(a, b)?;
        Ok(T::solve_min_norm(a.as_ref(), b))
    }

    fn name(&self) -> &'static str {
        "svd"
    }
}

/// Minimum-norm solution of `min ‖A z − b‖₂` from faer's thin SVD.
///
/// Singular values at or below `max(m, s) · ε · σ_max` count as zero, so directions
/// outside the numerical range of `A` get no weight.
pub fn min_norm_lstsq<T>(a: MatRef<'_, T>, b: &[T]) -> Vec<T>
where
    T: Scalar + ComplexField,
{
    let (m, s) = (a.nrows(), a.ncols());
    let mut z = vec![T::zero(); s];
    if s == 0 || m == 0 {
        return z;
    }
    let svd = match Svd::new_thin(a) {
        Ok(svd) => svd,
        Err(e) => {
            log::warn!("SVD of the {}x{} restricted system failed ({:?}), returning zero solution", m, s, e);
            return z;
        }
    };
    let u = svd.U();
    let v = svd.V();
    let sigma = svd.S().column_vector();

    let sv: Vec<<T as Scalar>::Real> = (0..m.min(s)).map(|j| sigma[j].real()).collect();
    let tol = rank_tolerance(&sv, m.max(s));

    let mut rank = 0;
    for (j, &sj) in sv.iter().enumerate() {
        if sj.is_nan() || sj <= tol {
            continue;
        }
        rank += 1;
        // z += v_j (u_jᴴ b) / σ_j
        let c = (0..m)
            .fold(T::zero(), |acc, i| acc + u[(i, j)].conj() * b[i])
            .scale_real(sj.recip());
        for (k, zk) in z.iter_mut().enumerate() {
            *zk += v[(k, j)] * c;
        }
    }
    if rank == 0 {
        log::debug!("restricted system has numerical rank 0, returning zero solution");
    } else if rank < s {
        log::debug!("rank-deficient restricted system: rank {} of {} columns", rank, s);
    }
    z
}

fn rank_tolerance<R: RealScalar>(sv: &[R], dim: usize) -> R {
    let smax = sv.iter().fold(R::zero(), |acc, &x| acc.max(x));
    smax * R::epsilon() * R::from_f64(dim as f64)
}

/// Normal equations solved with faer's full-pivot LU (real `f64` systems).
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalEquations;

impl NormalEquations {
    pub fn new() -> Self {
        NormalEquations
    }
}

impl LeastSquares<f64> for NormalEquations {
    fn solve(&self, a: &Mat<f64>, b: &[f64]) -> Result<Vec<f64>, SpError> {
        check_dims(a, b)?;
        let (m, s) = (a.nrows(), a.ncols());
        if s == 0 {
            return Ok(Vec::new());
        }
        let gram = a.transpose() * a.as_ref();
        let rhs: Vec<f64> = (0..s).map(|j| (0..m).map(|k| a[(k, j)] * b[k]).sum()).collect();

        let lu = FullPivLu::new(gram.as_ref());
        let mut z = rhs.clone();
        let z_mat = MatMut::from_column_major_slice_mut(&mut z, s, 1);
        lu.solve_in_place_with_conj(Conj::No, z_mat);

        // accept only if the normal equations actually hold
        let rhs_norm = rhs.iter().map(|v| v * v).sum::<f64>().sqrt();
        let defect = (0..s)
            .map(|i| {
                let gi: f64 = (0..s).map(|j| gram[(i, j)] * z[j]).sum();
                (gi - rhs[i]).powi(2)
            })
            .sum::<f64>()
            .sqrt();
        let ok = z.iter().all(|v| v.is_finite())
            && defect <= 1e3 * f64::EPSILON * (s as f64) * rhs_norm.max(f64::MIN_POSITIVE);
        if ok {
            Ok(z)
        } else {
            log::debug!("normal equations ill-conditioned (defect {:e}), falling back to SVD", defect);
            Ok(min_norm_lstsq(a.as_ref(), b))
        }
    }

    fn name(&self) -> &'static str {
        "normal-equations"
    }
}
