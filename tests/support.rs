//! Hard thresholding and support-restricted least squares.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparse_pursuit::core::vector::{embed, norm, residual};
use sparse_pursuit::core::LinearOperator;
use sparse_pursuit::linalg::{SvdSolver, NormalEquations};
use sparse_pursuit::matrix::gaussian_matrix;
use sparse_pursuit::operator::{Dct, DenseOperator};
use sparse_pursuit::support::{
    hard_threshold, largest_indices, solve_on_support, solve_on_support_dense, threshold_vector,
};
use sparse_pursuit::SpError;

#[test]
fn hard_threshold_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(1);
    for k in [0, 1, 5, 17, 40] {
        let x: Vec<f64> = (0..40).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let once = threshold_vector(&x, k);
        let twice = threshold_vector(&once, k);
        assert_eq!(once, twice, "k = {}", k);
        assert_eq!(once.iter().filter(|v| **v != 0.0).count(), k);
    }
}

#[test]
fn hard_threshold_keeps_largest_magnitudes() {
    let x = [0.1, -7.0, 2.0, 0.0, 7.0, -2.0];
    let h = hard_threshold(&x, 3);
    // 7 and -7 tie; of the two 2's only index 2 fits
    assert_eq!(h.indices, vec![1, 2, 4]);
    assert_eq!(h.values, vec![-7.0, 2.0, 7.0]);
    assert_eq!(h.len, 6);
    assert_eq!(largest_indices(&x, 6), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn restricted_solve_recovers_exact_coefficients() {
    let mut rng = StdRng::seed_from_u64(2);
    let a: DenseOperator<f64> = gaussian_matrix(&mut rng, 15, 30, true);
    let support = vec![2, 11, 19, 27];
    let coeffs = vec![1.0, -0.5, 3.0, 2.0];
    let b = a.apply(&embed(30, &support, &coeffs));
    for z in [
        solve_on_support(&a, &b, &support, &SvdSolver).unwrap(),
        solve_on_support(&a, &b, &support, &NormalEquations).unwrap(),
    ] {
        for (zi, ci) in z.iter().zip(&coeffs) {
            assert_abs_diff_eq!(zi, ci, epsilon = 1e-10);
        }
    }
}

#[test]
fn restricted_solve_on_matrix_free_operator() {
    // DCT columns are orthonormal, so the restricted solution is just A_Sᴴ b
    let op = Dct::new(16);
    let b: Vec<f64> = (0..16).map(|i| (i as f64 * 0.3).cos()).collect();
    let support = [0, 3, 9];
    let x = solve_on_support_dense(&op, &b, &support, &SvdSolver).unwrap();
    let proj = LinearOperator::<f64>::apply_adjoint(&op, &b);
    for &j in &support {
        assert_abs_diff_eq!(x[j], proj[j], epsilon = 1e-12);
    }
    assert_eq!(x.iter().filter(|v| **v != 0.0).count(), 3);
}

#[test]
fn duplicated_columns_get_minimum_norm_solution() {
    // columns 0 and 1 identical
    let a = DenseOperator::from_fn(5, 3, |i, j| match j {
        0 | 1 => (i + 1) as f64,
        _ => ((i * i) as f64) - 3.0,
    });
    let b = a.apply(&[2.0, 0.0, 1.0]);
    let z = solve_on_support(&a, &b, &[0, 1, 2], &SvdSolver).unwrap();
    assert_abs_diff_eq!(z[0], 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(z[1], 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(z[2], 1.0, epsilon = 1e-10);
    assert!(norm(&residual(&a, &b, &z)) < 1e-10);
}

#[test]
fn restricted_solve_rejects_bad_input() {
    let a = DenseOperator::from_fn(4, 6, |i, j| (i * 6 + j) as f64);
    let b = [1.0; 4];
    assert_eq!(
        solve_on_support(&a, &b, &[1, 6], &SvdSolver),
        Err(SpError::SupportOutOfRange { index: 6, len: 6 })
    );
    assert_eq!(
        solve_on_support(&a, &b, &[2, 2], &SvdSolver),
        Err(SpError::DuplicateSupport(2))
    );
    assert!(matches!(
        solve_on_support(&a, &[1.0; 3], &[0], &SvdSolver),
        Err(SpError::ShapeMismatch(_))
    ));
}
