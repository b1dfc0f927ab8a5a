//! Algorithm selection by name and batched recovery through `RecoveryContext`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sparse_pursuit::context::{Algorithm, Recovery, RecoveryContext};
use sparse_pursuit::core::vector::distance;
use sparse_pursuit::core::LinearOperator;
use sparse_pursuit::matrix::{gaussian_matrix, sparse_vector};
use sparse_pursuit::operator::DenseOperator;
use sparse_pursuit::pursuit::{PursuitConfig, SparseRecovery};
use sparse_pursuit::{NormalEquations, RecoveryOptions, SpError};
use std::sync::Arc;

fn batch_problem(seed: u64, count: usize) -> (DenseOperator<f64>, Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a: DenseOperator<f64> = gaussian_matrix(&mut rng, 40, 80, true);
    let mut signals = Vec::with_capacity(count);
    let mut measurements = Vec::with_capacity(count);
    for _ in 0..count {
        let (mut x, support) = sparse_vector::<f64, _>(&mut rng, 80, 3).unwrap();
        for &i in &support {
            x[i] = x[i].signum() * (1.0 + x[i].abs());
        }
        measurements.push(a.apply(&x));
        signals.push(x);
    }
    (a, signals, measurements)
}

#[test]
fn names_round_trip_through_display() {
    for kind in Algorithm::ALL {
        assert_eq!(kind.to_string().parse::<Algorithm>(), Ok(kind));
    }
    assert_eq!("Subspace-Pursuit".parse::<Algorithm>(), Ok(Algorithm::SubspacePursuit));
    assert!(matches!("omp".parse::<Algorithm>(), Err(SpError::InvalidParameter(_))));
}

#[test]
fn context_dispatches_to_the_named_algorithm() {
    let (a, signals, measurements) = batch_problem(1, 1);
    let opts = RecoveryOptions::default()
        .with_max_iters(300)
        .with_tolerance(1e-10)
        .with_stagnation(0.0);
    for kind in Algorithm::ALL {
        let ctx = RecoveryContext::<f64, _>::new(kind, a.clone()).with_options(opts);
        let alg = ctx.algorithm();
        assert_eq!(alg.kind(), kind);
        let direct = Recovery::new(kind, PursuitConfig { options: opts, ..PursuitConfig::default() })
            .recover(&a, &measurements[0], 3)
            .unwrap();
        let res = ctx.recover(&measurements[0], 3).unwrap();
        assert_eq!(res, direct, "{}", alg.name());
        assert!(res.converged, "{}", kind);
        assert!(distance(&res.x, &signals[0]) < 1e-6, "{}", kind);
    }
}

#[test]
fn batch_recovery_keeps_order_and_reports_errors_per_entry() {
    let (a, signals, mut measurements) = batch_problem(2, 5);
    measurements.insert(2, vec![1.0; 7]);
    let ctx = RecoveryContext::<f64, _>::new(Algorithm::SubspacePursuit, &a)
        .with_options(RecoveryOptions::default().with_tolerance(1e-10))
        .with_solver(Arc::new(NormalEquations));
    let out = ctx.recover_batch(&measurements, 3);
    assert_eq!(out.len(), 6);
    assert!(matches!(out[2], Err(SpError::ShapeMismatch(_))));
    let ok: Vec<_> = out.iter().enumerate().filter(|(i, _)| *i != 2).map(|(_, r)| r).collect();
    for (res, x) in ok.into_iter().zip(&signals) {
        let res = res.as_ref().unwrap();
        assert!(res.converged);
        assert!(distance(&res.x, x) < 1e-8);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn dedicated_pool_matches_global_pool() {
    use sparse_pursuit::parallel::{recover_batch, recover_batch_with_threads};
    use sparse_pursuit::pursuit::Htp;

    let (a, _, measurements) = batch_problem(3, 8);
    let alg = Htp::new(1e-10, 100);
    let global = recover_batch(&alg, &a, &measurements, 3);
    for threads in [0, 1, 3] {
        let pooled = recover_batch_with_threads(&alg, &a, &measurements, 3, threads).unwrap();
        assert_eq!(pooled, global);
    }
}
