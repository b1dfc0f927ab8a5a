//! Batched recovery over many measurement vectors.
//!
//! Each `recover` call is single-threaded and owns its state, so independent
//! measurement vectors can be processed on parallel workers while sharing one operator.
//! With the `rayon` feature the batch is spread over the rayon pool; without it the
//! batch runs sequentially. Either way results come back in input order and each
//! result is identical to what a standalone call would return.

use crate::core::traits::{LinearOperator, Scalar};
use crate::error::SpError;
use crate::pursuit::{RecoveryResult, SparseRecovery};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Recover one `k`-sparse signal per entry of `measurements`.
#[cfg(feature = "rayon")]
pub fn recover_batch<T, A, O>(
    algorithm: &A,
    op: &O,
    measurements: &[Vec<T>],
    k: usize,
) -> Vec<Result<RecoveryResult<T>, SpError>>
where
    T: Scalar,
    A: SparseRecovery<T>,
    O: LinearOperator<T> + ?Sized,
{
    measurements
        .par_iter()
        .map(|b| algorithm.recover(op, b, k))
        .collect()
}

/// Recover one `k`-sparse signal per entry of `measurements`.
#[cfg(not(feature = "rayon"))]
pub fn recover_batch<T, A, O>(
    algorithm: &A,
    op: &O,
    measurements: &[Vec<T>],
    k: usize,
) -> Vec<Result<RecoveryResult<T>, SpError>>
where
    T: Scalar,
    A: SparseRecovery<T>,
    O: LinearOperator<T> + ?Sized,
{
    measurements.iter().map(|b| algorithm.recover(op, b, k)).collect()
}

/// [`recover_batch`] on a dedicated pool of `threads` workers (`0` means one per CPU).
#[cfg(feature = "rayon")]
pub fn recover_batch_with_threads<T, A, O>(
    algorithm: &A,
    op: &O,
    measurements: &[Vec<T>],
    k: usize,
    threads: usize,
) -> Result<Vec<Result<RecoveryResult<T>, SpError>>, SpError>
where
    T: Scalar,
    A: SparseRecovery<T>,
    O: LinearOperator<T> + ?Sized,
{
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| SpError::param(format!("cannot build a pool of {} threads: {}", threads, e)))?;
    log::debug!("batch of {} recoveries on {} threads", measurements.len(), threads);
    Ok(pool.install(|| recover_batch(algorithm, op, measurements, k)))
}
