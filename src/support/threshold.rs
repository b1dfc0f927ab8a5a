//! Hard thresholding and support-set utilities.
//!
//! Selection order is total: larger magnitude first, then lower index, with NaN
//! magnitudes ranked below every number. Results are always reported in ascending
//! index order, so the same input yields the same support on every run.

use crate::core::traits::Scalar;
use num_traits::Float;
use std::cmp::Ordering;

/// A sparse vector given by its support and the values on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholded<T> {
    /// Selected indices, strictly increasing.
    pub indices: Vec<usize>,
    /// `values[i]` is the entry at `indices[i]`.
    pub values: Vec<T>,
    /// Length of the dense vector.
    pub len: usize,
}

impl<T: Scalar> Thresholded<T> {
    pub fn to_dense(&self) -> Vec<T> {
        crate::core::vector::embed(self.len, &self.indices, &self.values)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Ranking used for every selection: `Less` means `a` is kept before `b`.
fn rank<R: Float>(a: (usize, R), b: (usize, R)) -> Ordering {
    match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => a.0.cmp(&b.0),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b
            .1
            .partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0)),
    }
}

fn select<T: Scalar>(x: &[T], k: usize, candidates: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut keyed: Vec<(usize, T::Real)> = candidates.map(|i| (i, x[i].modulus())).collect();
    if k == 0 {
        return Vec::new();
    }
    if k < keyed.len() {
        keyed.select_nth_unstable_by(k - 1, |a, b| rank(*a, *b));
        keyed.truncate(k);
    }
    let mut idx: Vec<usize> = keyed.into_iter().map(|(i, _)| i).collect();
    idx.sort_unstable();
    idx
}

/// Indices of the `k` largest-magnitude entries of `x`, ascending.
/// `k ≥ x.len()` returns every index.
pub fn largest_indices<T: Scalar>(x: &[T], k: usize) -> Vec<usize> {
    select(x, k, 0..x.len())
}

/// Like [`largest_indices`] but never picks an index in `exclude` (sorted ascending).
/// Returns fewer than `k` indices when not enough candidates remain.
pub fn largest_indices_excluding<T: Scalar>(x: &[T], k: usize, exclude: &[usize]) -> Vec<usize> {
    select(x, k, (0..x.len()).filter(|i| exclude.binary_search(i).is_err()))
}

/// `H_k(x)`: keep the `k` largest-magnitude entries.
pub fn hard_threshold<T: Scalar>(x: &[T], k: usize) -> Thresholded<T> {
    let indices = largest_indices(x, k);
    let values = indices.iter().map(|&i| x[i]).collect();
    Thresholded { indices, values, len: x.len() }
}

/// `H_k(x)` as a dense vector.
pub fn threshold_vector<T: Scalar>(x: &[T], k: usize) -> Vec<T> {
    hard_threshold(x, k).to_dense()
}

/// Union of two ascending index sets, ascending and without duplicates.
pub fn merge_supports(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn ties_prefer_lower_index() {
        let x = [1.0, -3.0, 3.0, 0.5, -3.0];
        assert_eq!(largest_indices(&x, 2), vec![1, 2]);
        assert_eq!(largest_indices(&x, 3), vec![1, 2, 4]);
    }

    #[test]
    fn nan_ranks_lowest() {
        let x = [f64::NAN, 0.0, 2.0, f64::NAN];
        assert_eq!(largest_indices(&x, 2), vec![1, 2]);
        assert_eq!(largest_indices(&x, 3), vec![0, 1, 2]);
    }

    #[test]
    fn edge_values_of_k() {
        let x = [4.0, -1.0, 2.0];
        let h = hard_threshold(&x, 0);
        assert!(h.is_empty());
        assert_eq!(h.to_dense(), vec![0.0; 3]);
        assert_eq!(largest_indices(&x, 3), vec![0, 1, 2]);
        assert_eq!(largest_indices(&x, 10), vec![0, 1, 2]);
        assert_eq!(threshold_vector(&x, 1), vec![4.0, 0.0, 0.0]);
    }

    #[test]
    fn complex_entries_rank_by_modulus() {
        let x = [
            Complex64::new(3.0, 0.0),
            Complex64::new(0.0, -4.0),
            Complex64::new(1.0, 1.0),
        ];
        let h = hard_threshold(&x, 1);
        assert_eq!(h.indices, vec![1]);
        assert_eq!(h.values, vec![Complex64::new(0.0, -4.0)]);
    }

    #[test]
    fn exclusion_and_merge() {
        let x = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(largest_indices_excluding(&x, 2, &[0, 2]), vec![1, 3]);
        assert_eq!(largest_indices_excluding(&x, 9, &[0, 1, 2]), vec![3, 4]);
        assert_eq!(merge_supports(&[0, 3, 7], &[1, 3, 9]), vec![0, 1, 3, 7, 9]);
        assert_eq!(merge_supports(&[], &[2]), vec![2]);
    }
}
