//! Support selection (hard thresholding) and support-restricted least squares.

pub mod restricted;
pub mod threshold;

pub use restricted::{restricted_matrix, solve_on_support, solve_on_support_dense, validate_support};
pub use threshold::{
    hard_threshold, largest_indices, largest_indices_excluding, merge_supports, threshold_vector,
    Thresholded,
};
