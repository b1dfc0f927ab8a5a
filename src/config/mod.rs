//! Configuration types for the recovery algorithms.

pub mod options;

pub use options::{RecoveryOptions, StepSize};
