//! Context types for configuring and running recovery algorithms.
//!
//! - [`recovery_context`]: the [`Algorithm`] selector, the [`Recovery`] dispatch enum and
//!   [`RecoveryContext`], which binds an operator to an algorithm configuration.

pub mod recovery_context;
pub use recovery_context::{Algorithm, Recovery, RecoveryContext};
