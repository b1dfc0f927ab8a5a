pub mod convergence;

pub use convergence::{Convergence, StopReason};
