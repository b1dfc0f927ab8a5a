//! Forwarding implementations of [`LinearOperator`] for references and smart pointers.
//!
//! These let an operator be borrowed, boxed as a trait object, or shared through
//! an `Arc` across parallel recoveries without changing any algorithm signature.

use crate::core::traits::{LinearOperator, Scalar};
use std::sync::Arc;

impl<T: Scalar, O: LinearOperator<T> + ?Sized> LinearOperator<T> for &O {
    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }
    fn times(&self, x: &[T], y: &mut [T]) {
        (**self).times(x, y)
    }
    fn trans(&self, y: &[T], x: &mut [T]) {
        (**self).trans(y, x)
    }
}

impl<T: Scalar, O: LinearOperator<T> + ?Sized> LinearOperator<T> for Box<O> {
    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }
    fn times(&self, x: &[T], y: &mut [T]) {
        (**self).times(x, y)
    }
    fn trans(&self, y: &[T], x: &mut [T]) {
        (**self).trans(y, x)
    }
}

impl<T: Scalar, O: LinearOperator<T> + ?Sized> LinearOperator<T> for Arc<O> {
    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }
    fn times(&self, x: &[T], y: &mut [T]) {
        (**self).times(x, y)
    }
    fn trans(&self, y: &[T], x: &mut [T]) {
        (**self).trans(y, x)
    }
}
