//! Elementwise arithmetic
//!
//! Tensor-tensor forms require identical shapes. Tensor-scalar forms apply
//! the scalar to every element. Division follows IEEE-754: dividing by zero
//! yields infinity or NaN rather than an error.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Tensor;
use crate::error::Result;
use crate::shape::same_dims;

impl Tensor {
    /// Combine two same-shaped tensors element by element
    pub fn zip_with<F>(&self, other: &Tensor, f: F) -> Result<Tensor>
    where
        F: Fn(f64, f64) -> f64,
    {
        same_dims(self.shape, other.shape)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor::from_parts_unchecked(self.shape, data))
    }

    /// Elementwise `self + other`
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise `self - other`
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise (Hadamard) `self * other`
    pub fn mul(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise `self / other`
    pub fn div(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Add `scalar` to every element
    pub fn add_scalar(&self, scalar: f64) -> Tensor {
        self.map(|x| x + scalar)
    }

    /// Subtract `scalar` from every element
    pub fn sub_scalar(&self, scalar: f64) -> Tensor {
        self.map(|x| x - scalar)
    }

    /// Multiply every element by `scalar`
    pub fn mul_scalar(&self, scalar: f64) -> Tensor {
        self.map(|x| x * scalar)
    }

    /// Divide every element by `scalar`
    pub fn div_scalar(&self, scalar: f64) -> Tensor {
        self.map(|x| x / scalar)
    }

    /// `scalar - self`, elementwise
    pub fn rsub_scalar(&self, scalar: f64) -> Tensor {
        self.map(|x| scalar - x)
    }
}

// Only the scalar forms get operator overloads: tensor-tensor arithmetic can
// fail on shape and goes through the `Result`-returning methods.

impl Add<f64> for &Tensor {
    type Output = Tensor;

    fn add(self, rhs: f64) -> Tensor {
        self.add_scalar(rhs)
    }
}

impl Sub<f64> for &Tensor {
    type Output = Tensor;

    fn sub(self, rhs: f64) -> Tensor {
        self.sub_scalar(rhs)
    }
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f64) -> Tensor {
        self.mul_scalar(rhs)
    }
}

impl Div<f64> for &Tensor {
    type Output = Tensor;

    fn div(self, rhs: f64) -> Tensor {
        self.div_scalar(rhs)
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|x| -x)
    }
}
