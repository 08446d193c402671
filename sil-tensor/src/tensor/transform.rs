//! Structural transforms, the `map` family and reductions

use super::Tensor;
use crate::shape::Shape;

impl Tensor {
    /// Swap rows and columns: `out[j][i] = self[i][j]`
    pub fn transpose(&self) -> Tensor {
        let (rows, cols) = self.dims();
        let mut data = Vec::with_capacity(self.size());
        for j in 0..cols {
            for i in 0..rows {
                data.push(self.at(i, j));
            }
        }
        Tensor::from_parts_unchecked(self.shape.transposed(), data)
    }

    /// Concatenate rows into a single `(1, rows * cols)` row
    pub fn flatten(&self) -> Tensor {
        Tensor::from_parts_unchecked(Shape::new(1, self.size()), self.data.clone())
    }

    /// Apply `f` to every element, preserving shape
    pub fn map<F>(&self, f: F) -> Tensor
    where
        F: Fn(f64) -> f64,
    {
        let data = self.data.iter().map(|&x| f(x)).collect();
        Tensor::from_parts_unchecked(self.shape, data)
    }

    /// Raise every element to `p`
    pub fn pow(&self, p: f64) -> Tensor {
        self.map(|x| x.powf(p))
    }

    /// `pow(2)`
    pub fn square(&self) -> Tensor {
        self.pow(2.0)
    }

    pub fn sqrt(&self) -> Tensor {
        self.map(f64::sqrt)
    }

    /// Natural logarithm of every element
    pub fn ln(&self) -> Tensor {
        self.map(f64::ln)
    }

    pub fn exp(&self) -> Tensor {
        self.map(f64::exp)
    }

    /// Clamp every element into `[min, max]` inclusive
    ///
    /// Bounds are applied as `max(min).min(max)`, so an inverted range
    /// collapses every element to `max` instead of panicking.
    pub fn clip(&self, min: f64, max: f64) -> Tensor {
        self.map(|x| x.max(min).min(max))
    }

    /// Sum of all elements
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean of all elements
    pub fn mean(&self) -> f64 {
        self.sum() / self.size() as f64
    }

    /// Largest element (NaN elements are ignored)
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest element (NaN elements are ignored)
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }
}
