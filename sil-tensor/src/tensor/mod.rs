//! # Tensor
//!
//! Immutable rank-2 matrix of `f64` values stored row-major.
//!
//! ## Invariants
//!
//! - `shape.rows * shape.cols == data.len()` for every tensor built through a
//!   checked constructor. The check happens once, at construction.
//! - No operation mutates a tensor. Arithmetic, transforms and mapping all
//!   return a new `Tensor`, so tensors can be shared across threads freely.
//!
//! ## Constructors
//!
//! | Constructor | Validation |
//! |-------------|------------|
//! | `zeros`, `ones`, `full` | dims must be rank 2 and positive |
//! | `new` | nested rows must be non-empty and rectangular |
//! | `from_parts` | dims checked against the flat data length |
//! | `from_parts_unchecked` | none, the declared shape is trusted |
//!
//! Operations are split across submodules:
//! - `ops`: elementwise arithmetic (tensor-tensor and tensor-scalar)
//! - `matmul`: dense matrix multiplication and strategy dispatch
//! - `sparse`: coordinate view and sparse matrix multiplication
//! - `transform`: transpose, flatten, the `map` family and reductions

mod matmul;
mod ops;
mod sparse;
mod transform;

pub use sparse::SparseView;

use std::fmt;
use std::ops::Index;

use crate::error::{Result, TensorError};
use crate::shape::{valid_2d, Shape};

/// Immutable rank-2 tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f64>,
}

impl Tensor {
    /// Build a tensor from nested rows, inferring `dims` as `(rows, cols)`
    ///
    /// Fails if `data` is empty, if the first row is empty, or if any row
    /// length differs from the first.
    pub fn new(data: Vec<Vec<f64>>) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(TensorError::Construction(format!(
                "cannot infer dims from empty data ({} rows, {} cols)",
                rows, cols
            )));
        }

        if let Some((i, row)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(TensorError::Construction(format!(
                "ragged data: row {} has {} elements, expected {}",
                i,
                row.len(),
                cols
            )));
        }

        let data = data.into_iter().flatten().collect();
        Ok(Self::from_parts_unchecked(Shape::new(rows, cols), data))
    }

    /// Build a tensor from declared dims and row-major flat data
    pub fn from_parts(dims: &[usize], data: Vec<f64>) -> Result<Self> {
        let shape = valid_2d(dims)?;
        if shape.size() != data.len() {
            return Err(TensorError::Construction(format!(
                "dims {} need {} elements, got {}",
                shape,
                shape.size(),
                data.len()
            )));
        }
        Ok(Self::from_parts_unchecked(shape, data))
    }

    /// Build a tensor trusting the caller's shape
    ///
    /// No cross-check between `shape` and `data` is performed. Values past
    /// `shape.size()` are dropped, so every operation sees the declared
    /// shape. A tensor whose data is too short panics on element access.
    #[inline]
    pub fn from_parts_unchecked(shape: Shape, mut data: Vec<f64>) -> Self {
        data.truncate(shape.size());
        Self { shape, data }
    }

    /// Tensor filled with `0.0`
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        Self::full(dims, 0.0)
    }

    /// Tensor filled with `1.0`
    pub fn ones(dims: &[usize]) -> Result<Self> {
        Self::full(dims, 1.0)
    }

    /// Tensor filled with `value`
    pub fn full(dims: &[usize], value: f64) -> Result<Self> {
        let shape = valid_2d(dims)?;
        Ok(Self::from_parts_unchecked(shape, vec![value; shape.size()]))
    }

    /// Square identity matrix of size `n`
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_fn(&[n, n], |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Tensor whose element `(i, j)` is `f(i, j)`
    pub fn from_fn<F>(dims: &[usize], mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let shape = valid_2d(dims)?;
        let mut data = Vec::with_capacity(shape.size());
        for i in 0..shape.rows {
            for j in 0..shape.cols {
                data.push(f(i, j));
            }
        }
        Ok(Self::from_parts_unchecked(shape, data))
    }

    /// Declared shape
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Declared dims as `(rows, cols)`
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        self.shape.as_tuple()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Number of elements (product of dims)
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Row `i` as a slice
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let cols = self.shape.cols;
        &self.data[i * cols..(i + 1) * cols]
    }

    /// Element `(i, j)`
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range. Use [`Tensor::get`] for a
    /// checked lookup.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.row(i)[j]
    }

    /// Element `(i, j)`, or `None` when out of range
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.shape.rows && j < self.shape.cols {
            self.data.get(i * self.shape.cols + j).copied()
        } else {
            None
        }
    }

    /// Element `(0, 0)`
    #[inline]
    pub fn first(&self) -> f64 {
        self.at(0, 0)
    }

    /// Row-major flat view of the data
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Iterate over rows
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks(self.shape.cols.max(1)).take(self.shape.rows)
    }

    /// Copy out as nested rows
    pub fn to_vec2(&self) -> Vec<Vec<f64>> {
        self.rows_iter().map(<[f64]>::to_vec).collect()
    }

    /// Consume the tensor, returning the flat row-major data
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Same shape and every pair of elements within `tol`
    pub fn approx_eq(&self, other: &Tensor, tol: f64) -> bool {
        self.shape == other.shape
            && self.data.len() == other.data.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a == b || (a - b).abs() <= tol)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Tensor {
    type Error = TensorError;

    fn try_from(data: Vec<Vec<f64>>) -> Result<Self> {
        Tensor::new(data)
    }
}

impl Index<(usize, usize)> for Tensor {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.row(i)[j]
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
