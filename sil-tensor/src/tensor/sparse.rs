//! # Sparse View and Sparse Matrix Multiplication
//!
//! A [`SparseView`] is a transient coordinate map `(row, col) -> value`
//! holding only the non-zero entries of a tensor. It is derived on demand
//! and never stored alongside the tensor.
//!
//! Sparse matmul walks the non-zero entries of the left operand in
//! row-major order and pairs each `(i, k)` with the non-zero entries of row
//! `k` of the right operand. Each output cell therefore accumulates its terms
//! in ascending `k`, exactly like the dense loop, so results match dense
//! matmul for finite inputs. Products of zero with a non-finite value
//! (`0 * inf`) are skipped here while the dense path turns them into NaN.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::Tensor;
use crate::error::Result;
use crate::shape::{valid_for_matmul, Shape};

/// Coordinate map of the non-zero entries of a tensor
#[derive(Debug, Clone, PartialEq)]
pub struct SparseView {
    shape: Shape,
    entries: BTreeMap<(usize, usize), f64>,
}

impl SparseView {
    /// Declared shape of the source tensor
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Fraction of non-zero entries, `0.0` for a zero-sized shape
    pub fn density(&self) -> f64 {
        if self.shape.size() == 0 {
            return 0.0;
        }
        self.nnz() as f64 / self.shape.size() as f64
    }

    /// Value at `(i, j)`, zero when absent
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries.get(&(i, j)).copied().unwrap_or(0.0)
    }

    /// Non-zero entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.entries.iter().map(|(&coord, &v)| (coord, v))
    }

    /// Rebuild the dense tensor
    pub fn to_dense(&self) -> Tensor {
        let mut data = vec![0.0; self.shape.size()];
        for (&(i, j), &v) in &self.entries {
            data[i * self.shape.cols + j] = v;
        }
        Tensor::from_parts_unchecked(self.shape, data)
    }

    /// Matrix product of two sparse views
    pub fn matmul(&self, other: &SparseView) -> Result<Tensor> {
        valid_for_matmul(self.shape, other.shape)?;

        let (m, n) = (self.shape.rows, other.shape.cols);

        // Right operand bucketed by row, columns ascending
        let mut right_rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); other.shape.rows];
        for (&(k, j), &v) in &other.entries {
            right_rows[k].push((j, v));
        }

        let mut data = vec![0.0; m * n];
        for (&(i, k), &a) in &self.entries {
            for &(j, b) in &right_rows[k] {
                data[i * n + j] += a * b;
            }
        }

        Ok(Tensor::from_parts_unchecked(Shape::new(m, n), data))
    }
}

impl Tensor {
    /// Extract the non-zero entries as a coordinate map
    pub fn sparse(&self) -> SparseView {
        let cols = self.cols().max(1);
        let entries: BTreeMap<(usize, usize), f64> = self
            .data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(idx, &v)| ((idx / cols, idx % cols), v))
            .collect();
        trace!(shape = %self.shape, nnz = entries.len(), "sparse view extracted");

        SparseView {
            shape: self.shape,
            entries,
        }
    }

    /// Matrix product computed over non-zero coordinates only
    ///
    /// Returns a `Tensor`, same as [`Tensor::matmul`].
    pub fn sparse_matmul(&self, other: &Tensor) -> Result<Tensor> {
        valid_for_matmul(self.shape, other.shape)?;
        let left = self.sparse();
        let right = other.sparse();
        debug!(
            left = %self.shape,
            right = %other.shape,
            left_nnz = left.nnz(),
            right_nnz = right.nnz(),
            "sparse matmul"
        );
        left.matmul(&right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensorError;

    #[test]
    fn test_sparse_omits_zeros() {
        let t = Tensor::new(vec![vec![0.0, 2.0], vec![-3.0, 0.0]]).unwrap();
        let s = t.sparse();
        assert_eq!(s.nnz(), 2);
        assert_eq!(s.density(), 0.5);
        assert_eq!(s.get(0, 1), 2.0);
        assert_eq!(s.get(1, 0), -3.0);
        assert_eq!(s.get(0, 0), 0.0);
        assert_eq!(
            s.iter().collect::<Vec<_>>(),
            vec![((0, 1), 2.0), ((1, 0), -3.0)]
        );
        assert_eq!(s.to_dense(), t);
    }

    #[test]
    fn test_sparse_matmul_matches_dense() {
        let a = Tensor::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Tensor::new(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap();
        assert_eq!(a.sparse_matmul(&b).unwrap(), a.matmul(&b).unwrap());
    }

    #[test]
    fn test_sparse_matmul_partial_and_zero() {
        let a = Tensor::new(vec![vec![0.0, 0.0, 1.5], vec![0.0, 0.0, 0.0]]).unwrap();
        let b = Tensor::new(vec![vec![2.0, 0.0], vec![0.0, 0.0], vec![0.0, -4.0]]).unwrap();
        let c = a.sparse_matmul(&b).unwrap();
        assert_eq!(c, a.matmul(&b).unwrap());
        assert_eq!(c.to_vec2(), vec![vec![0.0, -6.0], vec![0.0, 0.0]]);

        let z = Tensor::zeros(&[2, 3]).unwrap();
        assert_eq!(z.sparse_matmul(&b).unwrap(), Tensor::zeros(&[2, 2]).unwrap());
    }

    #[test]
    fn test_sparse_matmul_incompatible() {
        let a = Tensor::ones(&[2, 3]).unwrap();
        let b = Tensor::ones(&[2, 2]).unwrap();
        assert!(matches!(
            a.sparse_matmul(&b),
            Err(TensorError::IncompatibleShape { .. })
        ));
    }

    #[test]
    fn test_unchecked_surplus_data_follows_declared_shape() {
        let a = Tensor::from_parts_unchecked(
            Shape::new(2, 2),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        let b = Tensor::identity(2).unwrap();

        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.sparse().nnz(), 4);
        assert_eq!(a.sparse_matmul(&b).unwrap(), a.matmul(&b).unwrap());

        let flat = a.flatten();
        assert_eq!(flat.dims(), (1, 4));
        assert_eq!(flat.as_slice().len(), 4);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[2.0, 2.0, 3.0, 5.0]);
    }
}
