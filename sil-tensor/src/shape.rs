//! # Shape and Validation Primitives
//!
//! A tensor's `dims` is always a `(rows, cols)` pair. Callers that hold a
//! generic dims sequence go through [`valid_2d`], which rejects anything that
//! is not rank 2.
//!
//! The remaining checks compare the declared shapes of the participating
//! tensors. They never look at the data itself.

use std::fmt;

use crate::error::{Result, TensorError};

/// Rank-2 shape: `(rows, cols)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Create a shape without validating it
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of elements (product of dims)
    #[inline]
    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// Shape with rows and cols swapped
    #[inline]
    pub const fn transposed(&self) -> Self {
        Self::new(self.cols, self.rows)
    }

    /// `(rows, cols)` as a tuple
    #[inline]
    pub const fn as_tuple(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = TensorError;

    fn try_from(dims: &[usize]) -> Result<Self> {
        valid_2d(dims)
    }
}

/// Validate a generic dims sequence as a rank-2 shape
///
/// Empty dims and zero-sized axes are construction errors; any other
/// length than 2 is a rank error.
pub fn valid_2d(dims: &[usize]) -> Result<Shape> {
    match dims {
        [] => Err(TensorError::Construction("dims must not be empty".into())),
        [rows, cols] => {
            let (rows, cols) = (*rows, *cols);
            if rows == 0 || cols == 0 {
                return Err(TensorError::Construction(format!(
                    "dims must be positive, got ({}, {})",
                    rows, cols
                )));
            }
            Ok(Shape::new(rows, cols))
        }
        other => Err(TensorError::Rank(other.len())),
    }
}

/// Require identical shapes (tensor-tensor elementwise ops)
pub fn same_dims(left: Shape, right: Shape) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(TensorError::DimensionMismatch { left, right })
    }
}

/// Require `cols(left) == rows(right)`
pub fn valid_for_matmul(left: Shape, right: Shape) -> Result<()> {
    if left.cols == right.rows {
        Ok(())
    } else {
        Err(TensorError::IncompatibleShape { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_2d() {
        assert_eq!(valid_2d(&[2, 3]).unwrap(), Shape::new(2, 3));
        assert_eq!(valid_2d(&[4]).unwrap_err(), TensorError::Rank(1));
        assert_eq!(valid_2d(&[2, 2, 2]).unwrap_err(), TensorError::Rank(3));
        assert!(matches!(valid_2d(&[]), Err(TensorError::Construction(_))));
        assert!(matches!(valid_2d(&[0, 3]), Err(TensorError::Construction(_))));
    }

    #[test]
    fn test_try_from_slice() {
        let dims: &[usize] = &[3, 1];
        let shape = Shape::try_from(dims).unwrap();
        assert_eq!(shape.as_tuple(), (3, 1));
        assert_eq!(shape.size(), 3);
        assert_eq!(shape.transposed(), Shape::new(1, 3));
    }

    #[test]
    fn test_same_dims() {
        assert!(same_dims(Shape::new(2, 3), Shape::new(2, 3)).is_ok());
        assert_eq!(
            same_dims(Shape::new(2, 3), Shape::new(3, 2)).unwrap_err(),
            TensorError::DimensionMismatch {
                left: Shape::new(2, 3),
                right: Shape::new(3, 2),
            }
        );
    }

    #[test]
    fn test_valid_for_matmul() {
        assert!(valid_for_matmul(Shape::new(2, 3), Shape::new(3, 5)).is_ok());
        assert!(matches!(
            valid_for_matmul(Shape::new(2, 3), Shape::new(2, 2)),
            Err(TensorError::IncompatibleShape { .. })
        ));
    }
}
