//! Error types for sil-tensor

use thiserror::Error;

use crate::shape::Shape;

/// Result type for sil-tensor operations
pub type Result<T> = std::result::Result<T, TensorError>;

/// sil-tensor error types
///
/// Every variant is a fail-fast validation error raised at the offending call.
/// Nothing here is retried or partially recovered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: Shape, right: Shape },

    #[error("Rank error: expected rank 2, got rank {0}")]
    Rank(usize),

    #[error("Incompatible shapes for matmul: {left} x {right}")]
    IncompatibleShape { left: Shape, right: Shape },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TensorError {
    fn from(err: serde_json::Error) -> Self {
        TensorError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TensorError::DimensionMismatch {
            left: Shape::new(2, 3),
            right: Shape::new(3, 2),
        };
        assert_eq!(err.to_string(), "Dimension mismatch: (2, 3) vs (3, 2)");

        let err = TensorError::Rank(3);
        assert_eq!(err.to_string(), "Rank error: expected rank 2, got rank 3");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: TensorError = parse.unwrap_err().into();
        assert!(matches!(err, TensorError::Config(_)));
    }
}
