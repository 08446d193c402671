//! # sil-tensor - Rank-2 Tensor Core for Feed-Forward Networks
//!
//! Numeric foundation for feed-forward neural network experiments.
//!
//! ## Modules
//!
//! - **tensor**: immutable rank-2 `Tensor` (construction, elementwise arithmetic,
//!   dense and sparse matmul, transpose/flatten, map family, introspection)
//! - **shape**: `Shape` and the validation primitives every operation relies on
//! - **init**: weight initializers producing raw arrays (zero, Glorot, He, LeCun,
//!   sparse, uniform, identity)
//! - **activations**: ReLU, Leaky ReLU, sigmoid, tanh and derivatives over
//!   scalars or tensors
//! - **loss**: per-element MSE and binary cross-entropy
//! - **config**: serde-backed initializer and matmul configuration
//!
//! ## Data Flow
//!
//! ```text
//! Initializer ──► Vec<Vec<f64>> ──► Tensor::new ──► activations / loss
//! ```
//!
//! ## Example
//!
//! ```
//! use sil_tensor::prelude::*;
//!
//! let mut init = Initializer::from_seed(42);
//! let w = Tensor::new(init.glorot(3, 2))?;
//! let x = Tensor::new(vec![vec![1.0, 0.5, -1.0]])?;
//!
//! let y_hat = sigmoid(&x.matmul(&w)?);
//! let y = Tensor::new(vec![vec![1.0, 0.0]])?;
//! let loss = LossFn::Bce.reduced(&y_hat, &y, Reduction::Mean)?;
//! assert!(loss.is_finite());
//! # Ok::<(), sil_tensor::TensorError>(())
//! ```

pub mod error;
pub use error::{Result, TensorError};

pub mod shape;
pub use shape::{same_dims, valid_2d, valid_for_matmul, Shape};

pub mod tensor;
pub use tensor::{SparseView, Tensor};

pub mod config;
pub use config::{InitConfig, MatmulConfig, MatmulStrategy};

pub mod init;
pub use init::{InitScheme, Initializer};

pub mod activations;
pub use activations::{Activation, Elementwise, Value};

pub mod loss;
pub use loss::{LossFn, Reduction};


/// Prelude module with common re-exports
pub mod prelude {
    pub use crate::activations::*;
    pub use crate::config::{InitConfig, MatmulConfig, MatmulStrategy};
    pub use crate::error::{Result, TensorError};
    pub use crate::init::{InitScheme, Initializer};
    pub use crate::loss::{bce, d_bce, d_mse, mse, LossFn, Reduction, BCE_EPSILON};
    pub use crate::shape::Shape;
    pub use crate::tensor::{SparseView, Tensor};
}
