//! # Loss Functions
//!
//! | Function | Per-element value |
//! |----------|-------------------|
//! | `mse` | `(ŷ - y)²` |
//! | `bce` | `-(y·ln(p) + (1 - y)·ln(1 - p))`, `p = clip(ŷ, ε, 1 - ε)` |
//!
//! ## Implementation Notes
//!
//! Both functions return a per-element tensor. No mean is taken, despite the
//! conventional name of `mse`. Reduce with [`Reduction`] or
//! [`Tensor::mean`] when a scalar is needed.
//!
//! Everything here is composed from the tensor's public arithmetic and
//! mapping operations.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorError};
use crate::tensor::Tensor;

/// Clipping bound applied to predictions before `ln` in [`bce`]
pub const BCE_EPSILON: f64 = 1e-15;

/// Squared error per element: `(y_hat - y)²`
pub fn mse(y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
    Ok(y_hat.sub(y)?.square())
}

/// Derivative of [`mse`] with respect to `y_hat`: `2·(y_hat - y)`
pub fn d_mse(y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
    Ok(y_hat.sub(y)?.mul_scalar(2.0))
}

/// Binary cross-entropy per element
///
/// `y_hat` is clipped into `[ε, 1 - ε]` first so `ln` never sees zero.
pub fn bce(y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
    let p = y_hat.clip(BCE_EPSILON, 1.0 - BCE_EPSILON);
    let positive = y.mul(&p.ln())?;
    let negative = y.rsub_scalar(1.0).mul(&p.rsub_scalar(1.0).ln())?;
    Ok(-&positive.add(&negative)?)
}

/// Derivative of [`bce`] with respect to `y_hat`: `(p - y) / (p·(1 - p))`
pub fn d_bce(y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
    let p = y_hat.clip(BCE_EPSILON, 1.0 - BCE_EPSILON);
    let denom = p.mul(&p.rsub_scalar(1.0))?;
    p.sub(y)?.div(&denom)
}

/// How a per-element loss collapses to a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    /// Keep the per-element tensor
    None,
    Sum,
    #[default]
    Mean,
}

impl Reduction {
    /// Collapse `loss` to a scalar
    ///
    /// `Reduction::None` has no scalar form and is rejected.
    pub fn reduce(&self, loss: &Tensor) -> Result<f64> {
        match self {
            Reduction::None => Err(TensorError::Config(
                "reduction 'none' keeps the per-element tensor".into(),
            )),
            Reduction::Sum => Ok(loss.sum()),
            Reduction::Mean => Ok(loss.mean()),
        }
    }
}

/// Loss selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFn {
    Mse,
    Bce,
}

impl LossFn {
    /// Per-element loss
    pub fn compute(&self, y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
        match self {
            LossFn::Mse => mse(y_hat, y),
            LossFn::Bce => bce(y_hat, y),
        }
    }

    /// Per-element derivative with respect to `y_hat`
    pub fn derivative(&self, y_hat: &Tensor, y: &Tensor) -> Result<Tensor> {
        match self {
            LossFn::Mse => d_mse(y_hat, y),
            LossFn::Bce => d_bce(y_hat, y),
        }
    }

    /// Loss reduced to a scalar
    pub fn reduced(&self, y_hat: &Tensor, y: &Tensor, reduction: Reduction) -> Result<f64> {
        reduction.reduce(&self.compute(y_hat, y)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(rows: Vec<Vec<f64>>) -> Tensor {
        Tensor::new(rows).unwrap()
    }

    #[test]
    fn test_mse_per_element() {
        let y_hat = t(vec![vec![1.0, 2.0, 3.0]]);
        let y = t(vec![vec![2.0, 4.0, 6.0]]);
        assert_eq!(mse(&y_hat, &y).unwrap(), t(vec![vec![1.0, 4.0, 9.0]]));
        assert_eq!(d_mse(&y_hat, &y).unwrap(), t(vec![vec![-2.0, -4.0, -6.0]]));
    }

    #[test]
    fn test_mse_shape_mismatch() {
        let a = Tensor::ones(&[1, 3]).unwrap();
        let b = Tensor::ones(&[3, 1]).unwrap();
        assert!(matches!(
            mse(&a, &b),
            Err(TensorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_bce_values() {
        let y_hat = t(vec![vec![0.5, 0.9]]);
        let y = t(vec![vec![1.0, 0.0]]);
        let loss = bce(&y_hat, &y).unwrap();
        assert!((loss.at(0, 0) - 2.0f64.ln()).abs() < 1e-12);
        assert!((loss.at(0, 1) - (-(0.1f64).ln())).abs() < 1e-12);
    }

    #[test]
    fn test_bce_clips_extremes() {
        let y_hat = t(vec![vec![0.0, 1.0, 0.0, 1.0]]);
        let y = t(vec![vec![0.0, 1.0, 1.0, 0.0]]);
        let loss = bce(&y_hat, &y).unwrap();
        assert!(loss.iter().all(f64::is_finite));
        assert!(loss.at(0, 0) < 1e-12);
        assert!(loss.at(0, 1) < 1e-12);
        // -ln(1e-15) ≈ 34.54
        assert!((loss.at(0, 2) - 34.538776394910684).abs() < 1e-6);
        assert!(loss.at(0, 3) > 30.0);
    }

    #[test]
    fn test_d_bce() {
        let y_hat = t(vec![vec![0.5, 0.25]]);
        let y = t(vec![vec![1.0, 0.0]]);
        let grad = d_bce(&y_hat, &y).unwrap();
        assert!((grad.at(0, 0) + 2.0).abs() < 1e-12);
        assert!((grad.at(0, 1) - 0.25 / 0.1875).abs() < 1e-12);
    }

    #[test]
    fn test_reduction() {
        let loss = t(vec![vec![1.0, 4.0, 9.0]]);
        assert_eq!(Reduction::Sum.reduce(&loss).unwrap(), 14.0);
        assert!((Reduction::Mean.reduce(&loss).unwrap() - 14.0 / 3.0).abs() < 1e-12);
        assert!(Reduction::None.reduce(&loss).is_err());
        assert_eq!(Reduction::default(), Reduction::Mean);
    }

    #[test]
    fn test_loss_fn_dispatch() {
        let y_hat = t(vec![vec![1.0, 2.0, 3.0]]);
        let y = t(vec![vec![2.0, 4.0, 6.0]]);
        assert_eq!(LossFn::Mse.compute(&y_hat, &y).unwrap(), mse(&y_hat, &y).unwrap());
        assert_eq!(LossFn::Mse.reduced(&y_hat, &y, Reduction::Sum).unwrap(), 14.0);
        assert_eq!(
            LossFn::Mse.derivative(&y_hat, &y).unwrap(),
            d_mse(&y_hat, &y).unwrap()
        );

        let probs = t(vec![vec![0.5]]);
        let target = t(vec![vec![1.0]]);
        let reduced = LossFn::Bce.reduced(&probs, &target, Reduction::Mean).unwrap();
        assert!((reduced - 2.0f64.ln()).abs() < 1e-12);
    }
}
