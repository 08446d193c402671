//! # Activation Functions
//!
//! Stateless elementwise non-linearities and their derivatives.
//!
//! ## Functions
//!
//! | Function | Formula | Derivative |
//! |----------|---------|------------|
//! | `relu` | `max(0, x)` | `1` if `x > 0` else `0` |
//! | `leaky_relu` | `x` if `x > 0` else `0.01·x` | `1` if `x > 0` else `0.01` |
//! | `sigmoid` | `1 / (1 + e^(-x))` | `σ(x)·(1 - σ(x))` |
//! | `tanh` | `tanh(x)` | `1 - tanh(x)²` |
//!
//! ## Scalar or Tensor
//!
//! Every function is generic over [`Elementwise`]: an `f64` yields an `f64`,
//! a `Tensor` (owned or borrowed) yields a `Tensor` of the same shape built
//! with [`Tensor::map`]. [`Value`] covers callers that only know at runtime
//! which of the two they hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorError};
use crate::tensor::Tensor;

/// Negative-branch slope of `leaky_relu`
pub const LEAKY_RELU_SLOPE: f64 = 0.01;

/// Input accepted by the activation functions
pub trait Elementwise {
    type Output;

    /// Apply `f` to the scalar, or to every element of the tensor
    fn apply<F: Fn(f64) -> f64>(self, f: F) -> Self::Output;
}

impl Elementwise for f64 {
    type Output = f64;

    #[inline]
    fn apply<F: Fn(f64) -> f64>(self, f: F) -> f64 {
        f(self)
    }
}

impl Elementwise for &Tensor {
    type Output = Tensor;

    fn apply<F: Fn(f64) -> f64>(self, f: F) -> Tensor {
        self.map(f)
    }
}

impl Elementwise for Tensor {
    type Output = Tensor;

    fn apply<F: Fn(f64) -> f64>(self, f: F) -> Tensor {
        self.map(f)
    }
}

/// Scalar or tensor, dispatched at the call site
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Tensor(Tensor),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            Value::Tensor(_) => None,
        }
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Value::Scalar(_) => None,
            Value::Tensor(t) => Some(t),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl From<Tensor> for Value {
    fn from(t: Tensor) -> Self {
        Value::Tensor(t)
    }
}

impl Elementwise for &Value {
    type Output = Value;

    fn apply<F: Fn(f64) -> f64>(self, f: F) -> Value {
        match self {
            Value::Scalar(x) => Value::Scalar(f(*x)),
            Value::Tensor(t) => Value::Tensor(t.map(f)),
        }
    }
}

impl Elementwise for Value {
    type Output = Value;

    fn apply<F: Fn(f64) -> f64>(self, f: F) -> Value {
        (&self).apply(f)
    }
}

/// Activation selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    LeakyRelu,
    Sigmoid,
    Tanh,
    Identity,
}

impl Activation {
    /// Scalar formula
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_RELU_SLOPE * x
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Identity => x,
        }
    }

    /// Scalar derivative
    pub fn eval_derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    LEAKY_RELU_SLOPE
                }
            }
            Activation::Sigmoid => {
                let s = Activation::Sigmoid.eval(x);
                s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Identity => 1.0,
        }
    }

    /// Apply to a scalar or every element of a tensor
    pub fn apply<T: Elementwise>(&self, x: T) -> T::Output {
        let act = *self;
        x.apply(move |v| act.eval(v))
    }

    /// Derivative applied to a scalar or every element of a tensor
    pub fn derivative<T: Elementwise>(&self, x: T) -> T::Output {
        let act = *self;
        x.apply(move |v| act.eval_derivative(v))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::LeakyRelu => "leaky_relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Identity => "identity",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "relu" => Ok(Activation::Relu),
            "leaky_relu" | "leakyrelu" => Ok(Activation::LeakyRelu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "identity" | "linear" | "none" => Ok(Activation::Identity),
            other => Err(TensorError::Config(format!("unknown activation: {}", other))),
        }
    }
}

/// ReLU: `max(0, x)`
pub fn relu<T: Elementwise>(x: T) -> T::Output {
    Activation::Relu.apply(x)
}

pub fn d_relu<T: Elementwise>(x: T) -> T::Output {
    Activation::Relu.derivative(x)
}

/// Leaky ReLU with slope [`LEAKY_RELU_SLOPE`] for non-positive inputs
pub fn leaky_relu<T: Elementwise>(x: T) -> T::Output {
    Activation::LeakyRelu.apply(x)
}

pub fn d_leaky_relu<T: Elementwise>(x: T) -> T::Output {
    Activation::LeakyRelu.derivative(x)
}

/// Logistic sigmoid: `1 / (1 + e^(-x))`
pub fn sigmoid<T: Elementwise>(x: T) -> T::Output {
    Activation::Sigmoid.apply(x)
}

/// `sigmoid(x) · (1 - sigmoid(x))`
pub fn d_sigmoid<T: Elementwise>(x: T) -> T::Output {
    Activation::Sigmoid.derivative(x)
}

/// Hyperbolic tangent
pub fn tanh<T: Elementwise>(x: T) -> T::Output {
    Activation::Tanh.apply(x)
}

/// `1 - tanh(x)²`
pub fn d_tanh<T: Elementwise>(x: T) -> T::Output {
    Activation::Tanh.derivative(x)
}
