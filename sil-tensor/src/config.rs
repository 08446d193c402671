//! Configuration for initializers and matrix multiplication

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorError};
use crate::init::InitScheme;

/// Weight initializer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Scheme used by `Initializer::generate_default`
    pub scheme: InitScheme,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Probability of a zero entry for [`InitScheme::Sparse`]
    pub sparsity: f64,
    /// Upper bound (exclusive) for [`InitScheme::Uniform`]
    pub range: f64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            scheme: InitScheme::Glorot,
            seed: None,
            sparsity: 0.5,
            range: 1.0,
        }
    }
}

impl InitConfig {
    /// Seeded configuration with default scheme
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: InitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sparsity) {
            return Err(TensorError::Config(format!(
                "sparsity must be within [0, 1], got {}",
                self.sparsity
            )));
        }
        if !self.range.is_finite() || self.range < 0.0 {
            return Err(TensorError::Config(format!(
                "range must be finite and non-negative, got {}",
                self.range
            )));
        }
        Ok(())
    }
}

/// Matrix multiplication algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatmulStrategy {
    /// Triple-loop accumulation
    Dense,
    /// Coordinate-map accumulation over non-zero entries
    Sparse,
    /// Pick by left-operand density
    Auto,
}

/// Matrix multiplication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatmulConfig {
    pub strategy: MatmulStrategy,
    /// `Auto` takes the sparse path at or below this non-zero density
    pub sparse_density_threshold: f64,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        Self {
            strategy: MatmulStrategy::Auto,
            sparse_density_threshold: 0.3,
        }
    }
}

impl MatmulConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatmulConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sparse_density_threshold) {
            return Err(TensorError::Config(format!(
                "sparse_density_threshold must be within [0, 1], got {}",
                self.sparse_density_threshold
            )));
        }
        Ok(())
    }
}
