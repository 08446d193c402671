//! # Weight Initializers
//!
//! Produce raw `f_in × f_out` arrays to seed [`Tensor`] construction.
//!
//! | Scheme | Entry |
//! |--------|-------|
//! | `zero` | `0.0` |
//! | `glorot` | `u · sqrt(2 / (f_in + f_out))` |
//! | `he` | `u · sqrt(2 / f_in)` |
//! | `lecun` | `u · sqrt(1 / f_in)` |
//! | `sparse` | `0.0` with probability `sparsity`, else a fresh `u` |
//! | `uniform` | `u · range` |
//! | `identity` | `1.0` on the diagonal of an `f_in × f_in` matrix |
//!
//! `u` is a single uniform draw from `[0, 1)`.
//!
//! ## Implementation Notes
//!
//! The variance-scaled schemes multiply one `[0, 1)` draw by the standard
//! deviation factor. They do not sample a zero-mean Gaussian or a symmetric
//! range, so every weight is non-negative. This differs from textbook
//! Glorot/He/LeCun and is kept as the reference behavior.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::InitConfig;
use crate::error::{Result, TensorError};
use crate::tensor::Tensor;

/// Initialization scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitScheme {
    Zero,
    Glorot,
    He,
    Lecun,
    Sparse,
    Uniform,
    Identity,
}

impl InitScheme {
    pub fn name(&self) -> &'static str {
        match self {
            InitScheme::Zero => "zero",
            InitScheme::Glorot => "glorot",
            InitScheme::He => "he",
            InitScheme::Lecun => "lecun",
            InitScheme::Sparse => "sparse",
            InitScheme::Uniform => "uniform",
            InitScheme::Identity => "identity",
        }
    }
}

impl fmt::Display for InitScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitScheme {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zero" | "zeros" => Ok(InitScheme::Zero),
            "glorot" | "xavier" => Ok(InitScheme::Glorot),
            "he" | "kaiming" => Ok(InitScheme::He),
            "lecun" => Ok(InitScheme::Lecun),
            "sparse" => Ok(InitScheme::Sparse),
            "uniform" => Ok(InitScheme::Uniform),
            "identity" | "eye" => Ok(InitScheme::Identity),
            other => Err(TensorError::Config(format!(
                "unknown init scheme: {}",
                other
            ))),
        }
    }
}

/// Glorot standard deviation factor
#[inline]
pub fn glorot_std(f_in: usize, f_out: usize) -> f64 {
    (2.0 / (f_in + f_out) as f64).sqrt()
}

/// He standard deviation factor
#[inline]
pub fn he_std(f_in: usize) -> f64 {
    (2.0 / f_in as f64).sqrt()
}

/// LeCun standard deviation factor
#[inline]
pub fn lecun_std(f_in: usize) -> f64 {
    (1.0 / f_in as f64).sqrt()
}

/// `f_in × f_out` array of zeros
pub fn zero(f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
    vec![vec![0.0; f_out]; f_in]
}

/// `f_in × f_in` identity array
pub fn identity(f_in: usize) -> Vec<Vec<f64>> {
    let mut data = zero(f_in, f_in);
    for (i, row) in data.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    data
}

/// Random weight generator
///
/// Owns its RNG so that a seeded initializer produces the same sequence of
/// arrays on every run.
#[derive(Debug, Clone)]
pub struct Initializer {
    rng: StdRng,
    config: InitConfig,
}

impl Initializer {
    /// Unseeded initializer with default configuration
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy(), InitConfig::default())
    }

    /// Deterministic initializer
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), InitConfig::seeded(seed))
    }

    /// Initializer driven by a validated configuration
    pub fn from_config(config: InitConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(rng, config))
    }

    fn with_rng(rng: StdRng, config: InitConfig) -> Self {
        debug!(scheme = %config.scheme, seed = ?config.seed, "initializer created");
        Self { rng, config }
    }

    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    /// One uniform draw from `[0, 1)`
    #[inline]
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn fill<F>(&mut self, f_in: usize, f_out: usize, mut entry: F) -> Vec<Vec<f64>>
    where
        F: FnMut(&mut Self) -> f64,
    {
        let mut data = Vec::with_capacity(f_in);
        for _ in 0..f_in {
            let mut row = Vec::with_capacity(f_out);
            for _ in 0..f_out {
                row.push(entry(self));
            }
            data.push(row);
        }
        trace!(f_in, f_out, "weights generated");
        data
    }

    fn scaled(&mut self, f_in: usize, f_out: usize, std: f64) -> Vec<Vec<f64>> {
        self.fill(f_in, f_out, |init| init.sample() * std)
    }

    pub fn zero(&self, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        zero(f_in, f_out)
    }

    pub fn glorot(&mut self, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        self.scaled(f_in, f_out, glorot_std(f_in, f_out))
    }

    pub fn he(&mut self, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        self.scaled(f_in, f_out, he_std(f_in))
    }

    pub fn lecun(&mut self, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        self.scaled(f_in, f_out, lecun_std(f_in))
    }

    /// Each entry is zero with probability `sparsity`, else a fresh draw
    ///
    /// `sparsity <= 0` never zeroes, `sparsity >= 1` always does.
    pub fn sparse(&mut self, f_in: usize, f_out: usize, sparsity: f64) -> Vec<Vec<f64>> {
        self.fill(f_in, f_out, |init| {
            if init.sample() < sparsity {
                0.0
            } else {
                init.sample()
            }
        })
    }

    /// Each entry drawn from `[0, range)`
    pub fn uniform(&mut self, f_in: usize, f_out: usize, range: f64) -> Vec<Vec<f64>> {
        self.fill(f_in, f_out, |init| init.sample() * range)
    }

    pub fn identity(&self, f_in: usize) -> Vec<Vec<f64>> {
        identity(f_in)
    }

    /// Dispatch on `scheme`
    ///
    /// `Sparse` and `Uniform` take their parameter from the configuration;
    /// `Identity` ignores `f_out`.
    pub fn generate(&mut self, scheme: InitScheme, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        match scheme {
            InitScheme::Zero => self.zero(f_in, f_out),
            InitScheme::Glorot => self.glorot(f_in, f_out),
            InitScheme::He => self.he(f_in, f_out),
            InitScheme::Lecun => self.lecun(f_in, f_out),
            InitScheme::Sparse => {
                let sparsity = self.config.sparsity;
                self.sparse(f_in, f_out, sparsity)
            }
            InitScheme::Uniform => {
                let range = self.config.range;
                self.uniform(f_in, f_out, range)
            }
            InitScheme::Identity => self.identity(f_in),
        }
    }

    /// Dispatch on the configured scheme
    pub fn generate_default(&mut self, f_in: usize, f_out: usize) -> Vec<Vec<f64>> {
        let scheme = self.config.scheme;
        self.generate(scheme, f_in, f_out)
    }

    /// Generate and wrap into a tensor
    pub fn tensor(&mut self, scheme: InitScheme, f_in: usize, f_out: usize) -> Result<Tensor> {
        Tensor::new(self.generate(scheme, f_in, f_out))
    }
}

impl Default for Initializer {
    fn default() -> Self {
        Self::new()
    }
}
