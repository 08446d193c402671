//! Dense matrix multiplication
//!
//! `C[i][j] = Σ_k A[i][k] * B[k][j]`, accumulated with `k` ascending.
//! Complexity is O(rows(A) · cols(B) · cols(A)).

use tracing::debug;

use super::Tensor;
use crate::config::{MatmulConfig, MatmulStrategy};
use crate::error::Result;
use crate::shape::{valid_for_matmul, Shape};

impl Tensor {
    /// Dense matrix product `self × other`
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor> {
        valid_for_matmul(self.shape, other.shape)?;
        debug!(left = %self.shape, right = %other.shape, "dense matmul");

        let (m, n) = (self.rows(), other.cols());
        let mut data = Vec::with_capacity(m * n);

        for i in 0..m {
            let a_row = self.row(i);
            for j in 0..n {
                let mut sum = 0.0;
                for (k, &a) in a_row.iter().enumerate() {
                    sum += a * other.at(k, j);
                }
                data.push(sum);
            }
        }

        Ok(Tensor::from_parts_unchecked(Shape::new(m, n), data))
    }

    /// Matrix product using the strategy selected by `config`
    ///
    /// With [`MatmulStrategy::Auto`] the sparse path is taken when the left
    /// operand's non-zero density is at or below the configured threshold.
    pub fn matmul_with(&self, other: &Tensor, config: &MatmulConfig) -> Result<Tensor> {
        match config.strategy {
            MatmulStrategy::Dense => self.matmul(other),
            MatmulStrategy::Sparse => self.sparse_matmul(other),
            MatmulStrategy::Auto => {
                valid_for_matmul(self.shape, other.shape)?;
                let density = self.density();
                let use_sparse = density <= config.sparse_density_threshold;
                debug!(
                    density,
                    threshold = config.sparse_density_threshold,
                    use_sparse,
                    "matmul strategy selected"
                );
                if use_sparse {
                    self.sparse_matmul(other)
                } else {
                    self.matmul(other)
                }
            }
        }
    }

    /// Fraction of non-zero elements, `0.0` for a zero-sized shape
    pub fn density(&self) -> f64 {
        if self.size() == 0 {
            return 0.0;
        }
        let nnz = self.data.iter().filter(|&&x| x != 0.0).count();
        nnz as f64 / self.size() as f64
    }
}
