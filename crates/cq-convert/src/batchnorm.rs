//! BatchNorm folding (§4.5).
//!
//! Folds a per-channel BatchNorm (γ, β, μ, σ², ε) into the preceding
//! layer's weight matrix and bias, producing a single affine transform
//! with no runtime normalization step. All arithmetic is carried out
//! in f64 and stored back to f32.

use cq_error::{CqError, Result};
use cq_hash::{sha256_concat, Digest32};
use cq_types::FaultSet;

/// Per-channel BatchNorm parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchNormParams {
    pub gamma: Vec<f32>,
    pub beta: Vec<f32>,
    pub mean: Vec<f32>,
    pub variance: Vec<f32>,
    pub epsilon: f64,
}

/// The result of folding: a new weight matrix and bias vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedWeights {
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

/// A tamper-evident record of one folding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldingRecord {
    pub before_hash: Digest32,
    pub after_hash: Digest32,
    pub folding_occurred: bool,
}

fn bytes_of_f32_slice(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Fold BatchNorm parameters into `weights` (`rows` × `cols`, row-major)
/// and an optional `bias` (defaults to all-zero). Returns the folded
/// weights/bias along with a tamper-evident before/after record.
///
/// # Errors
/// Returns [`CqError::ShapeMismatch`] if `weights` is not `rows * cols`
/// long, or if `bn.gamma`, `bn.beta`, `bn.mean`, `bn.variance`, or a
/// `Some` `bias` does not have exactly one entry per row. Returns
/// [`CqError::DivisionByZero`] if `variance[i] + epsilon <= 0` for any
/// channel `i`, setting [`FaultSet::DIV_ZERO`] in `faults`.
pub fn fold_batchnorm(
    bn: &BatchNormParams,
    weights: &[f32],
    rows: usize,
    cols: usize,
    bias: Option<&[f32]>,
    faults: &mut FaultSet,
) -> Result<(FoldedWeights, FoldingRecord)> {
    if weights.len() != rows * cols {
        return Err(CqError::ShapeMismatch {
            what: "weights",
            expected: rows * cols,
            actual: weights.len(),
        });
    }
    if bn.gamma.len() != rows {
        return Err(CqError::ShapeMismatch {
            what: "gamma",
            expected: rows,
            actual: bn.gamma.len(),
        });
    }
    if bn.beta.len() != rows {
        return Err(CqError::ShapeMismatch {
            what: "beta",
            expected: rows,
            actual: bn.beta.len(),
        });
    }
    if bn.mean.len() != rows {
        return Err(CqError::ShapeMismatch {
            what: "mean",
            expected: rows,
            actual: bn.mean.len(),
        });
    }
    if bn.variance.len() != rows {
        return Err(CqError::ShapeMismatch {
            what: "variance",
            expected: rows,
            actual: bn.variance.len(),
        });
    }
    if let Some(b) = bias {
        if b.len() != rows {
            return Err(CqError::ShapeMismatch {
                what: "bias",
                expected: rows,
                actual: b.len(),
            });
        }
    }

    let zero_bias = vec![0.0_f32; rows];
    let bias_in: &[f32] = bias.unwrap_or(&zero_bias);

    let epsilon_bytes = bn.epsilon.to_le_bytes();
    let before_hash = sha256_concat(&[
        &bytes_of_f32_slice(&bn.gamma),
        &bytes_of_f32_slice(&bn.beta),
        &bytes_of_f32_slice(&bn.mean),
        &bytes_of_f32_slice(&bn.variance),
        &epsilon_bytes,
    ]);

    let mut scale = vec![0.0_f64; rows];
    let mut offset = vec![0.0_f64; rows];
    for i in 0..rows {
        let var_plus_eps = f64::from(bn.variance[i]) + bn.epsilon;
        if var_plus_eps <= 0.0 {
            faults.insert(FaultSet::DIV_ZERO);
            return Err(CqError::DivisionByZero {
                context: "batchnorm folding: variance + epsilon <= 0",
            });
        }
        let inv_std = 1.0 / var_plus_eps.sqrt();
        scale[i] = f64::from(bn.gamma[i]) * inv_std;
        offset[i] = f64::from(bn.beta[i]) - f64::from(bn.mean[i]) * scale[i];
    }

    let mut folded_weights = vec![0.0_f32; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            let idx = i * cols + j;
            folded_weights[idx] = (f64::from(weights[idx]) * scale[i]) as f32;
        }
    }
    let folded_bias: Vec<f32> = (0..rows)
        .map(|i| (f64::from(bias_in[i]) * scale[i] + offset[i]) as f32)
        .collect();

    let after_hash = sha256_concat(&[
        &bytes_of_f32_slice(&folded_weights),
        &bytes_of_f32_slice(&folded_bias),
    ]);

    let record = FoldingRecord {
        before_hash,
        after_hash,
        folding_occurred: true,
    };

    Ok((
        FoldedWeights {
            weights: folded_weights,
            bias: folded_bias,
        },
        record,
    ))
}
