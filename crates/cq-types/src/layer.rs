//! Per-layer error contract (§3) produced by static analysis.

use crate::overflow::OverflowProof;

/// Error contract for a single linear layer.
///
/// Invariant: `amplification_factor >= 0` (identity maps take value 1).
/// Invariant: `output_bound >= 0`; it may equal `input_bound` when
/// `amplification_factor == 1` and local contributions vanish, otherwise
/// it strictly grows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerErrorContract {
    /// Operator-norm upper bound on this layer's amplification, `A_l`.
    pub amplification_factor: f64,
    /// Weight-quantization error contribution, `0.5/S_w · ‖x‖`.
    pub weight_error: f64,
    /// Bias-quantization error contribution.
    pub bias_error: f64,
    /// Output-projection rounding error contribution, `0.5/S_out`.
    pub proj_error: f64,
    /// Error bound on this layer's input, `ε_l`.
    pub input_bound: f64,
    /// Error bound on this layer's output, `ε_{l+1}`.
    pub output_bound: f64,
    /// Overflow-safety proof for this layer's accumulator.
    pub overflow_proof: OverflowProof,
}

impl LayerErrorContract {
    /// Sum of the three local (non-propagated) error contributions.
    #[must_use]
    pub fn local_error(&self) -> f64 {
        self.weight_error + self.bias_error + self.proj_error
    }
}
