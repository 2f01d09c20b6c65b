//! Static-analysis context (§3): the accumulated result of running the
//! error recurrence across every layer of a model.

use crate::fault::FaultSet;
use crate::layer::LayerErrorContract;

/// Full static-analysis result for a model.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisContext {
    /// Entry (ingress) quantization error, `ε₀ = 1/(2·S_in)`.
    pub entry_error: f64,
    /// Ordered sequence of per-layer error contracts.
    pub layers: Vec<LayerErrorContract>,
    /// End-to-end theoretical error bound: the final layer's output
    /// bound, or `entry_error` when there are zero layers.
    pub total_bound: f64,
    /// `true` once every layer in the model has been analyzed.
    pub is_complete: bool,
    /// `true` unless an asymmetric spec or other invalidating condition
    /// was encountered, in which case no digest is ever produced.
    pub is_valid: bool,
    /// Faults accumulated while analyzing every layer.
    pub faults: FaultSet,
}

impl AnalysisContext {
    /// The number of layers analyzed so far.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The number of layers whose overflow proof is safe.
    #[must_use]
    pub fn overflow_safe_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| l.overflow_proof.is_safe)
            .count()
    }

    /// An empty, valid context seeded only with the entry error — the
    /// starting point before any layer has been analyzed.
    #[must_use]
    pub fn seed(entry_error: f64) -> Self {
        Self {
            entry_error,
            layers: Vec::new(),
            total_bound: entry_error,
            is_complete: false,
            is_valid: true,
            faults: FaultSet::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overflow::OverflowProof;

    #[test]
    fn seed_has_total_bound_equal_to_entry_error() {
        let ctx = AnalysisContext::seed(1.0 / 131_072.0);
        assert_eq!(ctx.total_bound, ctx.entry_error);
        assert_eq!(ctx.layer_count(), 0);
    }

    #[test]
    fn overflow_safe_count_filters_unsafe_layers() {
        let mut ctx = AnalysisContext::seed(0.0001);
        ctx.layers.push(LayerErrorContract {
            amplification_factor: 1.0,
            weight_error: 0.0,
            bias_error: 0.0,
            proj_error: 0.0,
            input_bound: 0.0001,
            output_bound: 0.0001,
            overflow_proof: OverflowProof {
                max_weight_mag: 1,
                max_input_mag: 1,
                dot_product_len: 1,
                safety_margin: 1,
                is_safe: true,
            },
        });
        ctx.layers.push(LayerErrorContract {
            amplification_factor: 1.0,
            weight_error: 0.0,
            bias_error: 0.0,
            proj_error: 0.0,
            input_bound: 0.0001,
            output_bound: 0.0001,
            overflow_proof: OverflowProof {
                max_weight_mag: u32::MAX,
                max_input_mag: u32::MAX,
                dot_product_len: u32::MAX,
                safety_margin: 0,
                is_safe: false,
            },
        });
        assert_eq!(ctx.overflow_safe_count(), 1);
        assert_eq!(ctx.layer_count(), 2);
    }
}
