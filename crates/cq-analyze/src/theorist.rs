//! The Theorist: drives static error analysis layer-by-layer, building
//! an [`AnalysisContext`] left-to-right (§4.3).

use cq_error::{CqError, Result};
use cq_primitives::overflow_safety;
use cq_types::{AnalysisContext, FaultSet, LayerErrorContract};

use crate::config::AnalyzeConfig;
use crate::error::{
    bias_error_contribution, entry_error, local_error, proj_error_contribution, recurrence_step,
    weight_error_contribution,
};

/// Everything the Theorist needs to know about one linear layer in order
/// to extend an [`AnalysisContext`]. Produced by the (out-of-scope)
/// model parser collaborator.
#[derive(Debug, Clone, Copy)]
pub struct LayerSpec {
    /// Operator-norm amplification bound `A_l` for this layer (e.g. from
    /// [`crate::norm::frobenius_norm`]).
    pub amplification_factor: f64,
    /// Maximum input-vector norm `‖x‖` feeding this layer.
    pub max_input_norm: f64,
    /// Weight scale exponent for this layer.
    pub weight_scale_exp: i8,
    /// Input scale exponent feeding this layer.
    pub input_scale_exp: i8,
    /// Output scale exponent produced by this layer.
    pub output_scale_exp: i8,
    /// Maximum absolute weight magnitude, for the overflow proof.
    pub max_weight_mag: u32,
    /// Maximum absolute input magnitude, for the overflow proof.
    pub max_input_mag: u32,
    /// Dot-product length (fan-in), for the overflow proof.
    pub dot_product_len: u32,
    /// `false` if this layer's quantization scheme is not symmetric.
    pub is_symmetric: bool,
    /// `true` if this layer has an unfolded BatchNorm that must be
    /// folded before conversion.
    pub has_unfolded_bn: bool,
}

/// Start a fresh analysis context seeded with the entry error implied by
/// `config.input_scale_exp`.
#[must_use]
pub fn start_context(config: &AnalyzeConfig) -> AnalysisContext {
    AnalysisContext::seed(entry_error(config.input_scale_exp))
}

/// Extend `ctx` with one more layer, appending a [`LayerErrorContract`]
/// and advancing `ctx.total_bound`.
///
/// Failure modes (§4.3): an asymmetric spec sets `asymmetric`, marks the
/// context invalid, and returns an error with no contract appended. An
/// unfolded BatchNorm sets `unfolded_bn` (fatal) and likewise aborts.
/// An unsafe overflow proof without mitigation is recorded (the
/// `overflow` bit is set) but analysis continues.
pub fn analyze_layer(ctx: &mut AnalysisContext, spec: &LayerSpec) -> Result<()> {
    if spec.has_unfolded_bn {
        ctx.faults.insert(FaultSet::UNFOLDED_BN);
        ctx.is_valid = false;
        tracing::warn!("unfolded batchnorm encountered during analysis");
        return Err(CqError::UnfoldedBatchNorm);
    }
    if !spec.is_symmetric {
        ctx.faults.insert(FaultSet::ASYMMETRIC);
        ctx.is_valid = false;
        tracing::warn!("asymmetric layer spec encountered during analysis");
        return Err(CqError::AsymmetricParams {
            context: "layer spec",
        });
    }

    let eps_l = ctx.total_bound;
    let s_w = 2f64.powi(i32::from(spec.weight_scale_exp));
    let s_x = 2f64.powi(i32::from(spec.input_scale_exp));
    let s_out = 2f64.powi(i32::from(spec.output_scale_exp));

    let weight_error = weight_error_contribution(s_w, spec.max_input_norm);
    let bias_error = bias_error_contribution(s_w, s_x);
    let proj_error = proj_error_contribution(s_out);
    let local = local_error(weight_error, bias_error, proj_error);
    let output_bound = recurrence_step(spec.amplification_factor, eps_l, local);

    let overflow_proof =
        overflow_safety(spec.max_weight_mag, spec.max_input_mag, spec.dot_product_len);
    if !overflow_proof.is_safe {
        ctx.faults.insert(FaultSet::OVERFLOW);
        tracing::debug!(
            margin = overflow_proof.safety_margin,
            "layer accumulator overflow proof is unsafe, recorded and continuing"
        );
    }

    ctx.layers.push(LayerErrorContract {
        amplification_factor: spec.amplification_factor,
        weight_error,
        bias_error,
        proj_error,
        input_bound: eps_l,
        output_bound,
        overflow_proof,
    });
    ctx.total_bound = output_bound;
    Ok(())
}

/// Mark a context complete after every layer has been analyzed.
pub fn finish_context(ctx: &mut AnalysisContext) {
    ctx.is_complete = true;
    tracing::info!(
        layer_count = ctx.layer_count(),
        total_bound = ctx.total_bound,
        "analysis complete"
    );
}
