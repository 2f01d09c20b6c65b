//! Canonical layer-contract serialization and the Analyze-stage digest
//! (§4.3). The digest is produced exactly once, from a complete, valid
//! context.

use cq_error::{CqError, Result};
use cq_hash::Sha256Hasher;
use cq_types::{AnalysisContext, AnalysisDigest, LayerErrorContract};

/// Canonical little-endian encoding of one layer contract, in the fixed
/// field order the digest hash is computed over.
#[must_use]
pub fn encode_layer_contract(contract: &LayerErrorContract) -> Vec<u8> {
    let mut buf = Vec::with_capacity(6 * 8 + 4 + 4 + 4 + 8 + 1);
    buf.extend_from_slice(&contract.amplification_factor.to_le_bytes());
    buf.extend_from_slice(&contract.weight_error.to_le_bytes());
    buf.extend_from_slice(&contract.bias_error.to_le_bytes());
    buf.extend_from_slice(&contract.proj_error.to_le_bytes());
    buf.extend_from_slice(&contract.input_bound.to_le_bytes());
    buf.extend_from_slice(&contract.output_bound.to_le_bytes());
    let proof = &contract.overflow_proof;
    buf.extend_from_slice(&proof.max_weight_mag.to_le_bytes());
    buf.extend_from_slice(&proof.max_input_mag.to_le_bytes());
    buf.extend_from_slice(&proof.dot_product_len.to_le_bytes());
    buf.extend_from_slice(&proof.safety_margin.to_le_bytes());
    buf.push(u8::from(proof.is_safe));
    buf
}

/// Produce the Analyze-stage digest from a complete, valid context.
///
/// Returns [`CqError::AnalysisInvalid`] if the context is incomplete or
/// was marked invalid by a failure mode encountered while analyzing a
/// layer (§4.3: "Asymmetric spec encountered ⇒ ... no digest").
pub fn analysis_digest(ctx: &AnalysisContext) -> Result<AnalysisDigest> {
    if !ctx.is_valid {
        return Err(CqError::AnalysisInvalid {
            reason: "context was invalidated by a failure mode",
        });
    }
    if !ctx.is_complete {
        return Err(CqError::AnalysisInvalid {
            reason: "context is not yet complete",
        });
    }
    let mut hasher = Sha256Hasher::new();
    for layer in &ctx.layers {
        hasher.update(&encode_layer_contract(layer));
    }
    Ok(AnalysisDigest {
        entry_error: ctx.entry_error,
        total_bound: ctx.total_bound,
        layer_count: ctx.layer_count() as u32,
        overflow_safe_count: ctx.overflow_safe_count() as u32,
        layer_hash: hasher.finalize(),
    })
}
