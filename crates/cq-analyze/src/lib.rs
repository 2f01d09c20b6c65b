//! Static error analysis, the Theorist (§4.3).
//!
//! Analyze propagates ranges through each layer, computes operator-norm
//! amplification bounds, and runs the closed-form error recurrence
//! `ε_{l+1} = A_l · ε_l + local_l` left-to-right, emitting an
//! [`cq_types::AnalysisDigest`] once the context is complete and valid.

pub mod config;
pub mod digest;
pub mod error;
pub mod norm;
pub mod range;
pub mod theorist;

pub use config::{AnalyzeConfig, TargetFormat};
pub use digest::{analysis_digest, encode_layer_contract};
pub use error::{
    bias_error_contribution, bias_error_contribution_default, entry_error, local_error,
    proj_error_contribution, recurrence_step, weight_error_contribution,
};
pub use norm::{frobenius_norm, row_sum_norm};
pub use range::{propagate_linear_range, relu_range};
pub use theorist::{analyze_layer, finish_context, start_context, LayerSpec};
