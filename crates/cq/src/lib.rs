//! Public API facade for the Certifiable-Quant pipeline.
//!
//! Re-exports every stage crate's public surface plus a
//! [`PipelineDriver`] that sequences Analyze → Calibrate → Convert →
//! Verify → Certify against caller-prepared per-stage inputs.

pub mod driver;

pub use cq_analyze as analyze;
pub use cq_calibrate as calibrate;
pub use cq_certificate as certificate;
pub use cq_collab as collab;
pub use cq_convert as convert;
pub use cq_error as error;
pub use cq_hash as hash;
pub use cq_primitives as primitives;
pub use cq_types as types;
pub use cq_verify as verify;

pub use driver::{PipelineDriver, PipelineInput};
