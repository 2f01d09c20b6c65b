//! Core data model for Certifiable-Quant (§3).
//!
//! This crate carries the shared, stage-agnostic records that flow
//! between Analyze, Calibrate, Convert, Verify, and Certify: fixed-point
//! scalar storage, the fault-flag bitset, overflow proofs, layer error
//! contracts, the analysis/calibration/verification reports, and the
//! fixed-layout digests each stage produces exactly once.

pub mod analysis;
pub mod calibration;
pub mod clock;
pub mod digest;
pub mod fault;
pub mod layer;
pub mod overflow;
pub mod scalar;
pub mod verification;

pub use analysis::AnalysisContext;
pub use calibration::{CalibrationReport, TensorStatistics, DEFAULT_DEGENERATE_EPSILON};
pub use clock::{Clock, FixedClock, SystemClock};
pub use digest::{AnalysisDigest, CalibrationDigest, VerificationDigest};
pub use fault::FaultSet;
pub use layer::LayerErrorContract;
pub use overflow::OverflowProof;
pub use scalar::{Q16_16, Q32_32, Q8_24, Q16_16_FRAC_BITS, Q32_32_FRAC_BITS, Q8_24_FRAC_BITS, ScaleExp};
pub use verification::{LayerComparison, VerificationReport};
