//! Verify-stage digest (§4.6).

use cq_types::{VerificationDigest, VerificationReport};

/// Produce the Verify-stage digest from a finalized report.
#[must_use]
pub fn verification_digest(report: &VerificationReport) -> VerificationDigest {
    let pass_flag =
        u8::from(report.all_bounds_satisfied && report.total_bound_satisfied);
    VerificationDigest {
        dataset_hash: report.dataset_hash,
        sample_count: report.sample_count(),
        layers_passed: report.layers_passed() as u32,
        theoretical_total: report.total.error_bound_theoretical,
        measured_max: report.total.max,
        pass_flag,
    }
}
