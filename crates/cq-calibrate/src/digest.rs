//! Calibrate-stage digest (§4.4).

use cq_types::{CalibrationDigest, CalibrationReport};

/// Produce the Calibrate-stage digest from a finalized report.
#[must_use]
pub fn calibration_digest(report: &CalibrationReport) -> CalibrationDigest {
    CalibrationDigest {
        dataset_hash: report.dataset_hash,
        sample_count: report.sample_count,
        tensor_count: report.tensor_count() as u64,
        c_min: report.c_min,
        c_p10: report.c_p10,
        range_veto_triggered: u8::from(report.range_veto_triggered),
        coverage_veto_triggered: u8::from(report.coverage_veto_triggered),
    }
}
