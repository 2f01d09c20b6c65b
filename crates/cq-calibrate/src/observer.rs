//! The Observer: finalizes per-tensor statistics into a
//! [`CalibrationReport`], evaluating the fail-closed range veto and the
//! warning-only global coverage veto (§4.4).

use cq_types::{CalibrationReport, FaultSet, TensorStatistics};

use crate::config::CalibrateConfig;

/// The one documented per-call allocation in calibration: a scratch
/// buffer of coverage ratios, sized to the tensor count, used only to
/// compute the ascending-sorted percentile (§5, §9).
fn coverage_percentile(sorted_ascending: &[f64], fraction: f64) -> f64 {
    if sorted_ascending.is_empty() {
        return 1.0;
    }
    let idx = ((fraction * sorted_ascending.len() as f64).floor() as usize)
        .min(sorted_ascending.len() - 1);
    sorted_ascending[idx]
}

/// Finalize a calibration run: compute per-tensor coverage, the
/// fail-closed range veto, and the global coverage statistics and
/// warning-only coverage veto.
///
/// All reductions (coverage percentile sort, min/mean) are performed in
/// a fixed, documented order (ascending sort, tensor-index order) so
/// that results are byte-identical across platforms (§5).
#[must_use]
pub fn finalize_report(
    dataset_hash: [u8; 32],
    sample_count: u64,
    mut tensors: Vec<TensorStatistics>,
    config: &CalibrateConfig,
) -> CalibrationReport {
    let mut faults = FaultSet::empty();
    let mut range_veto_triggered = false;
    let mut coverages = Vec::with_capacity(tensors.len());

    for tensor in &mut tensors {
        let coverage = tensor.finalize(config.degenerate_epsilon);
        coverages.push(coverage);
        if tensor.evaluate_veto() {
            range_veto_triggered = true;
            faults.insert(FaultSet::RANGE_EXCEED);
            tracing::warn!(tensor = %tensor.name, "range veto triggered");
        }
    }

    coverages.sort_by(|a, b| a.partial_cmp(b).expect("coverage ratios are never NaN"));

    let c_min = coverages.first().copied().unwrap_or(1.0);
    let c_mean = if coverages.is_empty() {
        1.0
    } else {
        coverages.iter().sum::<f64>() / coverages.len() as f64
    };
    let c_p10 = coverage_percentile(&coverages, 0.1);

    let coverage_veto_triggered =
        c_min < config.coverage_min_threshold || c_p10 < config.coverage_p10_threshold;
    if coverage_veto_triggered {
        tracing::warn!(c_min, c_p10, "global coverage veto triggered (warning only)");
    }

    CalibrationReport {
        dataset_hash,
        sample_count,
        tensors,
        c_min,
        c_p10,
        c_mean,
        range_veto_triggered,
        coverage_veto_triggered,
        faults,
    }
}
