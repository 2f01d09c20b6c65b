//! Bound comparison (§4.6): turns per-layer measurements into a
//! [`VerificationReport`], checking every layer bound before the
//! end-to-end total so that all failing layers are exposed.

use cq_error::{CqError, Result};
use cq_types::{FaultSet, LayerComparison, VerificationReport};

/// Finalize every layer comparison and the end-to-end total, setting
/// `all_bounds_satisfied` / `total_bound_satisfied` and accumulating
/// [`FaultSet::BOUND_VIOLATION`] on any violation.
///
/// Per §4.6 layer bounds are always checked to completion, independent
/// of `strict_mode` (reserved in [`VerifyConfig`](crate::VerifyConfig)
/// as a future stage-abort switch; no failure mode in this
/// specification short-circuits the per-layer sweep).
///
/// # Errors
/// Returns [`CqError::BoundViolation`] if the end-to-end total bound is
/// violated.
pub fn check_bounds(
    dataset_hash: [u8; 32],
    mut layers: Vec<LayerComparison>,
    mut total: LayerComparison,
) -> Result<VerificationReport> {
    let mut faults = FaultSet::empty();

    let mut all_bounds_satisfied = true;
    for layer in &mut layers {
        layer.finalize_bound();
        if !layer.bound_satisfied {
            all_bounds_satisfied = false;
        }
    }

    total.finalize_bound();
    let total_bound_satisfied = total.bound_satisfied;
    if !total_bound_satisfied {
        faults.insert(FaultSet::BOUND_VIOLATION);
    }

    let report = VerificationReport {
        dataset_hash,
        layers,
        total: total.clone(),
        all_bounds_satisfied,
        total_bound_satisfied,
        faults,
    };

    if !total_bound_satisfied {
        return Err(CqError::BoundViolation {
            context: format!(
                "end-to-end error {} exceeds theoretical bound {}",
                total.max, total.error_bound_theoretical
            ),
        });
    }

    Ok(report)
}
