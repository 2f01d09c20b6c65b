//! Symmetric-quantization enforcement (§4.5). Affine/zero-point
//! quantization is explicitly excluded by the specification's
//! non-goals; any claimed-asymmetric scheme fails closed.

use cq_error::{CqError, Result};
use cq_types::FaultSet;

/// Verify that a quantization scheme is symmetric; otherwise set
/// `asymmetric` and fail closed.
pub fn enforce_symmetric(is_symmetric: bool, faults: &mut FaultSet) -> Result<()> {
    if is_symmetric {
        Ok(())
    } else {
        faults.insert(FaultSet::ASYMMETRIC);
        Err(CqError::AsymmetricParams {
            context: "quantization scheme is not symmetric",
        })
    }
}
