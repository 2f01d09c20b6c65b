//! Dyadic constraint checking (§4.5).
//!
//! Every layer header must satisfy `bias.exp == weight.exp + input.exp`
//! so that the bias term lands on the same fixed-point grid as the
//! weight/input product without a runtime rescale.

use cq_error::{CqError, Result};

/// Verify the dyadic constraint for one layer's scale exponents.
pub fn check_dyadic(bias_exp: i8, weight_exp: i8, input_exp: i8) -> Result<()> {
    if bias_exp == weight_exp + input_exp {
        Ok(())
    } else {
        Err(CqError::DyadicViolation {
            bias_exp,
            weight_exp,
            input_exp,
        })
    }
}
