//! The symmetric quantization kernel (§4.5).
//!
//! `scaled = (f64)w · S` is rounded to the nearest integer with ties
//! broken to even (the source describes this as round-away-from-zero
//! corrected for exact halfway ties; `f64::round_ties_even` is the
//! direct, already-correct expression of the same rounding mode) and
//! saturated to `i32`.

use cq_types::FaultSet;

/// Quantize one FP32 weight at scale exponent `n` (`S = 2^n`).
#[must_use]
pub fn quantize(value: f32, scale_exp: i8, faults: &mut FaultSet) -> i32 {
    let scale = 2f64.powi(i32::from(scale_exp));
    let scaled = f64::from(value) * scale;
    let rounded = scaled.round_ties_even();
    if rounded > f64::from(i32::MAX) {
        faults.insert(FaultSet::OVERFLOW);
        i32::MAX
    } else if rounded < f64::from(i32::MIN) {
        faults.insert(FaultSet::UNDERFLOW);
        i32::MIN
    } else {
        rounded as i32
    }
}

/// Quantize a whole tensor, in index order, returning the quantized
/// values alongside the accumulated faults.
pub fn quantize_tensor(values: &[f32], scale_exp: i8, faults: &mut FaultSet) -> Vec<i32> {
    values.iter().map(|&v| quantize(v, scale_exp, faults)).collect()
}
