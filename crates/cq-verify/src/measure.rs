//! L-infinity error measurement (§4.6).

use cq_types::Q16_16;

/// `max_i |a[i] - b[i]|` under f64 arithmetic. Null/empty inputs (or
/// mismatched lengths, which never occur on paired reference arrays)
/// return `0.0`.
#[must_use]
pub fn linf_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0_f64, f64::max)
}

/// `linf_error` over `f32` reference arrays, compared in `f64`.
#[must_use]
pub fn linf_error_f32(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (f64::from(*x) - f64::from(*y)).abs())
        .fold(0.0_f64, f64::max)
}

/// `linf_error` between a `Q16.16`-encoded array and an `f64` reference,
/// decoding each quantized sample before comparing.
#[must_use]
pub fn linf_error_q16_16(quantized: &[Q16_16], reference: &[f64]) -> f64 {
    quantized
        .iter()
        .zip(reference.iter())
        .map(|(q, r)| (q.to_f64() - r).abs())
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_return_zero() {
        assert_eq!(linf_error(&[], &[]), 0.0);
    }

    #[test]
    fn max_absolute_deviation() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.5, 2.9];
        assert!((linf_error(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn q16_16_variant_decodes_before_comparing() {
        let q = [Q16_16::from_raw(2 << 16)]; // 2.0
        let reference = [2.1];
        assert!((linf_error_q16_16(&q, &reference) - 0.1).abs() < 1e-9);
    }
}
