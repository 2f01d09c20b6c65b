//! The Deterministic Value Machine (DVM, §4.1): saturating arithmetic,
//! round-to-nearest-even shifts, `Q16.16` multiply/divide, MAC, and
//! overflow-safety proofs.
//!
//! Rust's `>>` on signed integer types is already a sign-extending
//! (arithmetic) shift, so the C99-shift portability wrapper the source
//! documents collapses to the native operator; no custom shift wrapper
//! is needed here (§9).

use cq_types::{FaultSet, OverflowProof};

/// Saturate a widened intermediate value to `i32`, recording overflow or
/// underflow in `faults`.
#[must_use]
pub fn clamp32(x: i64, faults: &mut FaultSet) -> i32 {
    if x > i64::from(i32::MAX) {
        faults.insert(FaultSet::OVERFLOW);
        i32::MAX
    } else if x < i64::from(i32::MIN) {
        faults.insert(FaultSet::UNDERFLOW);
        i32::MIN
    } else {
        x as i32
    }
}

/// Saturating 64-bit addition, recording overflow/underflow in `faults`.
#[must_use]
pub fn add64_sat(a: i64, b: i64, faults: &mut FaultSet) -> i64 {
    match a.checked_add(b) {
        Some(v) => v,
        None => {
            if b > 0 {
                faults.insert(FaultSet::OVERFLOW);
                i64::MAX
            } else {
                faults.insert(FaultSet::UNDERFLOW);
                i64::MIN
            }
        }
    }
}

/// Saturating 64-bit subtraction, recording overflow/underflow in
/// `faults`.
#[must_use]
pub fn sub64_sat(a: i64, b: i64, faults: &mut FaultSet) -> i64 {
    match a.checked_sub(b) {
        Some(v) => v,
        None => {
            if b < 0 {
                faults.insert(FaultSet::OVERFLOW);
                i64::MAX
            } else {
                faults.insert(FaultSet::UNDERFLOW);
                i64::MIN
            }
        }
    }
}

/// Round-to-nearest-even right shift (§4.1, boundary scenario 1).
///
/// `s == 0` delegates to [`clamp32`]. `s > 62` is rejected: sets
/// `overflow` and returns `0`.
#[must_use]
pub fn round_shift_rne(x: i64, s: u32, faults: &mut FaultSet) -> i32 {
    if s == 0 {
        return clamp32(x, faults);
    }
    if s > 62 {
        faults.insert(FaultSet::OVERFLOW);
        return 0;
    }
    let d: i64 = 1 << s;
    let h: i64 = d / 2;
    let mut q = x / d;
    let r = x % d;
    if r > h {
        q += 1;
    }
    if r < -h {
        q -= 1;
    }
    if r == h {
        q += q & 1;
    }
    if r == -h {
        q -= q & 1;
    }
    clamp32(q, faults)
}

/// Round-to-nearest-even division by an arbitrary (possibly negative)
/// divisor, generalizing [`round_shift_rne`]'s tie-breaking to non-power-
/// of-two divisors. Used by [`q16_16_div`].
fn round_div_rne(num: i64, den: i64, faults: &mut FaultSet) -> i32 {
    if den == 0 {
        faults.insert(FaultSet::DIV_ZERO);
        return 0;
    }
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    let h = den / 2;
    let mut q = num / den;
    let r = num % den;
    if r > h {
        q += 1;
    }
    if r < -h {
        q -= 1;
    }
    if r == h {
        q += q & 1;
    }
    if r == -h {
        q -= q & 1;
    }
    clamp32(q, faults)
}

/// `Q16.16` multiply: widen to `i64`, shift right 16 with RNE, clamp.
#[must_use]
pub fn q16_16_mul(a: i32, b: i32, faults: &mut FaultSet) -> i32 {
    let product = i64::from(a) * i64::from(b);
    round_shift_rne(product, 16, faults)
}

/// `Q16.16` divide: `(a << 16) / b` with RNE on the remainder. `b == 0`
/// sets `div_zero` and returns `0`.
#[must_use]
pub fn q16_16_div(a: i32, b: i32, faults: &mut FaultSet) -> i32 {
    if b == 0 {
        faults.insert(FaultSet::DIV_ZERO);
        return 0;
    }
    let numerator = i64::from(a) << 16;
    round_div_rne(numerator, i64::from(b), faults)
}

/// Multiply-accumulate: `acc <- add64_sat(acc, a*b)`.
#[must_use]
pub fn mac(acc: i64, a: i32, b: i32, faults: &mut FaultSet) -> i64 {
    let product = i64::from(a) * i64::from(b);
    add64_sat(acc, product, faults)
}

/// Convert a `Q32.32` accumulator back to `Q16.16` via RNE shift.
#[must_use]
pub fn mac_to_q16_16(acc: i64, faults: &mut FaultSet) -> i32 {
    round_shift_rne(acc, 16, faults)
}

/// Compute the overflow-safety proof for a linear layer's accumulator
/// (§4.1). Staged `u64` overflow checks: `n * w` first, then `* x`. Any
/// zero factor is trivially safe with maximal margin.
#[must_use]
pub fn overflow_safety(max_weight_mag: u32, max_input_mag: u32, dot_product_len: u32) -> OverflowProof {
    if max_weight_mag == 0 || max_input_mag == 0 || dot_product_len == 0 {
        return OverflowProof::trivial_safe(max_weight_mag, max_input_mag, dot_product_len);
    }
    let product = u64::from(dot_product_len)
        .checked_mul(u64::from(max_weight_mag))
        .and_then(|staged| staged.checked_mul(u64::from(max_input_mag)));
    match product {
        Some(p) if p < (1_u64 << 63) => OverflowProof {
            max_weight_mag,
            max_input_mag,
            dot_product_len,
            safety_margin: (1_u64 << 63) - p,
            is_safe: true,
        },
        _ => OverflowProof {
            max_weight_mag,
            max_input_mag,
            dot_product_len,
            safety_margin: 0,
            is_safe: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rne_vectors_shift_16() {
        let mut faults = FaultSet::empty();
        assert_eq!(round_shift_rne(0x0001_8000, 16, &mut faults), 2);
        assert_eq!(round_shift_rne(0x0002_8000, 16, &mut faults), 2);
        assert_eq!(round_shift_rne(0x0003_8000, 16, &mut faults), 4);
        assert_eq!(
            round_shift_rne(0xFFFF_FFFF_FFFE_8000_u64 as i64, 16, &mut faults),
            -2
        );
        assert_eq!(
            round_shift_rne(0xFFFF_FFFF_FFFD_8000_u64 as i64, 16, &mut faults),
            -2
        );
        assert!(!faults.any());
    }

    #[test]
    fn shift_zero_delegates_to_clamp32() {
        let mut faults = FaultSet::empty();
        assert_eq!(round_shift_rne(42, 0, &mut faults), 42);
        assert_eq!(
            round_shift_rne(i64::from(i32::MAX) + 10, 0, &mut faults),
            i32::MAX
        );
        assert!(faults.overflow());
    }

    #[test]
    fn shift_over_62_sets_overflow_and_returns_zero() {
        let mut faults = FaultSet::empty();
        assert_eq!(round_shift_rne(1, 63, &mut faults), 0);
        assert!(faults.overflow());
    }

    #[test]
    fn clamp32_saturation_contract() {
        let mut faults = FaultSet::empty();
        assert_eq!(clamp32(i64::from(i32::MAX), &mut faults), i32::MAX);
        assert!(!faults.any());
        assert_eq!(
            clamp32(i64::from(i32::MAX) + 1, &mut faults),
            i32::MAX
        );
        assert!(faults.overflow());

        let mut faults = FaultSet::empty();
        assert_eq!(clamp32(i64::from(i32::MIN), &mut faults), i32::MIN);
        assert!(!faults.any());
        assert_eq!(
            clamp32(i64::from(i32::MIN) - 1, &mut faults),
            i32::MIN
        );
        assert!(faults.underflow());
    }

    #[test]
    fn add64_sat_detects_both_directions() {
        let mut faults = FaultSet::empty();
        assert_eq!(add64_sat(i64::MAX, 1, &mut faults), i64::MAX);
        assert!(faults.overflow());

        let mut faults = FaultSet::empty();
        assert_eq!(add64_sat(i64::MIN, -1, &mut faults), i64::MIN);
        assert!(faults.underflow());
    }

    #[test]
    fn div_zero_sets_fault_and_returns_zero() {
        let mut faults = FaultSet::empty();
        assert_eq!(q16_16_div(100, 0, &mut faults), 0);
        assert!(faults.div_zero());
    }

    #[test]
    fn q16_16_mul_identity() {
        let mut faults = FaultSet::empty();
        let one = 1 << 16; // 1.0 in Q16.16
        let two = 2 << 16; // 2.0 in Q16.16
        assert_eq!(q16_16_mul(one, two, &mut faults), two);
        assert!(!faults.any());
    }

    #[test]
    fn q16_16_div_identity() {
        let mut faults = FaultSet::empty();
        let four = 4 << 16;
        let two = 2 << 16;
        assert_eq!(q16_16_div(four, two, &mut faults), two);
        assert!(!faults.any());
    }

    #[test]
    fn overflow_boundary_safe_at_two_to_62() {
        let proof = overflow_safety(1 << 21, 1 << 21, 1 << 20);
        assert!(proof.is_safe);
        assert_eq!(proof.safety_margin, 1_u64 << 62);
    }

    #[test]
    fn overflow_boundary_unsafe_at_two_to_63() {
        let proof = overflow_safety(1 << 31, 1 << 31, 2);
        assert!(!proof.is_safe);
        assert_eq!(proof.safety_margin, 0);
    }

    #[test]
    fn overflow_safety_trivial_when_any_factor_zero() {
        let proof = overflow_safety(0, 100, 100);
        assert!(proof.is_safe);
        let proof = overflow_safety(100, 0, 100);
        assert!(proof.is_safe);
        let proof = overflow_safety(100, 100, 0);
        assert!(proof.is_safe);
    }

    #[test]
    fn overflow_monotonicity_in_dot_product_length() {
        // is_safe(w, x, n) => is_safe(w, x, n - 1) for n >= 1.
        let w = 1 << 20;
        let x: u32 = 1 << 20;
        for n in 1..=64_u32 {
            if overflow_safety(w, x, n).is_safe {
                assert!(overflow_safety(w, x, n - 1).is_safe);
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn closed_form_rne(x: i64, s: u32) -> i64 {
        let d = 1_i128 << s;
        let h = d / 2;
        let mut q = i128::from(x) / d;
        let r = i128::from(x) % d;
        if r > h {
            q += 1;
        }
        if r < -h {
            q -= 1;
        }
        if r == h {
            q += q & 1;
        }
        if r == -h {
            q -= q & 1;
        }
        q as i64
    }

    proptest! {
        #[test]
        fn rne_matches_closed_form(x in any::<i64>(), s in 1_u32..=62) {
            let mut faults = FaultSet::empty();
            let got = round_shift_rne(x, s, &mut faults);
            let expected = closed_form_rne(x, s).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn rne_ties_produce_even_integers(k in -(1_i64 << 40)..(1_i64 << 40), s in 1_u32..=40) {
            // x exactly halfway between two multiples of 2^s: x = k * 2^s + 2^(s-1).
            let d = 1_i64 << s;
            let x = k.saturating_mul(d) + d / 2;
            let mut faults = FaultSet::empty();
            let got = round_shift_rne(x, s, &mut faults);
            prop_assert_eq!(got.rem_euclid(2), 0);
        }

        #[test]
        fn overflow_monotonicity(w in 0_u32..=1_u32<<28, x in 0_u32..=1_u32<<28, n in 1_u32..=1_u32<<10) {
            if overflow_safety(w, x, n).is_safe {
                prop_assert!(overflow_safety(w, x, n - 1).is_safe);
            }
            if !overflow_safety(w, x, n).is_safe {
                prop_assert!(!overflow_safety(w, x, n + 1).is_safe);
            }
        }

        #[test]
        fn clamp32_contract(x in any::<i64>()) {
            let mut faults = FaultSet::empty();
            let got = clamp32(x, &mut faults);
            if x > i64::from(i32::MAX) {
                prop_assert_eq!(got, i32::MAX);
                prop_assert!(faults.overflow());
            } else if x < i64::from(i32::MIN) {
                prop_assert_eq!(got, i32::MIN);
                prop_assert!(faults.underflow());
            } else {
                prop_assert_eq!(i64::from(got), x);
                prop_assert!(!faults.any());
            }
        }
    }
}
