//! Error-contribution formulas and the closed-form recurrence (§4.3).
//!
//! **Open question, resolved.** The source's `bias_error_contribution`
//! assumes `S_x = S_w`; the general form from the parent math document
//! is `1/(2·S_w·S_x)`. This crate exposes `S_x` as an explicit parameter
//! on [`bias_error_contribution`] and provides
//! [`bias_error_contribution_default`] as the convenience constructor
//! that assumes `S_x = S_w`. A test below asserts the two paths agree
//! whenever the dyadic constraint holds (see `DESIGN.md`).

/// Entry (ingress) quantization error, `ε₀ = 1/(2·S_in)` where
/// `S_in = 2^input_scale_exp`.
#[must_use]
pub fn entry_error(input_scale_exp: i8) -> f64 {
    1.0 / (2.0 * 2f64.powi(i32::from(input_scale_exp)))
}

/// Weight-quantization error contribution, `0.5/S_w · ‖x‖`.
#[must_use]
pub fn weight_error_contribution(weight_scale: f64, max_input_norm: f64) -> f64 {
    (0.5 / weight_scale) * max_input_norm
}

/// Bias-quantization error contribution, the general form
/// `1/(2·S_w·S_x)` with `S_x` explicit.
#[must_use]
pub fn bias_error_contribution(weight_scale: f64, input_scale: f64) -> f64 {
    0.5 / (weight_scale * input_scale)
}

/// Bias-quantization error contribution under the default encoding
/// assumption `S_x = S_w`, i.e. `0.5 / S_w²`.
#[must_use]
pub fn bias_error_contribution_default(weight_scale: f64) -> f64 {
    bias_error_contribution(weight_scale, weight_scale)
}

/// Output-projection rounding error contribution, `0.5/S_out`.
#[must_use]
pub fn proj_error_contribution(output_scale: f64) -> f64 {
    0.5 / output_scale
}

/// Sum of the three local (non-propagated) error contributions.
#[must_use]
pub fn local_error(weight_err: f64, bias_err: f64, proj_err: f64) -> f64 {
    weight_err + bias_err + proj_err
}

/// One step of the error recurrence: `ε_{l+1} = A_l · ε_l + local_l`.
#[must_use]
pub fn recurrence_step(amplification: f64, input_bound: f64, local: f64) -> f64 {
    amplification * input_bound + local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_error_for_scale_exp_16() {
        let eps0 = entry_error(16);
        assert!((eps0 - 7.629_394_531_25e-6).abs() < 1e-12);
    }

    #[test]
    fn entry_error_for_scale_exp_24() {
        let eps0 = entry_error(24);
        assert!((eps0 - 2.980_232_238_77e-8).abs() < 1e-15);
    }

    #[test]
    fn three_layer_recurrence_matches_spec_vectors() {
        let eps0 = 0.0001;
        let a = 1.5;
        let local = 0.001;
        let eps1 = recurrence_step(a, eps0, local);
        let eps2 = recurrence_step(a, eps1, local);
        let eps3 = recurrence_step(a, eps2, local);
        assert!((eps1 - 0.001_15).abs() < 1e-12);
        assert!((eps2 - 0.002_725).abs() < 1e-12);
        assert!((eps3 - 0.005_087_5).abs() < 1e-12);
    }

    #[test]
    fn error_monotonicity_when_amplification_at_least_one() {
        let eps0 = 0.0001;
        let eps1 = recurrence_step(1.0, eps0, 0.0);
        assert!(eps1 >= eps0);
        let eps2 = recurrence_step(2.0, eps0, 0.0005);
        assert!(eps2 >= eps0);
    }

    #[test]
    fn bias_error_default_and_general_agree_under_dyadic_constraint() {
        // Dyadic constraint: bias.exp = weight.exp + input.exp. The
        // default path assumes S_x = S_w, which is exactly the case
        // this test exercises.
        let s_w = 65536.0; // 2^16
        let general = bias_error_contribution(s_w, s_w);
        let default = bias_error_contribution_default(s_w);
        assert_eq!(general, default);
    }

    #[test]
    fn local_error_sums_three_terms() {
        assert!((local_error(0.1, 0.2, 0.3) - 0.6).abs() < 1e-12);
    }
}
