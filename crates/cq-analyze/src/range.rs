//! Interval arithmetic for linear-layer range propagation (§4.3).

/// Propagate an input range through a linear layer with the given
/// weight range, summed over `n` terms, plus an optional bias range.
///
/// `output = n · hull{w_min·x_min, w_min·x_max, w_max·x_min, w_max·x_max}
/// + bias`, with the bias range added componentwise when present.
#[must_use]
pub fn propagate_linear_range(
    weight_range: (f64, f64),
    input_range: (f64, f64),
    n: u32,
    bias_range: Option<(f64, f64)>,
) -> (f64, f64) {
    let (w_min, w_max) = weight_range;
    let (x_min, x_max) = input_range;
    let corners = [w_min * x_min, w_min * x_max, w_max * x_min, w_max * x_max];
    let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = f64::from(n);
    let (mut lo, mut hi) = (lo * n, hi * n);
    if let Some((b_lo, b_hi)) = bias_range {
        lo += b_lo;
        hi += b_hi;
    }
    (lo, hi)
}

/// Propagate a range through a ReLU: `[a, b] -> [max(a, 0), max(b, 0)]`.
#[must_use]
pub fn relu_range(range: (f64, f64)) -> (f64, f64) {
    (range.0.max(0.0), range.1.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_single_term_matches_scalar_product() {
        let (lo, hi) = propagate_linear_range((1.0, 2.0), (3.0, 4.0), 1, None);
        assert_eq!((lo, hi), (3.0, 8.0));
    }

    #[test]
    fn propagate_scales_by_term_count() {
        let (lo, hi) = propagate_linear_range((1.0, 2.0), (3.0, 4.0), 4, None);
        assert_eq!((lo, hi), (12.0, 32.0));
    }

    #[test]
    fn propagate_handles_negative_weight_range() {
        let (lo, hi) = propagate_linear_range((-2.0, 2.0), (-1.0, 1.0), 1, None);
        assert_eq!((lo, hi), (-2.0, 2.0));
    }

    #[test]
    fn bias_range_is_added_componentwise() {
        let (lo, hi) = propagate_linear_range((1.0, 1.0), (1.0, 1.0), 1, Some((-0.5, 0.5)));
        assert_eq!((lo, hi), (0.5, 1.5));
    }

    #[test]
    fn relu_clamps_negative_bounds() {
        assert_eq!(relu_range((-3.0, -1.0)), (0.0, 0.0));
        assert_eq!(relu_range((-3.0, 5.0)), (0.0, 5.0));
        assert_eq!(relu_range((1.0, 5.0)), (1.0, 5.0));
    }
}
