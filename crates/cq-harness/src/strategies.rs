//! `proptest` strategies for the data types exercised across multiple
//! crates' property tests.

use cq_analyze::LayerSpec;
use cq_types::TensorStatistics;
use proptest::prelude::*;

/// A strategy producing realistic (not necessarily passing) layer
/// specs: positive amplification factors, plausible scale exponents,
/// and symmetric/folded flags split independently.
pub fn layer_spec_strategy() -> impl Strategy<Value = LayerSpec> {
    (
        0.0_f64..4.0,
        0.0_f64..16.0,
        -8_i8..32,
        -8_i8..32,
        -8_i8..32,
        0_u32..(1 << 20),
        0_u32..(1 << 20),
        1_u32..4096,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(
                amplification_factor,
                max_input_norm,
                weight_scale_exp,
                input_scale_exp,
                output_scale_exp,
                max_weight_mag,
                max_input_mag,
                dot_product_len,
                is_symmetric,
                has_unfolded_bn,
            )| {
                LayerSpec {
                    amplification_factor,
                    max_input_norm,
                    weight_scale_exp,
                    input_scale_exp,
                    output_scale_exp,
                    max_weight_mag,
                    max_input_mag,
                    dot_product_len,
                    is_symmetric,
                    has_unfolded_bn,
                }
            },
        )
}

/// A strategy producing one tensor's safe range and a single observed
/// sample within a generous surrounding window, for range-veto and
/// coverage property tests.
pub fn tensor_with_one_observation_strategy() -> impl Strategy<Value = TensorStatistics> {
    (-100.0_f64..0.0, 0.0_f64..100.0, -150.0_f64..150.0).prop_map(|(l_safe, u_safe, sample)| {
        let mut t = TensorStatistics::new("t", l_safe, u_safe);
        t.observe(sample);
        t
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn layer_spec_strategy_produces_finite_amplification(spec in layer_spec_strategy()) {
            prop_assert!(spec.amplification_factor.is_finite());
            prop_assert!(spec.amplification_factor >= 0.0);
        }

        #[test]
        fn tensor_strategy_always_observes_one_sample(t in tensor_with_one_observation_strategy()) {
            prop_assert!(t.l_obs <= t.u_obs);
        }
    }
}
