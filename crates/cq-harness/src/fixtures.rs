//! Small synthetic model fixtures shared by integration tests.

use cq_analyze::LayerSpec;

/// A tiny five-layer identity-ish model spec, used by the end-to-end
/// integration test to reproduce boundary scenario 7.
#[must_use]
pub fn five_layer_identity_model() -> Vec<LayerSpec> {
    (0..5)
        .map(|_| LayerSpec {
            amplification_factor: 1.0,
            max_input_norm: 1.0,
            weight_scale_exp: 16,
            input_scale_exp: 16,
            output_scale_exp: 16,
            max_weight_mag: 1 << 8,
            max_input_mag: 1 << 8,
            dot_product_len: 64,
            is_symmetric: true,
            has_unfolded_bn: false,
        })
        .collect()
}

/// A flat weight tensor of `rows * cols` values, deterministically
/// generated (no `rand`/`Math.random` dependency) so tests are
/// reproducible without seeding.
#[must_use]
pub fn synthetic_weights(rows: usize, cols: usize) -> Vec<f32> {
    (0..rows * cols)
        .map(|i| (i as f32 / 100.0).sin())
        .collect()
}
