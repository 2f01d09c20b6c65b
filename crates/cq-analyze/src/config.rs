//! Analyze-stage configuration (§6).

/// Target fixed-point format for the quantized model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TargetFormat {
    /// `Q16.16`: 32-bit storage, 16 fractional bits.
    Q16_16,
    /// `Q8.24`: 32-bit storage, 24 fractional bits.
    Q8_24,
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self::Q16_16
    }
}

/// Analyze-stage configuration, with defaults matching §6 exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalyzeConfig {
    /// Input scale exponent (default `16`).
    pub input_scale_exp: i8,
    /// Default weight scale exponent (default `16`).
    pub default_weight_exp: i8,
    /// Default output scale exponent (default `16`).
    pub default_output_exp: i8,
    /// Target fixed-point format (default `Q16.16`).
    pub target_format: TargetFormat,
    /// Whether layers may mix precisions (default `false`).
    pub allow_mixed_precision: bool,
    /// Whether chunked accumulation is permitted (default `false`).
    pub allow_chunked_accum: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            input_scale_exp: 16,
            default_weight_exp: 16,
            default_output_exp: 16,
            target_format: TargetFormat::default(),
            allow_mixed_precision: false,
            allow_chunked_accum: false,
        }
    }
}
