//! Verify-stage configuration (§6).

/// Verify-stage configuration, with defaults matching §6 exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerifyConfig {
    /// Minimum number of dataset samples required (default `100`).
    pub min_samples: u64,
    /// Maximum number of dataset samples considered (default `1000`).
    pub max_samples: u64,
    /// Whether per-layer intermediate activations are captured (default
    /// `true`).
    pub capture_intermediates: bool,
    /// Whether a single failing layer aborts verification immediately
    /// instead of continuing to expose every failing layer (default
    /// `false`).
    pub strict_mode: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            min_samples: 100,
            max_samples: 1000,
            capture_intermediates: true,
            strict_mode: false,
        }
    }
}
