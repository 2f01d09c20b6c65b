//! Calibrate-stage configuration (§6).

/// Calibrate-stage configuration, with defaults matching §6 exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrateConfig {
    /// Global minimum coverage threshold below which the (warning-only)
    /// coverage veto fires (default `0.90`).
    pub coverage_min_threshold: f64,
    /// Global 10th-percentile coverage threshold (default `0.95`).
    pub coverage_p10_threshold: f64,
    /// Absolute-width threshold below which a range is degenerate
    /// (default `1e-7`).
    pub degenerate_epsilon: f64,
    /// Minimum number of samples required for a trustworthy calibration
    /// run (default `100`).
    pub min_samples: u64,
}

impl Default for CalibrateConfig {
    fn default() -> Self {
        Self {
            coverage_min_threshold: 0.90,
            coverage_p10_threshold: 0.95,
            degenerate_epsilon: 1e-7,
            min_samples: 100,
        }
    }
}
