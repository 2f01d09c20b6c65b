//! Calibration, the Observer (§4.4).
//!
//! Calibrate observes per-tensor value ranges sample-by-sample, then
//! finalizes a [`cq_types::CalibrationReport`]: per-tensor coverage
//! ratios against the safe ranges inherited from Analyze, a fail-closed
//! range veto, and a warning-only global coverage veto.

pub mod config;
pub mod digest;
pub mod observer;

pub use config::CalibrateConfig;
pub use digest::calibration_digest;
pub use observer::finalize_report;
