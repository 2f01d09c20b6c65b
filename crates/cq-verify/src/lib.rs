//! Verification, the Judge (§4.6).
//!
//! Verify measures L-infinity error between the quantized model's
//! outputs and the floating-point reference, aggregates per-layer and
//! end-to-end statistics, and checks each against the bounds Analyze
//! produced.

pub mod config;
pub mod digest;
pub mod judge;
pub mod measure;

pub use config::VerifyConfig;
pub use digest::verification_digest;
pub use judge::check_bounds;
pub use measure::{linf_error, linf_error_f32, linf_error_q16_16};
