//! Conversion, the Transformer (§4.5).
//!
//! Convert applies symmetric quantization to each tensor, checks the
//! dyadic scale constraint on every layer header, and folds any
//! BatchNorm layers into the preceding affine transform before the
//! quantized artifact is handed to Verify.

pub mod batchnorm;
pub mod dyadic;
pub mod kernel;
pub mod symmetric;

pub use batchnorm::{fold_batchnorm, BatchNormParams, FoldedWeights, FoldingRecord};
pub use dyadic::check_dyadic;
pub use kernel::{quantize, quantize_tensor};
pub use symmetric::enforce_symmetric;
