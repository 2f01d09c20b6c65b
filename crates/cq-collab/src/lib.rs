//! Out-of-scope collaborator contracts (§6) and the quantized-model
//! wire header. Nothing in this crate is implemented beyond the
//! contract itself — the model parser, inference engine, signing
//! oracle, and dataset loader all live outside this repository.

pub mod header;
pub mod traits;

pub use header::{QuantizedModelHeader, HEADER_LEN, MAGIC_Q16_16, MAGIC_Q8_24};
pub use traits::{DatasetLoader, InferenceEngine, ModelParser, ParsedLayer, SigningOracle};
