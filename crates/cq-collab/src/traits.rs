//! Collaborator contracts (§6): the systems this pipeline depends on
//! but does not implement. Each is expressed as a trait with no
//! default (non-test) implementation — the FP32 model parser, the
//! inference engine, the signing oracle, and the dataset loader are
//! all explicitly out of scope per §1.

/// One layer's worth of FP32 weights, as supplied by the (excluded)
/// model parser.
#[derive(Debug, Clone)]
pub struct ParsedLayer {
    pub name: String,
    pub weights: Vec<f32>,
    pub bias: Option<Vec<f32>>,
    pub rows: usize,
    pub cols: usize,
}

/// Supplies the layer graph and weight arrays of an FP32 source model.
/// Implemented by the (out-of-scope) model-file parser.
pub trait ModelParser {
    /// The parser's own error type.
    type Error;

    /// Parse every layer of the source model, in forward order.
    fn parse_layers(&self) -> Result<Vec<ParsedLayer>, Self::Error>;
}

/// Consumes a quantized model artifact and runs inference against it.
/// Implemented by the (out-of-scope) binary inference engine.
pub trait InferenceEngine {
    /// The engine's own error type.
    type Error;

    /// Run one forward pass, returning one `f32` output per output unit.
    fn run(&self, inputs: &[f32]) -> Result<Vec<f32>, Self::Error>;
}

/// Optionally signs a certificate's Merkle root. Implemented by an
/// (out-of-scope) external signing oracle; a certificate with no
/// signer attached is left with a zero-filled signature slot.
pub trait SigningOracle {
    /// The oracle's own error type.
    type Error;

    /// Produce a 64-byte signature over the given Merkle root.
    fn sign(&self, merkle_root: &[u8; 32]) -> Result<[u8; 64], Self::Error>;
}

/// Delivers raw dataset bytes (for hashing) and per-sample iteration.
/// Implemented by the (out-of-scope) dataset loader.
pub trait DatasetLoader {
    /// The loader's own error type.
    type Error;

    /// Raw bytes of the dataset, hashed once to identify it.
    fn dataset_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Iterate samples as `(input, reference_output)` pairs.
    fn samples(&self) -> Result<Vec<(Vec<f32>, Vec<f32>)>, Self::Error>;
}
