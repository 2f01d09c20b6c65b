//! Crate-wide error taxonomy (§7).
//!
//! Three classes of condition are distinguished in the specification:
//! programmer errors (malformed input, no state mutation), fail-closed
//! faults (abort the current stage, block downstream stages), and
//! recorded faults (set a [`FaultSet`](https://docs.rs/cq-types) bit and
//! continue). Only the first two ever need a `Result`-level `Error`; the
//! third is represented purely by fault flags living alongside an `Ok`
//! value and never surfaces here.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CqError>;

/// The full error taxonomy for the Certifiable-Quant pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CqError {
    /// A required argument was missing or structurally invalid.
    #[error("null or missing argument: {what}")]
    NullArgument {
        /// Name of the missing argument.
        what: &'static str,
    },

    /// A byte buffer was too short for the structure being decoded.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Minimum required length in bytes.
        expected: usize,
        /// Actual length supplied.
        actual: usize,
    },

    /// A fixed-layout record's magic bytes did not match.
    #[error("unknown magic bytes: {found:02x?}")]
    UnknownMagic {
        /// The four bytes actually found at the magic offset.
        found: [u8; 4],
    },

    /// The certificate's `scope_format` byte named an unrecognized format.
    #[error("unknown scope/format byte: {byte:#04x}")]
    UnknownScopeFormat {
        /// The offending byte.
        byte: u8,
    },

    /// A builder was asked to assemble before every setter had been called.
    #[error("builder incomplete: missing {missing}")]
    IncompleteBuilder {
        /// Name of the field that was never set.
        missing: &'static str,
    },

    /// A rounding shift amount was outside the supported range.
    #[error("shift amount {shift} out of range (must be 0..=62)")]
    InvalidShift {
        /// The offending shift amount.
        shift: u32,
    },

    /// Division by zero encountered in a context where the result is
    /// mathematically undefined (e.g. BatchNorm folding with a
    /// non-positive variance-plus-epsilon).
    #[error("division by zero: {context}")]
    DivisionByZero {
        /// Human-readable description of where this occurred.
        context: &'static str,
    },

    /// A caller-supplied array or matrix did not have the shape a
    /// computation requires (e.g. a BatchNorm weight matrix or per-channel
    /// parameter vector whose length doesn't match the declared layer
    /// shape).
    #[error("shape mismatch: {what} expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// Name of the offending array or matrix.
        what: &'static str,
        /// The length the computation requires.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A layer header's scale exponents violated the dyadic constraint
    /// `bias.exp == weight.exp + input.exp`.
    #[error(
        "dyadic constraint violated: bias.exp={bias_exp} != weight.exp={weight_exp} + input.exp={input_exp}"
    )]
    DyadicViolation {
        /// Bias tensor scale exponent.
        bias_exp: i8,
        /// Weight tensor scale exponent.
        weight_exp: i8,
        /// Input tensor scale exponent.
        input_exp: i8,
    },

    /// A quantization scheme claimed to be symmetric was not.
    #[error("asymmetric quantization encountered: {context}")]
    AsymmetricParams {
        /// Human-readable description of where this occurred.
        context: &'static str,
    },

    /// Calibration's fail-closed range veto fired: an observed value fell
    /// outside the claimed safe range for a tensor.
    #[error("range veto triggered for tensor {tensor}")]
    RangeVetoTriggered {
        /// Name or index of the offending tensor.
        tensor: String,
    },

    /// Verification's end-to-end or per-layer bound was violated.
    #[error("bound violation: {context}")]
    BoundViolation {
        /// Human-readable description of which bound failed.
        context: String,
    },

    /// An unfolded BatchNorm layer was encountered where folding is
    /// mandatory before conversion.
    #[error("unfolded batch-normalization layer encountered")]
    UnfoldedBatchNorm,

    /// Analysis produced an invalid context (e.g. after an asymmetric
    /// spec was encountered) and therefore emitted no digest.
    #[error("analysis context invalid: {reason}")]
    AnalysisInvalid {
        /// Human-readable description of why the context is invalid.
        reason: &'static str,
    },

    /// A fatal fault (everything except overflow/underflow) was present
    /// in an upstream context, blocking certificate assembly.
    #[error("fatal fault present upstream, certificate not built: {reason}")]
    FatalFaultPresent {
        /// Human-readable description of the fatal condition.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        let errs = [
            CqError::NullArgument { what: "weights" },
            CqError::BufferTooShort {
                expected: 360,
                actual: 10,
            },
            CqError::UnknownMagic {
                found: *b"XXXX",
            },
            CqError::UnknownScopeFormat { byte: 0xff },
            CqError::IncompleteBuilder {
                missing: "source_hash",
            },
            CqError::InvalidShift { shift: 63 },
            CqError::DivisionByZero {
                context: "batchnorm folding",
            },
            CqError::ShapeMismatch {
                what: "gamma",
                expected: 4,
                actual: 3,
            },
            CqError::DyadicViolation {
                bias_exp: 1,
                weight_exp: 16,
                input_exp: 16,
            },
            CqError::AsymmetricParams {
                context: "weight tensor",
            },
            CqError::RangeVetoTriggered {
                tensor: "conv1.weight".to_owned(),
            },
            CqError::BoundViolation {
                context: "layer 3".to_owned(),
            },
            CqError::UnfoldedBatchNorm,
            CqError::AnalysisInvalid {
                reason: "asymmetric spec",
            },
            CqError::FatalFaultPresent {
                reason: "range_exceed".to_owned(),
            },
        ];
        for err in errs {
            assert!(!err.to_string().is_empty());
        }
    }
}
