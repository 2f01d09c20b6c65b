//! Certificate assembly, the Notary's builder (§4.7).
//!
//! Six setters accumulate the inputs produced by the upstream stages;
//! `build` is refused until every one has been called, and is refused
//! again if any upstream fault is fatal.

use cq_hash::{sha256, Digest32};
use cq_types::{AnalysisDigest, CalibrationDigest, Clock, FaultSet, VerificationDigest};

use cq_error::{CqError, Result};

use crate::certificate::Certificate;
use crate::layout::{SCOPE_FORMAT_SYMMETRIC_Q16_16, SCOPE_FORMAT_SYMMETRIC_Q8_24};

/// Source-model identity accumulated by [`CertificateBuilder::with_source`].
#[derive(Debug, Clone, Copy)]
struct SourceInfo {
    source_model_hash: Digest32,
    bn_folding_hash: Digest32,
    folded: bool,
}

/// Target (quantized model) identity accumulated by
/// [`CertificateBuilder::with_target`].
#[derive(Debug, Clone, Copy)]
struct TargetInfo {
    quantized_model_hash: Digest32,
    param_count: u64,
    layer_count: u32,
    scope_format: u8,
}

/// Accumulates the six required inputs to a sealed [`Certificate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateBuilder {
    version: Option<u32>,
    source: Option<SourceInfo>,
    analysis: Option<AnalysisDigest>,
    calibration: Option<CalibrationDigest>,
    verification: Option<VerificationDigest>,
    target: Option<TargetInfo>,
}

impl CertificateBuilder {
    /// A fresh, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the certificate format version.
    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the source model's identity and BatchNorm-folding record.
    #[must_use]
    pub const fn with_source(
        mut self,
        source_model_hash: Digest32,
        bn_folding_hash: Digest32,
        folded: bool,
    ) -> Self {
        self.source = Some(SourceInfo {
            source_model_hash,
            bn_folding_hash,
            folded,
        });
        self
    }

    /// Set the Analyze-stage digest.
    #[must_use]
    pub const fn with_analysis_digest(mut self, digest: AnalysisDigest) -> Self {
        self.analysis = Some(digest);
        self
    }

    /// Set the Calibrate-stage digest.
    #[must_use]
    pub const fn with_calibration_digest(mut self, digest: CalibrationDigest) -> Self {
        self.calibration = Some(digest);
        self
    }

    /// Set the Verify-stage digest.
    #[must_use]
    pub const fn with_verification_digest(mut self, digest: VerificationDigest) -> Self {
        self.verification = Some(digest);
        self
    }

    /// Set the quantized (target) model's identity.
    #[must_use]
    pub const fn with_target(
        mut self,
        quantized_model_hash: Digest32,
        param_count: u64,
        layer_count: u32,
        scope_format: u8,
    ) -> Self {
        self.target = Some(TargetInfo {
            quantized_model_hash,
            param_count,
            layer_count,
            scope_format,
        });
        self
    }

    /// `true` iff every setter has been invoked at least once.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.version.is_some()
            && self.source.is_some()
            && self.analysis.is_some()
            && self.calibration.is_some()
            && self.verification.is_some()
            && self.target.is_some()
    }

    /// Assemble and seal a [`Certificate`].
    ///
    /// # Errors
    /// Returns [`CqError::IncompleteBuilder`] if any setter was never
    /// called, [`CqError::UnknownScopeFormat`] if the target's scope byte
    /// is not recognized, and [`CqError::FatalFaultPresent`] if
    /// `upstream_faults` carries any fatal bit (the certificate must not
    /// attest a pipeline run that failed closed upstream).
    pub fn build(self, upstream_faults: FaultSet, clock: &dyn Clock) -> Result<Certificate> {
        let version = self.version.ok_or(CqError::IncompleteBuilder {
            missing: "version",
        })?;
        let source = self.source.ok_or(CqError::IncompleteBuilder {
            missing: "source",
        })?;
        let analysis = self.analysis.ok_or(CqError::IncompleteBuilder {
            missing: "analysis_digest",
        })?;
        let calibration = self.calibration.ok_or(CqError::IncompleteBuilder {
            missing: "calibration_digest",
        })?;
        let verification = self.verification.ok_or(CqError::IncompleteBuilder {
            missing: "verification_digest",
        })?;
        let target = self.target.ok_or(CqError::IncompleteBuilder {
            missing: "target",
        })?;

        if upstream_faults.has_fatal() {
            return Err(CqError::FatalFaultPresent {
                reason: upstream_faults.to_string(),
            });
        }
        if !Certificate::is_known_scope_format(target.scope_format) {
            return Err(CqError::UnknownScopeFormat {
                byte: target.scope_format,
            });
        }

        let mut cert = Certificate {
            version,
            timestamp: clock.now_unix_seconds(),
            scope_format: target.scope_format,
            source_model_hash: source.source_model_hash,
            bn_folding_hash: source.bn_folding_hash,
            folded: source.folded,
            analysis_hash: sha256(&analysis.to_bytes()),
            calibration_hash: sha256(&calibration.to_bytes()),
            verification_hash: sha256(&verification.to_bytes()),
            epsilon0: analysis.entry_error,
            epsilon_total: analysis.total_bound,
            epsilon_max_measured: verification.measured_max,
            quantized_model_hash: target.quantized_model_hash,
            target_param_count: target.param_count,
            target_layer_count: target.layer_count,
            merkle_root: [0; 32],
            signature: [0; 64],
        };
        cert.seal();
        tracing::info!(
            target_layer_count = cert.target_layer_count,
            epsilon_total = cert.epsilon_total,
            "certificate sealed"
        );
        Ok(cert)
    }
}

impl Certificate {
    /// Compute and store the Merkle root, transitioning the certificate
    /// from assembled (COMPLETE) to sealed (SEALED).
    fn seal(&mut self) {
        self.merkle_root = self.compute_merkle_root();
    }

    /// Attach an externally produced signature over the Merkle root.
    pub fn attach_signature(&mut self, signature: [u8; 64]) {
        self.signature = signature;
    }
}

/// Symmetric `Q16.16` scope-format byte, re-exported for builder callers.
pub const SCOPE_FORMAT_Q16_16: u8 = SCOPE_FORMAT_SYMMETRIC_Q16_16;
/// Symmetric `Q8.24` scope-format byte, re-exported for builder callers.
pub const SCOPE_FORMAT_Q8_24: u8 = SCOPE_FORMAT_SYMMETRIC_Q8_24;

#[cfg(test)]
mod tests {
    use super::*;
    use cq_types::FixedClock;

    fn full_builder() -> CertificateBuilder {
        CertificateBuilder::new()
            .with_version(1)
            .with_source([1; 32], [2; 32], true)
            .with_analysis_digest(AnalysisDigest {
                entry_error: 7.63e-6,
                total_bound: 1.0e-4,
                layer_count: 5,
                overflow_safe_count: 5,
                layer_hash: [9; 32],
            })
            .with_calibration_digest(CalibrationDigest {
                dataset_hash: [10; 32],
                sample_count: 1000,
                tensor_count: 12,
                c_min: 0.95,
                c_p10: 0.97,
                range_veto_triggered: 0,
                coverage_veto_triggered: 0,
            })
            .with_verification_digest(VerificationDigest {
                dataset_hash: [10; 32],
                sample_count: 1000,
                layers_passed: 5,
                theoretical_total: 1.0e-4,
                measured_max: 8.5e-5,
                pass_flag: 1,
            })
            .with_target([11; 32], 100_000, 5, SCOPE_FORMAT_Q16_16)
    }

    #[test]
    fn incomplete_builder_is_not_complete() {
        let builder = CertificateBuilder::new().with_version(1);
        assert!(!builder.is_complete());
    }

    #[test]
    fn complete_builder_builds_a_sealed_certificate() {
        let builder = full_builder();
        assert!(builder.is_complete());
        let clock = FixedClock(1_700_000_000);
        let cert = builder
            .build(FaultSet::empty(), &clock)
            .expect("builds successfully");
        assert_eq!(cert.timestamp, 1_700_000_000);
        assert!(cert.verify_integrity());
        assert!(cert.bounds_satisfied());
    }

    #[test]
    fn missing_setter_is_reported() {
        let builder = CertificateBuilder::new()
            .with_version(1)
            .with_source([1; 32], [2; 32], false);
        let clock = FixedClock(0);
        let err = builder.build(FaultSet::empty(), &clock).unwrap_err();
        assert!(matches!(err, CqError::IncompleteBuilder { .. }));
    }

    #[test]
    fn fatal_upstream_fault_blocks_assembly() {
        let builder = full_builder();
        let clock = FixedClock(0);
        let err = builder
            .build(FaultSet::RANGE_EXCEED, &clock)
            .unwrap_err();
        assert!(matches!(err, CqError::FatalFaultPresent { .. }));
    }

    #[test]
    fn non_fatal_overflow_fault_does_not_block_assembly() {
        let builder = full_builder();
        let clock = FixedClock(0);
        assert!(builder.build(FaultSet::OVERFLOW, &clock).is_ok());
    }
}
