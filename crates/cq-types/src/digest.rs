//! Fixed-layout digest records (§3) produced exactly once by each stage
//! and consumed read-only by certification. Each digest has a canonical
//! little-endian byte encoding used both for hashing into the
//! certificate and for stable cross-platform comparison.

/// Digest emitted by the Analyze stage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisDigest {
    /// Entry error `ε₀`.
    pub entry_error: f64,
    /// End-to-end theoretical bound `ε_total`.
    pub total_bound: f64,
    /// Number of layers analyzed.
    pub layer_count: u32,
    /// Number of layers whose overflow proof is safe.
    pub overflow_safe_count: u32,
    /// SHA-256 over the canonical serialization of all layer contracts.
    pub layer_hash: [u8; 32],
}

impl AnalysisDigest {
    /// Fixed encoded length in bytes.
    pub const ENCODED_LEN: usize = 8 + 8 + 4 + 4 + 32;

    /// Canonical little-endian byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        buf.extend_from_slice(&self.entry_error.to_le_bytes());
        buf.extend_from_slice(&self.total_bound.to_le_bytes());
        buf.extend_from_slice(&self.layer_count.to_le_bytes());
        buf.extend_from_slice(&self.overflow_safe_count.to_le_bytes());
        buf.extend_from_slice(&self.layer_hash);
        buf
    }
}

/// Digest emitted by the Calibrate stage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationDigest {
    /// Hash of the calibration dataset.
    pub dataset_hash: [u8; 32],
    /// Number of samples observed.
    pub sample_count: u64,
    /// Number of tensors calibrated.
    pub tensor_count: u64,
    /// Minimum coverage ratio.
    pub c_min: f64,
    /// 10th-percentile coverage ratio.
    pub c_p10: f64,
    /// `1` iff the fail-closed range veto fired, else `0`.
    pub range_veto_triggered: u8,
    /// `1` iff the warning-only coverage veto fired, else `0`.
    pub coverage_veto_triggered: u8,
}

impl CalibrationDigest {
    /// Fixed encoded length in bytes.
    pub const ENCODED_LEN: usize = 32 + 8 + 8 + 8 + 8 + 1 + 1;

    /// Canonical little-endian byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        buf.extend_from_slice(&self.dataset_hash);
        buf.extend_from_slice(&self.sample_count.to_le_bytes());
        buf.extend_from_slice(&self.tensor_count.to_le_bytes());
        buf.extend_from_slice(&self.c_min.to_le_bytes());
        buf.extend_from_slice(&self.c_p10.to_le_bytes());
        buf.push(self.range_veto_triggered);
        buf.push(self.coverage_veto_triggered);
        buf
    }
}

/// Digest emitted by the Verify stage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerificationDigest {
    /// Hash of the verification dataset.
    pub dataset_hash: [u8; 32],
    /// Number of samples compared.
    pub sample_count: u64,
    /// Number of layers that satisfied their theoretical bound.
    pub layers_passed: u32,
    /// End-to-end theoretical bound.
    pub theoretical_total: f64,
    /// End-to-end measured maximum error.
    pub measured_max: f64,
    /// `1` iff both layer-wise and total bounds are satisfied, else `0`.
    pub pass_flag: u8,
}

impl VerificationDigest {
    /// Fixed encoded length in bytes.
    pub const ENCODED_LEN: usize = 32 + 8 + 4 + 8 + 8 + 1;

    /// Canonical little-endian byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        buf.extend_from_slice(&self.dataset_hash);
        buf.extend_from_slice(&self.sample_count.to_le_bytes());
        buf.extend_from_slice(&self.layers_passed.to_le_bytes());
        buf.extend_from_slice(&self.theoretical_total.to_le_bytes());
        buf.extend_from_slice(&self.measured_max.to_le_bytes());
        buf.push(self.pass_flag);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_digest_encodes_to_fixed_length() {
        let digest = AnalysisDigest {
            entry_error: 7.63e-6,
            total_bound: 1.0e-4,
            layer_count: 5,
            overflow_safe_count: 5,
            layer_hash: [7; 32],
        };
        assert_eq!(digest.to_bytes().len(), AnalysisDigest::ENCODED_LEN);
    }

    #[test]
    fn calibration_digest_encodes_to_fixed_length() {
        let digest = CalibrationDigest {
            dataset_hash: [1; 32],
            sample_count: 1000,
            tensor_count: 12,
            c_min: 0.9,
            c_p10: 0.95,
            range_veto_triggered: 0,
            coverage_veto_triggered: 0,
        };
        assert_eq!(digest.to_bytes().len(), CalibrationDigest::ENCODED_LEN);
    }

    #[test]
    fn verification_digest_encodes_to_fixed_length() {
        let digest = VerificationDigest {
            dataset_hash: [2; 32],
            sample_count: 1000,
            layers_passed: 5,
            theoretical_total: 1.0e-4,
            measured_max: 8.5e-5,
            pass_flag: 1,
        };
        assert_eq!(digest.to_bytes().len(), VerificationDigest::ENCODED_LEN);
    }
}
