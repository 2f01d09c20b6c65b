//! The assembled certificate record (§3, §4.7).

use cq_error::{CqError, Result};
use cq_hash::{sha256, Digest32};

use crate::layout::{
    self, ANALYSIS_HASH_OFFSET, BN_HASH_OFFSET, CALIBRATION_HASH_OFFSET, EPSILON0_OFFSET,
    EPSILON_MAX_OFFSET, EPSILON_TOTAL_OFFSET, FOLDED_FLAG_OFFSET, MAGIC, MERKLE_INPUT_LEN,
    MERKLE_ROOT_OFFSET, SCOPE_FORMAT_OFFSET, SCOPE_FORMAT_SYMMETRIC_Q16_16,
    SCOPE_FORMAT_SYMMETRIC_Q8_24, SIGNATURE_OFFSET, SOURCE_HASH_OFFSET, TARGET_HASH_OFFSET,
    TARGET_LAYER_COUNT_OFFSET, TARGET_PARAM_COUNT_OFFSET, TIMESTAMP_OFFSET, TOTAL_LEN,
    VERIFICATION_HASH_OFFSET, VERSION_OFFSET,
};

/// A fully assembled, sealed certificate: a 360-byte fixed-layout record
/// attesting the error bounds of one quantized-model conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Certificate {
    pub version: u32,
    pub timestamp: u64,
    pub scope_format: u8,
    pub source_model_hash: Digest32,
    pub bn_folding_hash: Digest32,
    pub folded: bool,
    pub analysis_hash: Digest32,
    pub calibration_hash: Digest32,
    pub verification_hash: Digest32,
    pub epsilon0: f64,
    pub epsilon_total: f64,
    pub epsilon_max_measured: f64,
    pub quantized_model_hash: Digest32,
    pub target_param_count: u64,
    pub target_layer_count: u32,
    pub merkle_root: Digest32,
    pub signature: [u8; 64],
}

impl Certificate {
    /// `true` iff the format byte names a recognized scope/format.
    #[must_use]
    pub const fn is_known_scope_format(byte: u8) -> bool {
        matches!(
            byte,
            SCOPE_FORMAT_SYMMETRIC_Q16_16 | SCOPE_FORMAT_SYMMETRIC_Q8_24
        )
    }

    /// Recompute the Merkle root over the current field values and
    /// compare it against the stored `merkle_root`. Any mutation to
    /// bytes 0..264 since sealing is detected; mutations confined to the
    /// signature slot never affect this result.
    #[must_use]
    pub fn verify_integrity(&self) -> bool {
        self.compute_merkle_root() == self.merkle_root
    }

    /// `true` iff the measured end-to-end error does not exceed the
    /// claimed theoretical bound.
    #[must_use]
    pub fn bounds_satisfied(&self) -> bool {
        self.epsilon_max_measured <= self.epsilon_total
    }

    pub(crate) fn compute_merkle_root(&self) -> Digest32 {
        let mut buf = [0_u8; TOTAL_LEN];
        self.write_body(&mut buf);
        sha256(&buf[..MERKLE_INPUT_LEN])
    }

    fn write_body(&self, buf: &mut [u8; TOTAL_LEN]) {
        buf[layout::MAGIC_OFFSET..layout::MAGIC_OFFSET + 4].copy_from_slice(&MAGIC);
        buf[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&self.version.to_le_bytes());
        buf[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8]
            .copy_from_slice(&self.timestamp.to_le_bytes());
        buf[SCOPE_FORMAT_OFFSET] = self.scope_format;
        buf[SOURCE_HASH_OFFSET..SOURCE_HASH_OFFSET + 32]
            .copy_from_slice(&self.source_model_hash);
        buf[BN_HASH_OFFSET..BN_HASH_OFFSET + 32].copy_from_slice(&self.bn_folding_hash);
        buf[FOLDED_FLAG_OFFSET] = u8::from(self.folded);
        buf[ANALYSIS_HASH_OFFSET..ANALYSIS_HASH_OFFSET + 32]
            .copy_from_slice(&self.analysis_hash);
        buf[CALIBRATION_HASH_OFFSET..CALIBRATION_HASH_OFFSET + 32]
            .copy_from_slice(&self.calibration_hash);
        buf[VERIFICATION_HASH_OFFSET..VERIFICATION_HASH_OFFSET + 32]
            .copy_from_slice(&self.verification_hash);
        buf[EPSILON0_OFFSET..EPSILON0_OFFSET + 8].copy_from_slice(&self.epsilon0.to_le_bytes());
        buf[EPSILON_TOTAL_OFFSET..EPSILON_TOTAL_OFFSET + 8]
            .copy_from_slice(&self.epsilon_total.to_le_bytes());
        buf[EPSILON_MAX_OFFSET..EPSILON_MAX_OFFSET + 8]
            .copy_from_slice(&self.epsilon_max_measured.to_le_bytes());
        buf[TARGET_HASH_OFFSET..TARGET_HASH_OFFSET + 32]
            .copy_from_slice(&self.quantized_model_hash);
        buf[TARGET_PARAM_COUNT_OFFSET..TARGET_PARAM_COUNT_OFFSET + 8]
            .copy_from_slice(&self.target_param_count.to_le_bytes());
        buf[TARGET_LAYER_COUNT_OFFSET..TARGET_LAYER_COUNT_OFFSET + 4]
            .copy_from_slice(&self.target_layer_count.to_le_bytes());
        // bytes MERKLE_INPUT_LEN-excluded reserved range left zero-filled.
    }

    /// Serialize to the canonical 360-byte encoding, including the
    /// Merkle root and (zero-filled, if unsigned) signature slot.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; TOTAL_LEN] {
        let mut buf = [0_u8; TOTAL_LEN];
        self.write_body(&mut buf);
        buf[MERKLE_ROOT_OFFSET..MERKLE_ROOT_OFFSET + 32].copy_from_slice(&self.merkle_root);
        buf[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 64].copy_from_slice(&self.signature);
        buf
    }

    /// Deserialize a 360-byte buffer, rejecting short buffers, unknown
    /// magic, and unrecognized scope/format bytes. Does not itself check
    /// [`verify_integrity`](Self::verify_integrity) — callers invoke that
    /// explicitly once a `Certificate` is in hand.
    ///
    /// # Errors
    /// Returns [`CqError::BufferTooShort`], [`CqError::UnknownMagic`], or
    /// [`CqError::UnknownScopeFormat`] on malformed input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < TOTAL_LEN {
            return Err(CqError::BufferTooShort {
                expected: TOTAL_LEN,
                actual: bytes.len(),
            });
        }
        let mut magic = [0_u8; 4];
        magic.copy_from_slice(&bytes[layout::MAGIC_OFFSET..layout::MAGIC_OFFSET + 4]);
        if magic != MAGIC {
            return Err(CqError::UnknownMagic { found: magic });
        }
        let scope_format = bytes[SCOPE_FORMAT_OFFSET];
        if !Self::is_known_scope_format(scope_format) {
            return Err(CqError::UnknownScopeFormat { byte: scope_format });
        }

        let read_u32 = |off: usize| u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
        let read_u64 = |off: usize| u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        let read_f64 = |off: usize| f64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        let read_hash = |off: usize| -> Digest32 { bytes[off..off + 32].try_into().unwrap() };

        Ok(Self {
            version: read_u32(VERSION_OFFSET),
            timestamp: read_u64(TIMESTAMP_OFFSET),
            scope_format,
            source_model_hash: read_hash(SOURCE_HASH_OFFSET),
            bn_folding_hash: read_hash(BN_HASH_OFFSET),
            folded: bytes[FOLDED_FLAG_OFFSET] != 0,
            analysis_hash: read_hash(ANALYSIS_HASH_OFFSET),
            calibration_hash: read_hash(CALIBRATION_HASH_OFFSET),
            verification_hash: read_hash(VERIFICATION_HASH_OFFSET),
            epsilon0: read_f64(EPSILON0_OFFSET),
            epsilon_total: read_f64(EPSILON_TOTAL_OFFSET),
            epsilon_max_measured: read_f64(EPSILON_MAX_OFFSET),
            quantized_model_hash: read_hash(TARGET_HASH_OFFSET),
            target_param_count: read_u64(TARGET_PARAM_COUNT_OFFSET),
            target_layer_count: read_u32(TARGET_LAYER_COUNT_OFFSET),
            merkle_root: read_hash(MERKLE_ROOT_OFFSET),
            signature: bytes[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 64]
                .try_into()
                .unwrap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Certificate {
        let mut cert = Certificate {
            version: 1,
            timestamp: 1_700_000_000,
            scope_format: SCOPE_FORMAT_SYMMETRIC_Q16_16,
            source_model_hash: [1; 32],
            bn_folding_hash: [2; 32],
            folded: true,
            analysis_hash: [3; 32],
            calibration_hash: [4; 32],
            verification_hash: [5; 32],
            epsilon0: 7.63e-6,
            epsilon_total: 1.0e-4,
            epsilon_max_measured: 8.5e-5,
            quantized_model_hash: [6; 32],
            target_param_count: 100_000,
            target_layer_count: 5,
            merkle_root: [0; 32],
            signature: [0; 64],
        };
        cert.merkle_root = cert.compute_merkle_root();
        cert
    }

    #[test]
    fn serialize_round_trips_through_deserialize() {
        let cert = sample();
        let bytes = cert.to_bytes();
        assert_eq!(bytes.len(), TOTAL_LEN);
        let decoded = Certificate::from_bytes(&bytes).expect("valid certificate");
        assert_eq!(decoded, cert);
    }

    #[test]
    fn verify_integrity_passes_for_freshly_sealed_certificate() {
        assert!(sample().verify_integrity());
    }

    #[test]
    fn tampering_with_target_param_count_invalidates_integrity() {
        let mut cert = sample();
        cert.target_param_count += 1;
        assert!(!cert.verify_integrity());
    }

    #[test]
    fn tampering_with_signature_does_not_affect_integrity() {
        let mut cert = sample();
        cert.signature = [0xff; 64];
        assert!(cert.verify_integrity());
    }

    #[test]
    fn bounds_satisfied_reflects_measured_vs_claimed() {
        let cert = sample();
        assert!(cert.bounds_satisfied());
        let mut violated = cert;
        violated.epsilon_max_measured = 2.0e-4;
        assert!(!violated.bounds_satisfied());
    }

    #[test]
    fn deserialize_rejects_short_buffer() {
        let err = Certificate::from_bytes(&[0; 10]).unwrap_err();
        assert!(matches!(err, CqError::BufferTooShort { .. }));
    }

    #[test]
    fn deserialize_rejects_unknown_magic() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        let err = Certificate::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CqError::UnknownMagic { .. }));
    }

    #[test]
    fn deserialize_rejects_unknown_scope_format() {
        let mut bytes = sample().to_bytes();
        bytes[SCOPE_FORMAT_OFFSET] = 0xff;
        let err = Certificate::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CqError::UnknownScopeFormat { .. }));
    }
}
