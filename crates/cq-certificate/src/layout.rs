//! The certificate's fixed 360-byte binary layout (§3, §6).
//!
//! Seven contiguous sections: metadata, scope, source identity,
//! mathematical core, claims, target identity, integrity. The Merkle
//! root is computed over the first [`MERKLE_INPUT_LEN`] bytes — every
//! offset up to but not including `merkle_root` itself.

/// Total encoded length of a certificate, in bytes.
pub const TOTAL_LEN: usize = 360;
/// Number of leading bytes hashed to produce the Merkle root.
pub const MERKLE_INPUT_LEN: usize = 264;
/// Magic bytes identifying a certificate record.
pub const MAGIC: [u8; 4] = *b"CQCR";

pub(crate) const MAGIC_OFFSET: usize = 0;
pub(crate) const VERSION_OFFSET: usize = 4;
pub(crate) const TIMESTAMP_OFFSET: usize = 8;
pub(crate) const SCOPE_FORMAT_OFFSET: usize = 16;
pub(crate) const SOURCE_HASH_OFFSET: usize = 17;
pub(crate) const BN_HASH_OFFSET: usize = 49;
pub(crate) const FOLDED_FLAG_OFFSET: usize = 81;
pub(crate) const ANALYSIS_HASH_OFFSET: usize = 82;
pub(crate) const CALIBRATION_HASH_OFFSET: usize = 114;
pub(crate) const VERIFICATION_HASH_OFFSET: usize = 146;
pub(crate) const EPSILON0_OFFSET: usize = 178;
pub(crate) const EPSILON_TOTAL_OFFSET: usize = 186;
pub(crate) const EPSILON_MAX_OFFSET: usize = 194;
pub(crate) const TARGET_HASH_OFFSET: usize = 202;
pub(crate) const TARGET_PARAM_COUNT_OFFSET: usize = 234;
pub(crate) const TARGET_LAYER_COUNT_OFFSET: usize = 242;
// Bytes 246..264 are reserved, zero-filled, and covered by the Merkle hash.
pub(crate) const MERKLE_ROOT_OFFSET: usize = MERKLE_INPUT_LEN;
pub(crate) const SIGNATURE_OFFSET: usize = 296;

/// Scope-format byte for symmetric `Q16.16`.
pub const SCOPE_FORMAT_SYMMETRIC_Q16_16: u8 = 0x01;
/// Scope-format byte for symmetric `Q8.24`.
pub const SCOPE_FORMAT_SYMMETRIC_Q8_24: u8 = 0x11;
