//! Quantized-model binary header (§6): a fixed-layout record that gives
//! the (out-of-scope) inference engine a concrete wire contract, even
//! though no file I/O happens in this repository. Per-layer headers
//! and weight/bias payloads follow this header at `headers_offset` but
//! are not modeled here.

use cq_error::{CqError, Result};

/// Magic bytes for a `Q16.16` quantized model artifact.
pub const MAGIC_Q16_16: [u8; 4] = *b"CQ16";
/// Magic bytes for a `Q8.24` quantized model artifact.
pub const MAGIC_Q8_24: [u8; 4] = *b"CQ24";

/// Fixed encoded length of [`QuantizedModelHeader`], in bytes.
pub const HEADER_LEN: usize = 156;

/// The quantized-model artifact's fixed header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizedModelHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub source_model_hash: [u8; 32],
    pub quantized_model_hash: [u8; 32],
    pub layer_count: u32,
    pub param_count: u64,
    pub total_size: u64,
    pub headers_offset: u64,
    pub certificate_ref: [u8; 32],
}

impl QuantizedModelHeader {
    /// `true` iff `magic` is one of the two recognized formats.
    #[must_use]
    pub const fn is_known_magic(magic: [u8; 4]) -> bool {
        let b0 = magic[0] == MAGIC_Q16_16[0] && magic[1] == MAGIC_Q16_16[1];
        let is_q16 = b0 && magic[2] == MAGIC_Q16_16[2] && magic[3] == MAGIC_Q16_16[3];
        let is_q24 = b0 && magic[2] == MAGIC_Q8_24[2] && magic[3] == MAGIC_Q8_24[3];
        is_q16 || is_q24
    }

    /// Encode to the canonical 156-byte little-endian layout, with 24
    /// trailing reserved bytes left zero-filled.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0_u8; HEADER_LEN];
        let mut off = 0;
        buf[off..off + 4].copy_from_slice(&self.magic);
        off += 4;
        buf[off..off + 4].copy_from_slice(&self.version.to_le_bytes());
        off += 4;
        buf[off..off + 32].copy_from_slice(&self.source_model_hash);
        off += 32;
        buf[off..off + 32].copy_from_slice(&self.quantized_model_hash);
        off += 32;
        buf[off..off + 4].copy_from_slice(&self.layer_count.to_le_bytes());
        off += 4;
        buf[off..off + 8].copy_from_slice(&self.param_count.to_le_bytes());
        off += 8;
        buf[off..off + 8].copy_from_slice(&self.total_size.to_le_bytes());
        off += 8;
        buf[off..off + 8].copy_from_slice(&self.headers_offset.to_le_bytes());
        off += 8;
        buf[off..off + 32].copy_from_slice(&self.certificate_ref);
        // remaining 24 bytes stay zero (reserved).
        buf
    }

    /// Decode from a buffer at least [`HEADER_LEN`] bytes long.
    ///
    /// # Errors
    /// Returns [`CqError::BufferTooShort`] if too short, or
    /// [`CqError::UnknownMagic`] if the magic bytes name neither
    /// recognized format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(CqError::BufferTooShort {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let mut magic = [0_u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        if !Self::is_known_magic(magic) {
            return Err(CqError::UnknownMagic { found: magic });
        }

        let mut off = 4;
        let version = u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
        off += 4;
        let source_model_hash: [u8; 32] = bytes[off..off + 32].try_into().unwrap();
        off += 32;
        let quantized_model_hash: [u8; 32] = bytes[off..off + 32].try_into().unwrap();
        off += 32;
        let layer_count = u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
        off += 4;
        let param_count = u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        off += 8;
        let total_size = u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        off += 8;
        let headers_offset = u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        off += 8;
        let certificate_ref: [u8; 32] = bytes[off..off + 32].try_into().unwrap();

        Ok(Self {
            magic,
            version,
            source_model_hash,
            quantized_model_hash,
            layer_count,
            param_count,
            total_size,
            headers_offset,
            certificate_ref,
        })
    }
}
