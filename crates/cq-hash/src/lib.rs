//! SHA-256 hashing (§4.2), exactly per FIPS 180-4.
//!
//! This crate is the sole place in the workspace that names the `sha2`
//! crate directly; every other crate goes through [`sha256`] or
//! [`Sha256Hasher`] so the hashing backend stays a narrow, mockable seam.
//! Behaviour must match byte-for-byte across platforms: `sha2`'s software
//! implementation already guarantees this, so no custom round-function
//! code lives here.

use sha2::{Digest as _, Sha256};

/// A 32-byte SHA-256 digest.
pub type Digest32 = [u8; 32];

/// Hash `data` in one shot and return the 32-byte digest.
#[must_use]
pub fn sha256(data: &[u8]) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash the concatenation of several byte slices without materializing
/// an intermediate buffer, used by digest-construction call sites that
/// hash multiple fields in a fixed order (e.g. BatchNorm folding's
/// `γ || β || μ || σ² || ε`).
#[must_use]
pub fn sha256_concat(parts: &[&[u8]]) -> Digest32 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Incremental SHA-256 hasher for call sites that build up a digest
/// field-by-field (e.g. canonical layer-contract serialization).
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create a fresh, empty hasher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Feed more bytes into the running hash state.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Consume the hasher and produce the final digest.
    #[must_use]
    pub fn finalize(self) -> Digest32 {
        self.inner.finalize().into()
    }
}

impl std::fmt::Debug for Sha256Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256Hasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(digest: &Digest32) -> String {
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn empty_string_vector() {
        let digest = sha256(b"");
        assert_eq!(
            to_hex(&digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn abc_vector() {
        let digest = sha256(b"abc");
        assert_eq!(
            to_hex(&digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn incremental_matches_one_shot() {
        let one_shot = sha256(b"hello world");
        let mut incremental = Sha256Hasher::new();
        incremental.update(b"hello").update(b" ").update(b"world");
        assert_eq!(one_shot, incremental.finalize());
    }

    #[test]
    fn concat_matches_manual_concatenation() {
        let manual = sha256(b"abcdef");
        let concat = sha256_concat(&[b"abc", b"def"]);
        assert_eq!(manual, concat);
    }
}
