//! Certification, the Notary (§4.7).
//!
//! Certify assembles the three upstream digests, the source/target
//! model identities, and the measured/claimed error bounds into a
//! single 360-byte, tamper-evident [`Certificate`].

pub mod builder;
pub mod certificate;
pub mod layout;

pub use builder::{CertificateBuilder, SCOPE_FORMAT_Q16_16, SCOPE_FORMAT_Q8_24};
pub use certificate::Certificate;
pub use layout::{MAGIC, MERKLE_INPUT_LEN, TOTAL_LEN};
