//! Overflow-safety proof record (§3).
//!
//! The computation that produces an [`OverflowProof`] lives in
//! `cq-primitives`; this crate only carries the data record so that
//! layer error contracts (which embed a proof) do not need to depend on
//! the primitives crate.

/// Per-linear-layer overflow proof: bounds the maximum magnitude a
/// dot-product accumulator can reach given weight/input magnitude bounds
/// and the dot-product length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverflowProof {
    /// Maximum absolute weight magnitude observed or claimed.
    pub max_weight_mag: u32,
    /// Maximum absolute input magnitude observed or claimed.
    pub max_input_mag: u32,
    /// Dot-product length (number of terms summed into the accumulator).
    pub dot_product_len: u32,
    /// `2^63 - product` when safe, else `0`.
    pub safety_margin: u64,
    /// `true` iff `dot_product_len * max_weight_mag * max_input_mag < 2^63`.
    pub is_safe: bool,
}

impl OverflowProof {
    /// The maximally safe trivial proof used when any factor is zero.
    #[must_use]
    pub const fn trivial_safe(max_weight_mag: u32, max_input_mag: u32, dot_product_len: u32) -> Self {
        Self {
            max_weight_mag,
            max_input_mag,
            dot_product_len,
            safety_margin: 1_u64 << 63,
            is_safe: true,
        }
    }
}
