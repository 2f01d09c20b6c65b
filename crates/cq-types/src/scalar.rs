//! Fixed-point scalar encodings (§3).
//!
//! A value `v ∈ ℝ` is represented by the integer `⌊v·S⌉` under
//! round-to-nearest-even, where `S = 2ⁿ` is the format's scale factor.
//! These types are pure storage: rounding, saturation, and arithmetic
//! live in `cq-primitives` (the DVM), which depends on this crate rather
//! than the other way around.

/// Number of fractional bits in the `Q16.16` format.
pub const Q16_16_FRAC_BITS: u32 = 16;
/// Number of fractional bits in the `Q8.24` format.
pub const Q8_24_FRAC_BITS: u32 = 24;
/// Number of fractional bits in the `Q32.32` accumulator format.
pub const Q32_32_FRAC_BITS: u32 = 32;

/// A signed `Q16.16` fixed-point scalar: 32-bit storage, 16 fractional
/// bits, scale `S = 2^16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Q16_16(i32);

impl Q16_16 {
    /// Wrap a raw `i32` storage value with no scaling applied.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw `i32` storage value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Decode to the real value this scalar represents.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1_i32 << Q16_16_FRAC_BITS)
    }

    /// The largest representable real value, `INT32_MAX / S`.
    #[must_use]
    pub fn max_value() -> f64 {
        f64::from(i32::MAX) / f64::from(1_i32 << Q16_16_FRAC_BITS)
    }

    /// The smallest representable real value, `INT32_MIN / S`.
    #[must_use]
    pub fn min_value() -> f64 {
        f64::from(i32::MIN) / f64::from(1_i32 << Q16_16_FRAC_BITS)
    }
}

/// A signed `Q8.24` fixed-point scalar: 32-bit storage, 24 fractional
/// bits, scale `S = 2^24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Q8_24(i32);

impl Q8_24 {
    /// Wrap a raw `i32` storage value with no scaling applied.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw `i32` storage value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Decode to the real value this scalar represents.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1_i32 << Q8_24_FRAC_BITS)
    }
}

/// A 64-bit `Q32.32` accumulator used for dot-products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Q32_32(i64);

impl Q32_32 {
    /// Wrap a raw `i64` storage value with no scaling applied.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw `i64` storage value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Decode to the real value this accumulator represents.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1_u64 << Q32_32_FRAC_BITS) as f64
    }

    /// The zero accumulator.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// A signed scale exponent `n` such that the scale factor is `S = 2^n`.
/// Only power-of-two scales are admitted by the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScaleExp(i8);

impl ScaleExp {
    /// Construct a scale exponent from a signed byte.
    #[must_use]
    pub const fn new(exp: i8) -> Self {
        Self(exp)
    }

    /// The exponent value `n`.
    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    /// The scale factor `S = 2^n` as `f64`.
    #[must_use]
    pub fn scale(self) -> f64 {
        2f64.powi(i32::from(self.0))
    }
}

impl std::ops::Add for ScaleExp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
