//! Fault flags (§3, §9): a compact bitset of the seven named conditions
//! that the pipeline can raise, with bitwise-OR merge semantics and a
//! `has_fatal` predicate (fatal = every bit except overflow/underflow).

use std::fmt;

bitflags::bitflags! {
    /// Bitset of fault conditions, accumulated via bitwise OR across the
    /// pipeline and never reset automatically.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct FaultSet: u32 {
        /// A saturating operation clamped to `INT32_MAX` / overflowed positively.
        const OVERFLOW = 0x01;
        /// A saturating operation clamped to `INT32_MIN` / overflowed negatively.
        const UNDERFLOW = 0x02;
        /// Division by zero was encountered.
        const DIV_ZERO = 0x04;
        /// An observed value fell outside its claimed safe range.
        const RANGE_EXCEED = 0x08;
        /// An unfolded BatchNorm layer was encountered.
        const UNFOLDED_BN = 0x10;
        /// A quantization scheme claimed symmetric was not.
        const ASYMMETRIC = 0x20;
        /// A theoretical or measured error bound was violated.
        const BOUND_VIOLATION = 0x40;
    }
}

impl FaultSet {
    /// `true` if the overflow bit is set.
    #[must_use]
    pub const fn overflow(self) -> bool {
        self.contains(Self::OVERFLOW)
    }

    /// `true` if the underflow bit is set.
    #[must_use]
    pub const fn underflow(self) -> bool {
        self.contains(Self::UNDERFLOW)
    }

    /// `true` if the division-by-zero bit is set.
    #[must_use]
    pub const fn div_zero(self) -> bool {
        self.contains(Self::DIV_ZERO)
    }

    /// `true` if the range-exceeded bit is set.
    #[must_use]
    pub const fn range_exceed(self) -> bool {
        self.contains(Self::RANGE_EXCEED)
    }

    /// `true` if the unfolded-BatchNorm bit is set.
    #[must_use]
    pub const fn unfolded_bn(self) -> bool {
        self.contains(Self::UNFOLDED_BN)
    }

    /// `true` if the asymmetric-parameters bit is set.
    #[must_use]
    pub const fn asymmetric(self) -> bool {
        self.contains(Self::ASYMMETRIC)
    }

    /// `true` if the bound-violation bit is set.
    #[must_use]
    pub const fn bound_violation(self) -> bool {
        self.contains(Self::BOUND_VIOLATION)
    }

    /// `true` if any fault bit is set.
    #[must_use]
    pub const fn any(self) -> bool {
        !self.is_empty()
    }

    /// `true` if any *fatal* fault bit is set — every named bit except
    /// overflow and underflow, which are recorded-but-continue faults.
    #[must_use]
    pub const fn has_fatal(self) -> bool {
        self.intersects(Self::DIV_ZERO
            .union(Self::RANGE_EXCEED)
            .union(Self::UNFOLDED_BN)
            .union(Self::ASYMMETRIC)
            .union(Self::BOUND_VIOLATION))
    }

    /// Serialize to the single 32-bit word backing this bitset.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.bits()
    }
}

impl fmt::Display for FaultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names = [
            (Self::OVERFLOW, "overflow"),
            (Self::UNDERFLOW, "underflow"),
            (Self::DIV_ZERO, "div_zero"),
            (Self::RANGE_EXCEED, "range_exceed"),
            (Self::UNFOLDED_BN, "unfolded_bn"),
            (Self::ASYMMETRIC, "asymmetric"),
            (Self::BOUND_VIOLATION, "bound_violation"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
