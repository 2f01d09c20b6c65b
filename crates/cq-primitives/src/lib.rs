//! Deterministic fixed-point arithmetic primitives (the "DVM", §4.1).
//!
//! Every operation here is exact under integer arithmetic and
//! deterministic across platforms: no floating point, no
//! implementation-defined shift behaviour, no unchecked overflow.

mod dvm;

pub use dvm::{
    add64_sat, clamp32, mac, mac_to_q16_16, overflow_safety, q16_16_div, q16_16_mul,
    round_shift_rne, sub64_sat,
};
