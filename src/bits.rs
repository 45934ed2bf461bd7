//! Binary arithmetic utilities used for space-filling curve computations

use crate::{CurveIdx, NumBits};

/// Count the number of bits of an integer
#[inline(always)]
pub const fn num_bits<T>() -> NumBits {
    (core::mem::size_of::<T>() * 8) as _
}

/// Generate a mask that selects a certain number of low-order bits: 0000...0011
#[inline(always)]
pub const fn low_order_mask(length: NumBits) -> CurveIdx {
    debug_assert!(length <= num_bits::<CurveIdx>());
    if length < num_bits::<CurveIdx>() {
        (1 << length) - 1
    } else {
        CurveIdx::MAX
    }
}

/// Extract the bit of `value` selected by the single-bit mask `bit`, as 0 or 1
#[inline(always)]
pub const fn masked_bit(value: CurveIdx, bit: CurveIdx) -> CurveIdx {
    debug_assert!(bit.is_power_of_two());
    (value & bit != 0) as _
}
