//! Numeric constraint for meter values.
//!
//! A meter's value type must be an unsigned integer at least 16 bits
//! wide: signed types would break the `0 <= current <= max` invariant and
//! 8-bit types overflow too easily under modifier math. The constraint is
//! enforced through this trait's impl set rather than documentation:
//! `u8`, `bool`, and signed integers simply do not implement it.

/// Arithmetic surface required of a meter's value type.
///
/// Implemented for `u16`, `u32`, and `u64`. All operations are checked:
/// a `None` means the operation would have left the type's range and the
/// caller decides the policy (reject, clamp, skip). `u128` is excluded so
/// the widening ratio math in the meter always fits `u128`.
pub trait MeterNumber: Copy + Ord + Eq + core::fmt::Debug {
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// The largest representable value.
    const MAX: Self;

    /// Checked addition; `None` on overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// Checked subtraction; `None` on underflow.
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// Checked multiplication; `None` on overflow.
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    /// Checked division; `None` when `rhs` is zero.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Widen into `u128` for ratio arithmetic.
    fn to_u128(self) -> u128;
    /// Narrow from `u128`, saturating at [`MeterNumber::MAX`].
    fn from_u128_saturating(value: u128) -> Self;
}

macro_rules! impl_meter_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MeterNumber for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_mul(self, rhs)
                }

                #[inline]
                fn checked_div(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_div(self, rhs)
                }

                #[inline]
                fn to_u128(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn from_u128_saturating(value: u128) -> Self {
                    <$ty>::try_from(value).unwrap_or(<$ty>::MAX)
                }
            }
        )*
    };
}

impl_meter_number!(u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_operations_report_overflow() {
        assert_eq!(MeterNumber::checked_add(u16::MAX, 1u16), None);
        assert_eq!(MeterNumber::checked_sub(0u32, 1u32), None);
        assert_eq!(MeterNumber::checked_mul(u64::MAX, 2u64), None);
        assert_eq!(MeterNumber::checked_div(5u16, 0u16), None);
        assert_eq!(MeterNumber::checked_div(7u16, 2u16), Some(3));
    }

    #[test]
    fn narrowing_saturates() {
        assert_eq!(u16::from_u128_saturating(u128::MAX), u16::MAX);
        assert_eq!(u16::from_u128_saturating(1234), 1234);
        assert_eq!(u64::from_u128_saturating(u128::MAX), u64::MAX);
    }
}
