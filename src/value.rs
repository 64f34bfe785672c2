//! Numeric values accepted by the median estimators
//!
//! Estimators store values in binary heaps, which need a total order. Integers
//! already have one. Floats only have one once NaN and the infinities are kept
//! out, so every value passes through [`MedianValue::validate`] before it is
//! stored.

use crate::traits::InvalidValue;
use core::cmp::Ordering;
use core::fmt::Debug;

/// A value that can be fed to a median estimator
///
/// Implemented for all primitive integer and float types. Other totally
/// ordered numeric types (fixed-point decimals, for example) can opt in by
/// implementing this trait.
///
/// # Example
///
/// ```
/// use streammedian::value::MedianValue;
/// use streammedian::traits::InvalidValue;
///
/// assert_eq!(3_i32.validate(), Ok(3));
/// assert_eq!(f64::NAN.validate(), Err(InvalidValue::NaN));
/// assert_eq!(f32::INFINITY.validate(), Err(InvalidValue::Infinite));
/// ```
pub trait MedianValue: Copy + Debug {
    /// Check that the value can take part in a total order
    fn validate(self) -> Result<Self, InvalidValue>;

    /// Total order between two validated values
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Widen to `f64` for the median computation
    fn to_f64(self) -> f64;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MedianValue for $ty {
                #[inline]
                fn validate(self) -> Result<Self, InvalidValue> {
                    Ok(self)
                }

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MedianValue for $ty {
                #[inline]
                fn validate(self) -> Result<Self, InvalidValue> {
                    if self.is_nan() {
                        Err(InvalidValue::NaN)
                    } else if self.is_infinite() {
                        Err(InvalidValue::Infinite)
                    } else {
                        Ok(self)
                    }
                }

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$ty>::total_cmp(self, other)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_float!(f32, f64);

/// Heap entry ordered through [`MedianValue::total_cmp`]
///
/// Only validated values are ever wrapped, so for floats `-0.0 < 0.0` is the
/// single place where this order differs from `PartialOrd`. Both compare as
/// the same number once widened, which keeps the median exact.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(not(feature = "two-heap"), allow(dead_code))]
pub(crate) struct Ordered<T>(pub(crate) T);

impl<T: MedianValue> PartialEq for Ordered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: MedianValue> Eq for Ordered<T> {}

impl<T: MedianValue> PartialOrd for Ordered<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: MedianValue> Ord for Ordered<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Mean of the two middle values
///
/// Falls back to halving each side first when the sum overflows, which is
/// exact for values that large.
#[inline]
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum.is_finite() {
        sum / 2.0
    } else {
        a / 2.0 + b / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_always_valid() {
        assert_eq!(i64::MIN.validate(), Ok(i64::MIN));
        assert_eq!(u8::MAX.validate(), Ok(u8::MAX));
        assert_eq!(0usize.validate(), Ok(0));
    }

    #[test]
    fn test_floats_reject_non_finite() {
        assert_eq!(f64::NAN.validate(), Err(InvalidValue::NaN));
        assert_eq!(f64::INFINITY.validate(), Err(InvalidValue::Infinite));
        assert_eq!(f64::NEG_INFINITY.validate(), Err(InvalidValue::Infinite));
        assert_eq!(f32::NAN.validate(), Err(InvalidValue::NaN));
        assert_eq!(f64::MAX.validate(), Ok(f64::MAX));
        assert_eq!((-0.0f64).validate(), Ok(-0.0));
    }

    #[test]
    fn test_ordered_wrapper() {
        assert!(Ordered(1.5f64) < Ordered(2.0));
        assert!(Ordered(-3i32) < Ordered(-2));
        assert_eq!(Ordered(4u16), Ordered(4u16));
        assert_eq!(Ordered(7.0f32).cmp(&Ordered(7.0)), Ordering::Equal);
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(midpoint(5.0, 2.0), 3.5);
        assert_eq!(midpoint(-5.0, 10.0), 2.5);
        assert_eq!(midpoint(f64::MAX, f64::MAX), f64::MAX);
        assert_eq!(midpoint(-f64::MAX, f64::MAX), 0.0);
        assert_eq!(midpoint(5e-324, 5e-324), 5e-324);
    }
}
